//! Run statistics.

use std::time::Duration;

use render_loop::LoopReport;

/// Statistics from a clock run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// What the loop reported when it stopped
    pub report: LoopReport,

    /// Wall time between spawn and stop
    pub duration: Duration,

    /// Whether the run ended on a shutdown signal
    pub interrupted: bool,
}

impl RunStats {
    /// Achieved frames per second
    pub fn fps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.report.frames_rendered as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Share of sink renders that failed, as percentage
    pub fn failure_rate(&self) -> f64 {
        let (renders, failures) = self
            .report
            .sinks
            .iter()
            .fold((0u64, 0u64), |(r, f), (_, m)| {
                (r + m.render_count, f + m.failure_count)
            });
        let total = renders + failures;
        if total > 0 {
            failures as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                        Clock Statistics                      ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        let summary = &self.report.summary;

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Frames rendered: {}", self.report.frames_rendered);
        println!("   ├─ FPS: {:.2}", self.fps());
        println!(
            "   ├─ Local-zone fallbacks: {} ({:.2}%)",
            summary.fallback_frames, summary.fallback_rate
        );
        println!("   ├─ Tick lag (ms): {}", summary.tick_lag_ms);
        println!(
            "   └─ Stopped by: {}",
            if self.interrupted {
                "shutdown signal"
            } else {
                "frame limit"
            }
        );

        if !self.report.sinks.is_empty() {
            println!("\n📤 Sinks ({:.2}% failed)", self.failure_rate());
            let last = self.report.sinks.len() - 1;
            for (i, (name, metrics)) in self.report.sinks.iter().enumerate() {
                let prefix = if i == last { "└─" } else { "├─" };
                println!(
                    "   {} {}: {} rendered, {} failed",
                    prefix, name, metrics.render_count, metrics.failure_count
                );
            }
        }

        println!();
    }
}
