//! `run` command implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{error, info, warn};

use config_loader::{ClockConfig, ConfigLoader};
use contracts::SinkConfig;
use render_loop::create_render_loop;
use time_resolver::{SystemInstantSource, TimeResolver};

use super::{apply_clock_overrides, load_config, timezone_warning};
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::stats::RunStats;

/// Execute the `run` command
pub async fn run_clock(args: &RunArgs) -> Result<()> {
    let mut config = load_config(args.clock.config.as_deref())?;
    apply_run_overrides(&mut config, args)?;
    ConfigLoader::validate(&config).context("Invalid configuration after CLI overrides")?;

    let resolver = TimeResolver::new();
    if let Some(warning) = timezone_warning(&config, &resolver) {
        warn!("{}", warning);
    }

    info!(
        timezone = %config.clock.timezone,
        local_zone = resolver.local_zone_name(),
        use_24h = config.clock.use_24h,
        frame_rate_hz = config.clock.frame_rate_hz,
        sinks = config.sinks.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&config, &resolver);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    // Held for the whole run; the loop reads the latest snapshot every tick
    let (_settings_tx, settings_rx) = watch::channel(config.settings());
    let max_frames = (args.frames != 0).then_some(args.frames);

    let render_loop = create_render_loop(
        &config,
        settings_rx,
        resolver,
        Arc::new(SystemInstantSource),
        max_frames,
    )
    .context("Failed to build render loop")?;

    info!("Starting render loop...");
    let started = Instant::now();
    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();

    let report = render_loop
        .spawn()
        .cancel_on(async move {
            shutdown_signal().await;
            warn!("Received shutdown signal, stopping render loop...");
            let _ = signal_tx.send(());
        })
        .await
        .map_err(|e| CliError::loop_task(e.to_string()))?;

    let stats = RunStats {
        report,
        duration: started.elapsed(),
        interrupted: signal_rx.await.is_ok(),
    };

    info!(
        frames = stats.report.frames_rendered,
        duration_secs = stats.duration.as_secs_f64(),
        fps = format!("{:.2}", stats.fps()),
        "Render loop finished"
    );
    stats.print_summary();

    Ok(())
}

/// Apply every `run` override onto the loaded configuration
fn apply_run_overrides(config: &mut ClockConfig, args: &RunArgs) -> Result<()> {
    apply_clock_overrides(config, &args.clock);

    if let Some(fps) = args.fps {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(CliError::invalid_override(format!("--fps must be > 0, got {fps}")).into());
        }
        info!(fps = fps, "Overriding frame rate from CLI");
        config.clock.frame_rate_hz = fps;
    }

    if !args.sinks.is_empty() {
        let mut sinks: Vec<SinkConfig> = Vec::new();
        for kind in &args.sinks {
            if sinks.iter().any(|s| s.sink_type == kind.sink_type()) {
                continue;
            }
            sinks.push(SinkConfig {
                name: kind.name().to_string(),
                sink_type: kind.sink_type(),
                params: HashMap::new(),
            });
        }
        info!(sinks = ?args.sinks, "Overriding sinks from CLI");
        config.sinks = sinks;
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
///
/// If a handler cannot be installed the error is logged and that source is
/// ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(config: &ClockConfig, resolver: &TimeResolver) {
    println!("\n=== Configuration Summary ===\n");
    println!("Clock:");
    if config.clock.timezone.is_blank() {
        println!("  Timezone: (local: {})", resolver.local_zone_name());
    } else {
        println!("  Timezone: {}", config.clock.timezone);
    }
    println!(
        "  Format: {}",
        if config.clock.use_24h { "24-hour" } else { "12-hour" }
    );
    println!("  Frame rate: {} Hz", config.clock.frame_rate_hz);
    println!("  Theme: {:?}", config.clock.theme);

    println!("\nSinks ({}):", config.sinks.len());
    for sink in &config.sinks {
        println!("  - {} ({:?})", sink.name, sink.sink_type);
    }

    println!();
}
