//! RenderLoop - per-frame resolve, derive and push

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use contracts::{ClockConfig, ClockSettings, DisplaySink, DisplayState, SharedInstantSource};
use observability::{record_frame_metrics, FrameMetricsAggregator};
use time_resolver::TimeResolver;

use crate::derive::compose;
use crate::error::RenderLoopError;
use crate::handle::{cancel_channel, CancelToken, LoopHandle, LoopReport};
use crate::metrics::MetricsSnapshot;
use crate::sinks::ConfiguredSink;
use crate::slot::SinkSlot;

/// Frame timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLoopConfig {
    /// Time between two frames
    pub frame_interval: Duration,
    /// Stop on its own after this many frames (None = until cancelled)
    pub max_frames: Option<u64>,
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / 60,
            max_frames: None,
        }
    }
}

impl RenderLoopConfig {
    /// Config for `frame_rate_hz` frames per second
    pub fn from_frame_rate(
        frame_rate_hz: f64,
        max_frames: Option<u64>,
    ) -> Result<Self, RenderLoopError> {
        if !frame_rate_hz.is_finite() || frame_rate_hz <= 0.0 {
            return Err(RenderLoopError::InvalidConfig(format!(
                "frame rate must be a positive number, got {frame_rate_hz}"
            )));
        }
        Ok(Self {
            frame_interval: Duration::from_secs_f64(1.0 / frame_rate_hz),
            max_frames,
        })
    }
}

/// One composed frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: DisplayState,
    /// The requested zone was blank or unknown and local time is shown
    pub fell_back: bool,
}

/// Builder for creating a RenderLoop
pub struct RenderLoopBuilder<S> {
    settings: watch::Receiver<ClockSettings>,
    resolver: TimeResolver,
    source: Option<SharedInstantSource>,
    config: RenderLoopConfig,
    sinks: Vec<S>,
}

impl<S: DisplaySink + 'static> RenderLoopBuilder<S> {
    /// Start from a settings feed; everything else has defaults
    pub fn new(settings: watch::Receiver<ClockSettings>) -> Self {
        Self {
            settings,
            resolver: TimeResolver::default(),
            source: None,
            config: RenderLoopConfig::default(),
            sinks: Vec::new(),
        }
    }

    pub fn resolver(mut self, resolver: TimeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn instant_source(mut self, source: SharedInstantSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn config(mut self, config: RenderLoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a sink; sinks receive frames in the order they were added
    pub fn sink(mut self, sink: S) -> Self {
        self.sinks.push(sink);
        self
    }

    #[instrument(name = "render_loop_builder_build", skip(self), fields(sink_count = self.sinks.len()))]
    pub fn build(self) -> Result<RenderLoop<S>, RenderLoopError> {
        if self.sinks.is_empty() {
            return Err(RenderLoopError::InvalidConfig(
                "at least one sink is required".to_string(),
            ));
        }
        if self.config.frame_interval.is_zero() {
            return Err(RenderLoopError::InvalidConfig(
                "frame interval must be non-zero".to_string(),
            ));
        }

        let source = self
            .source
            .unwrap_or_else(|| std::sync::Arc::new(time_resolver::SystemInstantSource));

        Ok(RenderLoop {
            resolver: self.resolver,
            source,
            settings: self.settings,
            slots: self.sinks.into_iter().map(SinkSlot::new).collect(),
            config: self.config,
        })
    }
}

/// The render loop: reads the clock, resolves the zone, pushes to sinks
pub struct RenderLoop<S> {
    resolver: TimeResolver,
    source: SharedInstantSource,
    settings: watch::Receiver<ClockSettings>,
    slots: Vec<SinkSlot<S>>,
    config: RenderLoopConfig,
}

impl<S: DisplaySink + 'static> RenderLoop<S> {
    pub fn config(&self) -> &RenderLoopConfig {
        &self.config
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.slots
            .iter()
            .map(|s| (s.name().to_string(), s.metrics().snapshot()))
            .collect()
    }

    /// Compose the frame for the current instant and settings snapshot
    pub fn compose_frame(&self, frame_id: u64) -> Frame {
        let settings = self.settings.borrow().clone();
        let instant = self.source.now();
        let zone = self.resolver.resolve_zone(settings.timezone.as_str());
        let fields = zone.rule.wall_clock(instant);

        Frame {
            state: compose(&fields, settings.hour_format, frame_id),
            fell_back: zone.fell_back,
        }
    }

    /// Spawn the loop as a background task
    pub fn spawn(self) -> LoopHandle {
        let (cancel_tx, cancel_rx) = cancel_channel();
        let join = tokio::spawn(self.run(cancel_rx));
        LoopHandle::new(cancel_tx, join)
    }

    /// Run until cancelled or until `max_frames` frames were pushed
    #[instrument(name = "render_loop_run", skip(self, cancel))]
    pub async fn run(mut self, mut cancel: CancelToken) -> LoopReport {
        info!(
            sinks = self.slots.len(),
            interval_ms = self.config.frame_interval.as_secs_f64() * 1000.0,
            max_frames = ?self.config.max_frames,
            "Render loop started"
        );

        let mut interval = time::interval(self.config.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut aggregator = FrameMetricsAggregator::new();
        let mut frame_id: u64 = 0;
        let mut falling_back: Option<bool> = None;

        loop {
            if self.config.max_frames.is_some_and(|max| frame_id >= max) {
                info!(frames = frame_id, "Frame limit reached");
                break;
            }

            let scheduled = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                scheduled = interval.tick() => scheduled,
            };
            let tick_lag_ms = Instant::now()
                .saturating_duration_since(scheduled)
                .as_secs_f64()
                * 1000.0;

            let frame = self.compose_frame(frame_id);
            if falling_back != Some(frame.fell_back) {
                if frame.fell_back {
                    let requested = self.settings.borrow().timezone.clone();
                    debug!(
                        requested = %requested,
                        local = self.resolver.local_zone_name(),
                        "Timezone not resolvable, showing local time"
                    );
                }
                falling_back = Some(frame.fell_back);
            }

            // A render still in flight when cancel lands is dropped
            let mut pushed = 0usize;
            let mut cancelled = false;
            for slot in &mut self.slots {
                cancelled = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => true,
                    _ = slot.render(&frame.state) => false,
                };
                if cancelled {
                    break;
                }
                pushed += 1;
            }

            // A frame counts once any sink has it
            if pushed > 0 {
                record_frame_metrics(&frame.state, frame.fell_back, tick_lag_ms);
                aggregator.update(frame.fell_back, tick_lag_ms);
                frame_id += 1;
            }
            if cancelled {
                if pushed > 0 {
                    debug!(frame_id = frame.state.frame_id, pushed, "Frame cut short by cancel");
                }
                break;
            }

            if frame_id.is_multiple_of(600) {
                debug!(frames = frame_id, "Render loop progress");
            }
        }

        let sinks = self.metrics();
        for slot in self.slots {
            slot.shutdown().await;
        }

        info!(frames = frame_id, "Render loop stopped");

        LoopReport {
            frames_rendered: frame_id,
            summary: aggregator.summary(),
            sinks,
        }
    }
}

/// Build a loop from a config file's sinks and frame rate
#[instrument(name = "render_loop_create", skip_all, fields(sink_count = config.sinks.len()))]
pub fn create_render_loop(
    config: &ClockConfig,
    settings: watch::Receiver<ClockSettings>,
    resolver: TimeResolver,
    source: SharedInstantSource,
    max_frames: Option<u64>,
) -> Result<RenderLoop<ConfiguredSink>, RenderLoopError> {
    let loop_config = RenderLoopConfig::from_frame_rate(config.clock.frame_rate_hz, max_frames)?;

    let mut builder = RenderLoopBuilder::new(settings)
        .resolver(resolver)
        .instant_source(source)
        .config(loop_config);
    for sink_config in &config.sinks {
        builder = builder.sink(ConfiguredSink::from_config(sink_config, config.clock.theme)?);
    }
    builder.build()
}
