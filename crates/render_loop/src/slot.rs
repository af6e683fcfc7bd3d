//! SinkSlot - one sink plus its counters, driven inline by the loop task

use std::sync::Arc;

use tracing::{debug, error, instrument};

use contracts::{DisplaySink, DisplayState};
use observability::record_sink_render;

use crate::metrics::SinkMetrics;

pub(crate) struct SinkSlot<S> {
    name: String,
    sink: S,
    metrics: Arc<SinkMetrics>,
}

impl<S: DisplaySink> SinkSlot<S> {
    pub(crate) fn new(sink: S) -> Self {
        Self {
            name: sink.name().to_string(),
            sink,
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Push one frame. A failure is counted and logged, never returned.
    pub(crate) async fn render(&mut self, state: &DisplayState) {
        match self.sink.render(state).await {
            Ok(()) => {
                self.metrics.record_render(state.frame_id);
                record_sink_render(&self.name, true);
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                record_sink_render(&self.name, false);
                error!(
                    sink = %self.name,
                    frame_id = state.frame_id,
                    error = %e,
                    "Render failed"
                );
            }
        }
    }

    #[instrument(name = "sink_slot_shutdown", skip(self), fields(sink = %self.name))]
    pub(crate) async fn shutdown(mut self) {
        if let Err(e) = self.sink.flush().await {
            error!(sink = %self.name, error = %e, "Flush failed on shutdown");
        }
        if let Err(e) = self.sink.close().await {
            error!(sink = %self.name, error = %e, "Close failed on shutdown");
        }
        debug!(sink = %self.name, "Sink closed");
    }
}
