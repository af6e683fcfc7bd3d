//! Sink metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single sink
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Total successful renders
    render_count: AtomicU64,
    /// Total render failures
    failure_count: AtomicU64,
    /// Frame id of the last successful render
    last_frame_id: AtomicU64,
}

impl SinkMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> u64 {
        self.render_count.load(Ordering::Relaxed)
    }

    /// Record a successful render of `frame_id`
    pub fn record_render(&self, frame_id: u64) {
        self.render_count.fetch_add(1, Ordering::Relaxed);
        self.last_frame_id.store(frame_id, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn last_frame_id(&self) -> u64 {
        self.last_frame_id.load(Ordering::Relaxed)
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            render_count: self.render_count(),
            failure_count: self.failure_count(),
            last_frame_id: self.last_frame_id(),
        }
    }
}

/// Snapshot of sink metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub render_count: u64,
    pub failure_count: u64,
    pub last_frame_id: u64,
}
