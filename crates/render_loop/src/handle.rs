//! LoopHandle - owns the running loop task and its cancellation flag

use std::future::Future;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use observability::MetricsSummary;

use crate::metrics::MetricsSnapshot;

/// Create a cancellation channel
pub fn cancel_channel() -> (CancelSender, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelSender { tx }, CancelToken { rx })
}

/// Cancellation side, held by whoever may stop the loop
#[derive(Debug)]
pub struct CancelSender {
    tx: watch::Sender<bool>,
}

impl CancelSender {
    /// Raise the flag. Returns false if it was already raised.
    pub fn cancel(&self) -> bool {
        !self.tx.send_replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Loop side of the cancellation flag
///
/// A dropped [`CancelSender`] counts as cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once the flag is raised or the sender is gone
    pub async fn cancelled(&mut self) {
        // wait_for checks the current value first, so an earlier cancel is seen
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// What the loop did before it stopped
#[derive(Debug, Clone, Default)]
pub struct LoopReport {
    /// Frames received by at least one sink
    pub frames_rendered: u64,
    /// Aggregated frame metrics
    pub summary: MetricsSummary,
    /// Per-sink counters, in configuration order
    pub sinks: Vec<(String, MetricsSnapshot)>,
}

/// Handle to a running render loop
#[derive(Debug)]
pub struct LoopHandle {
    cancel: CancelSender,
    join: JoinHandle<LoopReport>,
}

impl LoopHandle {
    pub(crate) fn new(cancel: CancelSender, join: JoinHandle<LoopReport>) -> Self {
        Self { cancel, join }
    }

    /// Stop the loop. No frame is pushed after this returns; a sink render
    /// still awaiting is abandoned.
    ///
    /// Repeated calls are no-ops.
    pub fn cancel(&self) {
        if self.cancel.cancel() {
            info!("Render loop cancellation requested");
        } else {
            debug!("Render loop already cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the loop to stop on its own (frame limit) or after a cancel
    pub async fn join(self) -> Result<LoopReport, JoinError> {
        let Self { cancel, join } = self;
        let report = join.await;
        drop(cancel);
        report
    }

    /// Cancel, then wait for sinks to be flushed and closed
    pub async fn shutdown(self) -> Result<LoopReport, JoinError> {
        self.cancel();
        self.join().await
    }

    /// Run until the loop stops on its own or `signal` resolves, whichever
    /// comes first. The signal cancels the loop once.
    pub async fn cancel_on<F>(mut self, signal: F) -> Result<LoopReport, JoinError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(signal);
        tokio::select! {
            report = &mut self.join => return report,
            _ = &mut signal => {}
        }
        self.shutdown().await
    }
}
