//! DisplaySink trait - render loop output interface
//!
//! Defines the abstract interface for display surfaces.

use crate::{ContractError, DisplayState};

/// Display output trait
///
/// All sink implementations must implement this trait. `render` is called
/// once per frame from the loop task and should finish before the next tick.
#[trait_variant::make(DisplaySink: Send)]
pub trait LocalDisplaySink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Render one frame
    ///
    /// # Errors
    /// Returns write error (should include context). The loop logs it and
    /// keeps running.
    async fn render(&mut self, state: &DisplayState) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
