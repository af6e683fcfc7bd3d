//! LogSink - logs a frame summary via tracing

use std::collections::HashMap;

use contracts::{ContractError, DisplaySink, DisplayState};
use tracing::{info, instrument};

/// Sink that logs frame summaries, one line every `every` frames
pub struct LogSink {
    name: String,
    every: u64,
    seen: u64,
}

impl LogSink {
    /// Create a LogSink that logs every frame
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_every(name, 1)
    }

    /// Log one frame out of `every` (0 is treated as 1)
    pub fn with_every(name: impl Into<String>, every: u64) -> Self {
        Self {
            name: name.into(),
            every: every.max(1),
            seen: 0,
        }
    }

    /// Create from params map (`every`, optional)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let every = match params.get("every") {
            Some(raw) => parse_every(raw).ok_or_else(|| {
                ContractError::config_validation(
                    format!("sinks.{name}.params.every"),
                    format!("expected a positive integer, got '{raw}'"),
                )
            })?,
            None => 1,
        };
        Ok(Self::with_every(name, every))
    }

    pub fn every(&self) -> u64 {
        self.every
    }
}

/// Parse the `every` parameter; zero and non-numbers are rejected
pub fn parse_every(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

impl DisplaySink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_render",
        skip(self, state),
        fields(sink = %self.name, frame_id = state.frame_id)
    )]
    async fn render(&mut self, state: &DisplayState) -> Result<(), ContractError> {
        self.seen += 1;
        if (self.seen - 1).is_multiple_of(self.every) {
            info!(
                sink = %self.name,
                frame_id = state.frame_id,
                zone = %state.zone,
                time = %state.digital_text,
                date = %state.date_text,
                "Frame rendered"
            );
        }
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, frames = self.seen, "LogSink closed");
        Ok(())
    }
}
