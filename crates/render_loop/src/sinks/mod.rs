//! Sink implementations
//!
//! Contains LogSink, FileSink, TerminalSink and MemorySink, plus
//! [`ConfiguredSink`] which dispatches to whichever one a config names.

mod file;
mod log;
mod memory;
mod terminal;

use std::io::Stdout;

use contracts::{ContractError, DisplaySink, DisplayState, SinkConfig, SinkType, Theme};
use tracing::instrument;

use crate::error::RenderLoopError;

pub use self::file::{FileSink, FileSinkConfig, DEFAULT_FILE_PATH};
pub use self::log::{parse_every, LogSink};
pub use self::memory::{MemorySink, RecordedFrames};
pub use self::terminal::{parse_radius, Palette, TerminalSink, DEFAULT_RADIUS};

/// A sink built from configuration
pub enum ConfiguredSink {
    Log(LogSink),
    File(FileSink),
    Terminal(TerminalSink<Stdout>),
    Memory(MemorySink),
}

impl ConfiguredSink {
    /// Create the sink a [`SinkConfig`] describes
    #[instrument(
        name = "configured_sink_from_config",
        skip(config),
        fields(sink = %config.name, sink_type = ?config.sink_type)
    )]
    pub fn from_config(config: &SinkConfig, theme: Theme) -> Result<Self, RenderLoopError> {
        match config.sink_type {
            SinkType::Log => LogSink::from_params(&config.name, &config.params)
                .map(Self::Log)
                .map_err(|e| RenderLoopError::sink_creation(&config.name, e.to_string())),
            SinkType::File => FileSink::from_params(&config.name, &config.params)
                .map(Self::File)
                .map_err(|e| RenderLoopError::sink_creation(&config.name, e.to_string())),
            SinkType::Terminal => TerminalSink::<Stdout>::from_params(&config.name, theme, &config.params)
                .map(Self::Terminal)
                .map_err(|e| RenderLoopError::sink_creation(&config.name, e.to_string())),
        }
    }
}

impl From<MemorySink> for ConfiguredSink {
    fn from(sink: MemorySink) -> Self {
        Self::Memory(sink)
    }
}

impl DisplaySink for ConfiguredSink {
    fn name(&self) -> &str {
        match self {
            Self::Log(s) => s.name(),
            Self::File(s) => s.name(),
            Self::Terminal(s) => s.name(),
            Self::Memory(s) => s.name(),
        }
    }

    async fn render(&mut self, state: &DisplayState) -> Result<(), ContractError> {
        match self {
            Self::Log(s) => s.render(state).await,
            Self::File(s) => s.render(state).await,
            Self::Terminal(s) => s.render(state).await,
            Self::Memory(s) => s.render(state).await,
        }
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        match self {
            Self::Log(s) => s.flush().await,
            Self::File(s) => s.flush().await,
            Self::Terminal(s) => s.flush().await,
            Self::Memory(s) => s.flush().await,
        }
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        match self {
            Self::Log(s) => s.close().await,
            Self::File(s) => s.close().await,
            Self::Terminal(s) => s.close().await,
            Self::Memory(s) => s.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_config_log() {
        let mut params = HashMap::new();
        params.insert("every".to_string(), "10".to_string());
        let config = SinkConfig {
            name: "trace".to_string(),
            sink_type: SinkType::Log,
            params,
        };

        let sink = ConfiguredSink::from_config(&config, Theme::System).unwrap();
        assert!(matches!(sink, ConfiguredSink::Log(_)));
        assert_eq!(sink.name(), "trace");
    }

    #[test]
    fn test_from_config_bad_param_names_sink() {
        let mut params = HashMap::new();
        params.insert("radius".to_string(), "0".to_string());
        let config = SinkConfig {
            name: "face".to_string(),
            sink_type: SinkType::Terminal,
            params,
        };

        let err = ConfiguredSink::from_config(&config, Theme::Dark).err().unwrap();
        assert!(matches!(err, RenderLoopError::SinkCreation { ref name, .. } if name == "face"));
    }
}
