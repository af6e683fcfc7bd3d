//! FileSink - appends one JSON line per frame

use contracts::{ContractError, DisplaySink, DisplayState};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

/// Default output file
pub const DEFAULT_FILE_PATH: &str = "./tzclock.jsonl";

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output file, appended to if it exists
    pub path: PathBuf,
}

impl FileSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_PATH));

        Self { path }
    }
}

/// Sink that writes frames as JSON lines
pub struct FileSink {
    name: String,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    lines: u64,
}

impl FileSink {
    /// Create a new FileSink, creating parent directories as needed
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file sink path is empty",
            ));
        }
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        Ok(Self {
            name: name.into(),
            path: config.path,
            writer: Some(BufWriter::new(file)),
            lines: 0,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = FileSinkConfig::from_params(params);
        Self::new(name, config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, state: &DisplayState) -> std::io::Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "file sink is closed")
        })?;
        serde_json::to_writer(&mut *writer, state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    fn persist_frame(&mut self, state: &DisplayState) -> Result<(), ContractError> {
        self.write_line(state).map_err(|e| {
            error!(sink = %self.name, frame_id = state.frame_id, error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })
    }
}

impl DisplaySink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_render",
        skip(self, state),
        fields(sink = %self.name, frame_id = state.frame_id)
    )]
    async fn render(&mut self, state: &DisplayState) -> Result<(), ContractError> {
        self.persist_frame(state)
    }

    #[instrument(name = "file_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        if let Some(writer) = self.writer.as_mut() {
            writer
                .flush()
                .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        }
        Ok(())
    }

    #[instrument(name = "file_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        }
        debug!(sink = %self.name, path = %self.path.display(), lines = self.lines, "FileSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn state(frame_id: u64) -> DisplayState {
        DisplayState {
            frame_id,
            zone: "Asia/Tokyo".into(),
            digital_text: "08:30:00".into(),
            date_text: "2024年3月18日星期一".into(),
            second_angle_deg: 0.0,
            minute_angle_deg: 180.0,
            hour_angle_deg: 255.0,
        }
    }

    #[tokio::test]
    async fn test_file_sink_writes_json_lines() {
        let dir = tempdir().unwrap();
        let config = FileSinkConfig {
            path: dir.path().join("nested").join("frames.jsonl"),
        };

        let mut sink = FileSink::new("test_file", config).unwrap();
        sink.render(&state(1)).await.unwrap();
        sink.render(&state(2)).await.unwrap();
        sink.close().await.unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: DisplayState = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, state(1));
    }

    #[tokio::test]
    async fn test_file_sink_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frames.jsonl");

        for frame_id in 0..2 {
            let mut params = HashMap::new();
            params.insert("path".to_string(), path.display().to_string());
            let mut sink = FileSink::from_params("file", &params).unwrap();
            sink.render(&state(frame_id)).await.unwrap();
            sink.close().await.unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_render_after_close_fails() {
        let dir = tempdir().unwrap();
        let config = FileSinkConfig {
            path: dir.path().join("frames.jsonl"),
        };
        let mut sink = FileSink::new("file", config).unwrap();
        sink.close().await.unwrap();
        assert!(sink.render(&state(1)).await.is_err());
    }

    #[test]
    fn test_default_path() {
        let config = FileSinkConfig::from_params(&HashMap::new());
        assert_eq!(config.path, PathBuf::from(DEFAULT_FILE_PATH));
    }
}
