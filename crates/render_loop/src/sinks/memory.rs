//! MemorySink - keeps every frame in memory

use std::sync::{Arc, Mutex};

use contracts::{ContractError, DisplaySink, DisplayState};

/// Shared list of recorded frames
pub type RecordedFrames = Arc<Mutex<Vec<DisplayState>>>;

/// Sink that records each DisplayState it receives
///
/// Clone the [`RecordedFrames`] handle before moving the sink into a loop to
/// inspect what was pushed.
pub struct MemorySink {
    name: String,
    frames: RecordedFrames,
    closed: bool,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Arc::default(),
            closed: false,
        }
    }

    /// Handle to the recorded frames
    pub fn frames(&self) -> RecordedFrames {
        Arc::clone(&self.frames)
    }

    /// Copy of everything recorded so far
    pub fn snapshot(frames: &RecordedFrames) -> Vec<DisplayState> {
        frames.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DisplaySink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn render(&mut self, state: &DisplayState) -> Result<(), ContractError> {
        if self.closed {
            return Err(ContractError::sink_write(&self.name, "sink is closed"));
        }
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(state.clone());
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new("memory");
        let frames = sink.frames();

        for frame_id in 0..3 {
            let state = DisplayState {
                frame_id,
                zone: "UTC".into(),
                digital_text: String::new(),
                date_text: String::new(),
                second_angle_deg: 0.0,
                minute_angle_deg: 0.0,
                hour_angle_deg: 0.0,
            };
            sink.render(&state).await.unwrap();
        }

        let recorded = MemorySink::snapshot(&frames);
        let ids: Vec<u64> = recorded.iter().map(|s| s.frame_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        sink.close().await.unwrap();
        let late = recorded[0].clone();
        assert!(sink.render(&late).await.is_err());
    }
}
