//! Instant sources: system clock and a manually driven one for tests/replays

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use contracts::InstantSource;

/// Reads the host clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInstantSource;

impl InstantSource for SystemInstantSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Returns whatever instant it was last set to
#[derive(Debug)]
pub struct ManualInstantSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualInstantSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl InstantSource for ManualInstantSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_source_advance() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let source = ManualInstantSource::new(start);
        assert_eq!(source.now(), start);

        source.advance(Duration::milliseconds(1500));
        assert_eq!(source.now(), start + Duration::milliseconds(1500));

        source.set(start);
        assert_eq!(source.now(), start);
    }

    #[test]
    fn test_system_source_moves_forward() {
        let source = SystemInstantSource;
        let a = source.now();
        let b = source.now();
        assert!(b >= a);
    }
}
