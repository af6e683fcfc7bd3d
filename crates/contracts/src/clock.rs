//! Clock settings - the externally owned inputs read at the start of each tick

use serde::{Deserialize, Serialize};

use crate::TimezoneId;

/// Hour format of the digital readout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourFormat {
    /// `HH:MM:SS`, hour 00-23
    #[default]
    TwentyFour,
    /// `HH:MM:SS AM|PM`, hour 01-12
    Twelve,
}

impl HourFormat {
    /// Map the "use 24-hour format" flag to a format
    pub fn from_24h_flag(use_24h: bool) -> Self {
        if use_24h {
            Self::TwentyFour
        } else {
            Self::Twelve
        }
    }

    pub fn is_24h(self) -> bool {
        matches!(self, Self::TwentyFour)
    }
}

/// Read-only configuration snapshot
///
/// Taken once at the start of each tick. The owner may replace it between
/// any two ticks; the change is visible on the next tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockSettings {
    /// Selected zone (blank = observer's local zone)
    pub timezone: TimezoneId,
    /// Digital readout format
    pub hour_format: HourFormat,
}

impl ClockSettings {
    pub fn new(timezone: impl Into<TimezoneId>, use_24h: bool) -> Self {
        Self {
            timezone: timezone.into(),
            hour_format: HourFormat::from_24h_flag(use_24h),
        }
    }
}

/// Manual theme override
///
/// Cycles follow-system -> dark -> light -> follow-system. Only display
/// surfaces look at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Follow the terminal / system preference
    #[default]
    System,
    Dark,
    Light,
}

impl Theme {
    /// Next state of the toggle cycle
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Dark,
            Self::Dark => Self::Light,
            Self::Light => Self::System,
        }
    }

    /// True when the user overrides the system preference
    pub fn is_manual(self) -> bool {
        !matches!(self, Self::System)
    }
}
