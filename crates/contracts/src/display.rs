//! Per-frame values: resolved wall-clock fields and the derived display state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Civil time observed in one timezone at one instant
///
/// Produced by the time resolver, consumed by exactly one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallClockFields {
    /// Civil date in the same zone as the time fields
    pub date: NaiveDate,
    /// 0-23
    pub hour: u32,
    /// 0-59
    pub minute: u32,
    /// 0-59
    pub second: u32,
    /// Sub-second part in [0, 1)
    pub fractional_second: f64,
    /// Name of the zone actually used (after any fallback)
    pub zone: &'static str,
    /// Offset from UTC of `zone` at this instant
    pub utc_offset_seconds: i32,
}

/// Everything a display sink needs to draw one frame
///
/// Angles are in degrees, clockwise from 12 o'clock. They may leave
/// [0, 360); sinks rotate modulo 360 (see [`normalize_degrees`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Monotonic tick counter of the loop that produced this state
    pub frame_id: u64,
    /// Zone the time was rendered in
    pub zone: String,
    /// `HH:MM:SS` or `HH:MM:SS AM|PM`
    pub digital_text: String,
    /// Long-form localized date of the same wall-clock reading
    pub date_text: String,
    pub second_angle_deg: f64,
    pub minute_angle_deg: f64,
    pub hour_angle_deg: f64,
}

/// Map an angle in degrees onto [0, 360)
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}
