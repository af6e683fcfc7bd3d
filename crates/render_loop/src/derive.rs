//! Per-frame derivation: hand angles, digital readout and date text
//!
//! Every value here is computed from a single [`WallClockFields`], so the
//! hands, the digital time and the date always describe the same reading.

use chrono::{Locale, NaiveDate, NaiveTime};

use contracts::{DisplayState, HourFormat, WallClockFields};

/// Fixed locale of the date line
pub const DATE_LOCALE: Locale = Locale::zh_CN;

/// Long form: year, month, day, weekday (e.g. `2024年3月15日星期五`)
pub const DATE_FORMAT: &str = "%Y年%-m月%-d日%A";

/// Hand rotations in degrees, clockwise from 12 o'clock. Not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub second: f64,
    pub minute: f64,
    pub hour: f64,
}

/// Hand angles of a wall-clock reading.
///
/// The second hand sweeps with the fractional second; the minute hand
/// advances per whole second and the hour hand per whole minute.
pub fn hand_angles(fields: &WallClockFields) -> HandAngles {
    let second = f64::from(fields.second);
    let minute = f64::from(fields.minute);
    let hour = f64::from(fields.hour % 12);

    HandAngles {
        second: (second + fields.fractional_second) * 6.0,
        minute: (minute + second / 60.0) * 6.0,
        hour: (hour + minute / 60.0) * 30.0,
    }
}

/// `HH:MM:SS`, or `HH:MM:SS AM|PM` with hours 01-12
pub fn digital_text(fields: &WallClockFields, format: HourFormat) -> String {
    match format {
        HourFormat::TwentyFour => format!(
            "{:02}:{:02}:{:02}",
            fields.hour, fields.minute, fields.second
        ),
        HourFormat::Twelve => {
            let hour = (fields.hour + 11) % 12 + 1;
            let suffix = if fields.hour >= 12 { " PM" } else { " AM" };
            format!(
                "{:02}:{:02}:{:02}{}",
                hour, fields.minute, fields.second, suffix
            )
        }
    }
}

/// Localized long-form date
pub fn date_text(date: NaiveDate) -> String {
    // Only the date part is formatted, so the attached offset is irrelevant
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(DATE_FORMAT, DATE_LOCALE)
        .to_string()
}

/// Build the display state of one frame
pub fn compose(fields: &WallClockFields, format: HourFormat, frame_id: u64) -> DisplayState {
    let angles = hand_angles(fields);
    let digital_text = digital_text(fields, format);
    let date_text = date_text(fields.date);

    DisplayState {
        frame_id,
        zone: fields.zone.to_string(),
        digital_text,
        date_text,
        second_angle_deg: angles.second,
        minute_angle_deg: angles.minute,
        hour_angle_deg: angles.hour,
    }
}
