//! TimeResolver - instant + timezone id -> wall-clock fields

use chrono::{DateTime, Local, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use contracts::WallClockFields;

use crate::local::{detect_local_zone, LOCAL_ZONE_NAME};

/// Largest fractional second we report; keeps leap-second readings below 1.0
const MAX_SUBSEC_NANOS: u32 = 999_999_999;

/// A civil-time rule the resolver can convert into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRule {
    /// Zone from the bundled IANA database
    Named(Tz),
    /// Whatever offset the operating system reports for local time
    SystemLocal,
}

impl ZoneRule {
    /// Zone name shown to the user
    pub fn name(&self) -> &'static str {
        match self {
            Self::Named(tz) => tz.name(),
            Self::SystemLocal => LOCAL_ZONE_NAME,
        }
    }

    /// Convert an instant into wall-clock fields of this zone
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> WallClockFields {
        match self {
            Self::Named(tz) => fields_of(&instant.with_timezone(tz), tz.name()),
            Self::SystemLocal => fields_of(&instant.with_timezone(&Local), LOCAL_ZONE_NAME),
        }
    }
}

/// The zone a timezone id resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedZone {
    pub rule: ZoneRule,
    /// True when the requested id was blank or unknown and the local zone was substituted
    pub fell_back: bool,
}

/// Converts instants into the wall-clock time of an arbitrary zone.
///
/// Holds only the observer's local zone, detected once at construction;
/// [`resolve`](Self::resolve) is a pure function of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeResolver {
    local: ZoneRule,
}

impl TimeResolver {
    /// Create a resolver using the detected observer zone
    pub fn new() -> Self {
        Self {
            local: detect_local_zone(),
        }
    }

    /// Create a resolver with a pinned observer zone
    pub fn with_local(local: ZoneRule) -> Self {
        Self { local }
    }

    /// Observer's own zone (the fallback)
    pub fn local_zone(&self) -> ZoneRule {
        self.local
    }

    pub fn local_zone_name(&self) -> &'static str {
        self.local.name()
    }

    /// Pick the zone for an id, substituting the local zone when the id is
    /// blank or unknown.
    pub fn resolve_zone(&self, timezone: &str) -> ResolvedZone {
        match parse_zone(timezone) {
            Some(tz) => ResolvedZone {
                rule: ZoneRule::Named(tz),
                fell_back: false,
            },
            None => ResolvedZone {
                rule: self.local,
                fell_back: true,
            },
        }
    }

    /// Wall-clock fields of `timezone` at `instant`. Never fails.
    pub fn resolve(&self, instant: DateTime<Utc>, timezone: &str) -> WallClockFields {
        self.resolve_zone(timezone).rule.wall_clock(instant)
    }
}

impl Default for TimeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an IANA identifier: exact match first, then case-insensitive.
/// Surrounding whitespace is ignored; blank input yields `None`.
pub fn parse_zone(timezone: &str) -> Option<Tz> {
    let trimmed = timezone.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Tz>()
        .ok()
        .or_else(|| Tz::from_str_insensitive(trimmed).ok())
}

/// True when the id names a zone of the bundled database
pub fn is_valid_timezone(timezone: &str) -> bool {
    parse_zone(timezone).is_some()
}

fn fields_of<Z: TimeZone>(local: &DateTime<Z>, zone: &'static str) -> WallClockFields {
    let nanos = local.nanosecond().min(MAX_SUBSEC_NANOS);
    WallClockFields {
        date: local.date_naive(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
        fractional_second: f64::from(nanos) / 1_000_000_000.0,
        zone,
        utc_offset_seconds: local.offset().fix().local_minus_utc(),
    }
}
