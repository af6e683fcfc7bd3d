//! Observer local zone detection
//!
//! Order: `TZ` environment variable (if it names an IANA zone), then the
//! operating system zone name, then the bare system local offset.

use tracing::debug;

use crate::resolver::{parse_zone, ZoneRule};

/// Name reported when only the system offset is known
pub const LOCAL_ZONE_NAME: &str = "Local";

/// Detect the observer's zone from the process environment
pub fn detect_local_zone() -> ZoneRule {
    let tz_env = std::env::var("TZ").ok();
    let system = match iana_time_zone::get_timezone() {
        Ok(name) => Some(name),
        Err(e) => {
            debug!(error = %e, "System timezone name unavailable");
            None
        }
    };
    detect_local_zone_from(tz_env.as_deref(), system.as_deref())
}

/// Pick the observer's zone from explicit candidates
pub fn detect_local_zone_from(tz_env: Option<&str>, system: Option<&str>) -> ZoneRule {
    // POSIX allows a leading ':' before a zone file name
    if let Some(tz) = tz_env.map(|v| v.trim_start_matches(':')).and_then(parse_zone) {
        return ZoneRule::Named(tz);
    }

    if let Some(name) = system {
        match parse_zone(name) {
            Some(tz) => return ZoneRule::Named(tz),
            None => debug!(zone = name, "System timezone not in bundled database"),
        }
    }

    ZoneRule::SystemLocal
}
