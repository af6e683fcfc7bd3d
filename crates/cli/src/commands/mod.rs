//! Command implementations.

mod info;
mod now;
mod run;
mod validate;
mod zones;

pub use info::run_info;
pub use now::run_now;
pub use run::run_clock;
pub use validate::run_validate;
pub use zones::run_zones;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use config_loader::{ClockConfig, ConfigLoader};
use time_resolver::{is_valid_timezone, TimeResolver};

use crate::cli::ClockOverrides;
use crate::error::CliError;

/// Load the config file, or the defaults when no path is given
pub(crate) fn load_config(path: Option<&Path>) -> Result<ClockConfig> {
    let Some(path) = path else {
        info!("No configuration file given, using defaults");
        return Ok(ClockConfig::default());
    };

    info!(config = %path.display(), "Loading configuration");
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()).into());
    }

    ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Apply `--timezone` / `--24h` / `--12h`
pub(crate) fn apply_clock_overrides(config: &mut ClockConfig, overrides: &ClockOverrides) {
    if let Some(ref timezone) = overrides.timezone {
        info!(timezone = %timezone, "Overriding timezone from CLI");
        config.clock.timezone = timezone.as_str().into();
    }
    if let Some(use_24h) = overrides.use_24h() {
        config.clock.use_24h = use_24h;
    }
}

/// Warning text when the configured zone will not be used as-is
pub(crate) fn timezone_warning(config: &ClockConfig, resolver: &TimeResolver) -> Option<String> {
    let timezone = &config.clock.timezone;
    if timezone.is_blank() || is_valid_timezone(timezone) {
        return None;
    }
    Some(format!(
        "Timezone '{}' is not recognised; local time ({}) will be shown",
        timezone,
        resolver.local_zone_name()
    ))
}
