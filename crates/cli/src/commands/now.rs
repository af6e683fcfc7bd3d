//! `now` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;

use contracts::DisplayState;
use render_loop::compose;
use time_resolver::{InstantSource, SystemInstantSource, TimeResolver};

use super::{apply_clock_overrides, load_config, timezone_warning};
use crate::cli::NowArgs;

/// One resolved reading for JSON output
#[derive(Serialize)]
struct NowOutput {
    #[serde(flatten)]
    state: DisplayState,
    requested_timezone: String,
    fell_back: bool,
    utc_offset_seconds: i32,
    instant_utc: String,
}

/// Execute the `now` command
pub fn run_now(args: &NowArgs) -> Result<()> {
    let mut config = load_config(args.clock.config.as_deref())?;
    apply_clock_overrides(&mut config, &args.clock);

    let resolver = TimeResolver::new();
    let output = resolve_now(&resolver, &SystemInstantSource, &config);

    if args.json {
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize reading")?;
        println!("{}", json);
    } else {
        if let Some(warning) = timezone_warning(&config, &resolver) {
            eprintln!("⚠ {}", warning);
        }
        print_reading(&output);
    }

    Ok(())
}

fn resolve_now(
    resolver: &TimeResolver,
    source: &dyn InstantSource,
    config: &config_loader::ClockConfig,
) -> NowOutput {
    let settings = config.settings();
    let instant = source.now();
    let zone = resolver.resolve_zone(&settings.timezone);
    let fields = zone.rule.wall_clock(instant);

    NowOutput {
        state: compose(&fields, settings.hour_format, 0),
        requested_timezone: settings.timezone.to_string(),
        fell_back: zone.fell_back,
        utc_offset_seconds: fields.utc_offset_seconds,
        instant_utc: instant.to_rfc3339(),
    }
}

fn print_reading(output: &NowOutput) {
    let state = &output.state;
    let offset = output.utc_offset_seconds;
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.unsigned_abs();

    println!("{}", state.digital_text);
    println!("{}", state.date_text);
    println!(
        "{} (UTC{}{:02}:{:02})",
        state.zone,
        sign,
        offset / 3600,
        offset % 3600 / 60
    );
    println!(
        "hands: hour {:.2}°, minute {:.2}°, second {:.2}°",
        state.hour_angle_deg, state.minute_angle_deg, state.second_angle_deg
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use config_loader::ClockConfig;
    use time_resolver::{ManualInstantSource, ZoneRule};

    #[test]
    fn test_resolve_now_in_target_zone() {
        let resolver = TimeResolver::with_local(ZoneRule::SystemLocal);
        let source =
            ManualInstantSource::new(Utc.with_ymd_and_hms(2024, 7, 4, 16, 0, 0).unwrap());
        let mut config = ClockConfig::default();
        config.clock.timezone = "America/New_York".into();
        config.clock.use_24h = false;

        let output = resolve_now(&resolver, &source, &config);
        assert_eq!(output.state.digital_text, "12:00:00 PM");
        assert_eq!(output.state.date_text, "2024年7月4日星期四");
        assert_eq!(output.utc_offset_seconds, -4 * 3600);
        assert!(!output.fell_back);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["zone"], "America/New_York");
        assert_eq!(json["fell_back"], false);
    }

    #[test]
    fn test_resolve_now_falls_back() {
        let resolver = TimeResolver::with_local(ZoneRule::SystemLocal);
        let source = ManualInstantSource::new(Utc::now());
        let mut config = ClockConfig::default();
        config.clock.timezone = "Nowhere/Special".into();

        let output = resolve_now(&resolver, &source, &config);
        assert!(output.fell_back);
        assert_eq!(output.state.zone, "Local");
        assert_eq!(output.requested_timezone, "Nowhere/Special");
    }
}
