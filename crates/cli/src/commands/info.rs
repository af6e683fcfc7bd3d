//! `info` command implementation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use config_loader::ClockConfig;
use time_resolver::{is_valid_timezone, TimeResolver};

use super::load_config;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    clock: ClockInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sinks: Vec<SinkInfo>,
}

#[derive(Serialize)]
struct ClockInfo {
    timezone: String,
    effective_timezone: String,
    timezone_known: bool,
    use_24h: bool,
    frame_rate_hz: f64,
    frame_interval_ms: f64,
    theme: String,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let info = build_config_info(&config, &TimeResolver::new(), args.sinks);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn build_config_info(config: &ClockConfig, resolver: &TimeResolver, with_sinks: bool) -> ConfigInfo {
    let resolved = resolver.resolve_zone(&config.clock.timezone);

    let sinks = if with_sinks {
        config
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
                params: s.params.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", config.version),
        clock: ClockInfo {
            timezone: config.clock.timezone.to_string(),
            effective_timezone: resolved.rule.name().to_string(),
            timezone_known: is_valid_timezone(&config.clock.timezone),
            use_24h: config.clock.use_24h,
            frame_rate_hz: config.clock.frame_rate_hz,
            frame_interval_ms: config.frame_interval().as_secs_f64() * 1000.0,
            theme: format!("{:?}", config.clock.theme),
        },
        sinks,
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                   tzclock Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let clock = &info.clock;
    println!("🕒 Clock");
    println!("   ├─ Version: {}", info.version);
    if clock.timezone.is_empty() {
        println!("   ├─ Timezone: (local) → {}", clock.effective_timezone);
    } else if clock.timezone_known {
        println!("   ├─ Timezone: {}", clock.timezone);
    } else {
        println!(
            "   ├─ Timezone: {} (unknown, falls back to {})",
            clock.timezone, clock.effective_timezone
        );
    }
    println!(
        "   ├─ Format: {}",
        if clock.use_24h { "24-hour" } else { "12-hour" }
    );
    println!(
        "   ├─ Frame rate: {} Hz ({:.2} ms/frame)",
        clock.frame_rate_hz, clock.frame_interval_ms
    );
    println!("   └─ Theme: {}", clock.theme);

    if !info.sinks.is_empty() {
        println!("\n📤 Sinks ({})", info.sinks.len());
        for (i, sink) in info.sinks.iter().enumerate() {
            let is_last = i == info.sinks.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            let child_prefix = if is_last { "   " } else { "│  " };
            println!("   {} {} ({})", prefix, sink.name, sink.sink_type);
            for (key, value) in &sink.params {
                println!("   {}  {} = {}", child_prefix, key, value);
            }
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use time_resolver::ZoneRule;

    #[test]
    fn test_build_info_with_sinks() {
        let mut config = ClockConfig::default();
        config.clock.timezone = "Europe/Moscow".into();
        config.clock.frame_rate_hz = 50.0;
        config.sinks[0].params.insert("radius".into(), "6".into());

        let resolver = TimeResolver::with_local(ZoneRule::SystemLocal);
        let info = build_config_info(&config, &resolver, true);
        assert_eq!(info.clock.effective_timezone, "Europe/Moscow");
        assert!(info.clock.timezone_known);
        assert!((info.clock.frame_interval_ms - 20.0).abs() < 1e-9);
        assert_eq!(info.sinks.len(), 1);
        assert_eq!(info.sinks[0].params["radius"], "6");

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["clock"]["theme"], "System");
    }

    #[test]
    fn test_build_info_blank_timezone() {
        let config = ClockConfig::default();
        let resolver = TimeResolver::with_local(ZoneRule::SystemLocal);
        let info = build_config_info(&config, &resolver, false);
        assert_eq!(info.clock.effective_timezone, "Local");
        assert!(!info.clock.timezone_known);
        assert!(info.sinks.is_empty());
    }
}
