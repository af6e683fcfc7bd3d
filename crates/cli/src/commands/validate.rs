//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use config_loader::{ClockConfig, ConfigLoader};
use time_resolver::TimeResolver;

use super::timezone_warning;
use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    timezone: String,
    use_24h: bool,
    frame_rate_hz: f64,
    theme: String,
    sink_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args, &TimeResolver::new());

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs, resolver: &TimeResolver) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config, resolver);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    timezone: config.clock.timezone.to_string(),
                    use_24h: config.clock.use_24h,
                    frame_rate_hz: config.clock.frame_rate_hz,
                    theme: format!("{:?}", config.clock.theme),
                    sink_count: config.sinks.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &ClockConfig, resolver: &TimeResolver) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(warning) = timezone_warning(config, resolver) {
        warnings.push(warning);
    }

    let terminals = config
        .sinks
        .iter()
        .filter(|s| s.sink_type == contracts::SinkType::Terminal)
        .count();
    if terminals > 1 {
        warnings.push(format!(
            "{} terminal sinks configured - they will draw over each other",
            terminals
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            if summary.timezone.is_empty() {
                println!("  Timezone: (local)");
            } else {
                println!("  Timezone: {}", summary.timezone);
            }
            println!(
                "  Format: {}",
                if summary.use_24h { "24-hour" } else { "12-hour" }
            );
            println!("  Frame rate: {} Hz", summary.frame_rate_hz);
            println!("  Theme: {}", summary.theme);
            println!("  Sinks: {}", summary.sink_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use time_resolver::ZoneRule;

    fn validate_content(content: &str) -> ValidationResult {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tzclock.toml");
        std::fs::write(&path, content).unwrap();

        let args = ValidateArgs {
            config: path,
            json: false,
        };
        validate_config(&args, &TimeResolver::with_local(ZoneRule::SystemLocal))
    }

    #[test]
    fn test_unknown_timezone_is_warning() {
        let result = validate_content(
            r#"
[clock]
timezone = "Atlantis/Capital"
"#,
        );
        assert!(result.valid);
        let warnings = result.warnings.unwrap();
        assert!(warnings[0].contains("Atlantis/Capital"));
    }

    #[test]
    fn test_invalid_frame_rate_is_error() {
        let result = validate_content(
            r#"
[clock]
frame_rate_hz = 0.0
"#,
        );
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("frame_rate_hz"));
    }

    #[test]
    fn test_missing_file() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/tzclock.toml"),
            json: true,
        };
        let result = validate_config(&args, &TimeResolver::with_local(ZoneRule::SystemLocal));
        assert!(!result.valid);
        assert!(result.summary.is_none());
    }
}
