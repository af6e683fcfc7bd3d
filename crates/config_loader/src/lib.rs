//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a `ClockConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("tzclock.toml")).unwrap();
//! println!("Timezone: {}", config.clock.timezone);
//! ```

mod parser;
mod validator;

pub use contracts::ClockConfig;
pub use parser::ConfigFormat;
pub use validator::MAX_FRAME_RATE_HZ;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ClockConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<ClockConfig, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate a configuration built in code (e.g. after CLI overrides)
    pub fn validate(config: &ClockConfig) -> Result<(), ContractError> {
        validator::validate(config)
    }

    /// Serialize ClockConfig to TOML string
    pub fn to_toml(config: &ClockConfig) -> Result<String, ContractError> {
        toml::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize ClockConfig to JSON string
    pub fn to_json(config: &ClockConfig) -> Result<String, ContractError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }

    /// Infer configuration format from file extension
    pub fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }
}

impl ConfigLoader {
    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(content: &str, format: ConfigFormat) -> Result<ClockConfig, ContractError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SinkType;
    use std::path::PathBuf;

    const MINIMAL_TOML: &str = r#"
[clock]
timezone = "America/New_York"
frame_rate_hz = 30.0

[[sinks]]
name = "log_sink"
sink_type = "log"
[sinks.params]
every = "30"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.clock.timezone, "America/New_York");
        assert_eq!(config.sinks[0].sink_type, SinkType::Log);
    }

    #[test]
    fn test_round_trip_toml() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&config).unwrap();
        let config2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(config.clock.timezone, config2.clock.timezone);
        assert_eq!(config.clock.frame_rate_hz, config2.clock.frame_rate_hz);
        assert_eq!(config.sinks[0].params, config2.sinks[0].params);
    }

    #[test]
    fn test_round_trip_json() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&config).unwrap();
        let config2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(config.clock.timezone, config2.clock.timezone);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[clock]
frame_rate_hz = 500.0
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("frame_rate_hz"));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tzclock.toml");
        std::fs::write(&path, MINIMAL_TOML).unwrap();

        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.clock.frame_rate_hz, 30.0);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            ConfigLoader::detect_format(&PathBuf::from("a.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigLoader::detect_format(&PathBuf::from("a.yaml")).is_err());
        assert!(ConfigLoader::detect_format(&PathBuf::from("tzclock")).is_err());
    }
}
