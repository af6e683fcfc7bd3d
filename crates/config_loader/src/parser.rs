//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON (可选) 格式。

use contracts::{ClockConfig, ContractError};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 解析 TOML 格式配置
pub fn parse_toml(content: &str) -> Result<ClockConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 JSON 格式配置
pub fn parse_json(content: &str) -> Result<ClockConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 根据格式解析配置
pub fn parse(content: &str, format: ConfigFormat) -> Result<ClockConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{HourFormat, SinkType, Theme};

    #[test]
    fn test_parse_toml_full() {
        let content = r#"
version = "V1"

[clock]
timezone = "Asia/Tokyo"
use_24h = false
frame_rate_hz = 30.0
theme = "dark"

[[sinks]]
name = "terminal"
sink_type = "terminal"

[[sinks]]
name = "frames"
sink_type = "file"
[sinks.params]
path = "./frames.jsonl"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.clock.timezone, "Asia/Tokyo");
        assert_eq!(config.settings().hour_format, HourFormat::Twelve);
        assert_eq!(config.clock.frame_rate_hz, 30.0);
        assert_eq!(config.clock.theme, Theme::Dark);
        assert_eq!(config.sinks.len(), 2);
        assert_eq!(config.sinks[1].sink_type, SinkType::File);
        assert_eq!(config.sinks[1].params["path"], "./frames.jsonl");
    }

    #[test]
    fn test_parse_toml_empty_uses_defaults() {
        let config = parse_toml("").unwrap();
        assert!(config.clock.timezone.is_blank());
        assert!(config.clock.use_24h);
        assert_eq!(config.sinks[0].sink_type, SinkType::Terminal);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "clock": { "timezone": "Europe/London", "frame_rate_hz": 10.0 },
            "sinks": [{ "name": "log", "sink_type": "log", "params": { "every": "10" } }]
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        assert_eq!(result.unwrap().sinks[0].params["every"], "10");
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_unknown_sink_type() {
        let content = r#"
[[sinks]]
name = "net"
sink_type = "network"
"#;
        assert!(matches!(
            parse_toml(content),
            Err(ContractError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
