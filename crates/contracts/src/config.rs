//! ClockConfig - Config Loader 输出
//!
//! 描述完整的时钟配置：目标时区、小时制、帧率、主题、输出路由。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::{ClockSettings, HourFormat, Theme, TimezoneId};

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的时钟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 时钟设置
    #[serde(default)]
    pub clock: ClockSection,

    /// 输出路由配置
    #[serde(default = "default_sinks")]
    pub sinks: Vec<SinkConfig>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            version: ConfigVersion::V1,
            clock: ClockSection::default(),
            sinks: default_sinks(),
        }
    }
}

impl ClockConfig {
    /// 初始设置快照
    pub fn settings(&self) -> ClockSettings {
        ClockSettings {
            timezone: self.clock.timezone.clone(),
            hour_format: HourFormat::from_24h_flag(self.clock.use_24h),
        }
    }

    /// 帧间隔 (由 frame_rate_hz 换算)
    ///
    /// 调用前应已通过校验 (frame_rate_hz > 0)。
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.clock.frame_rate_hz)
    }
}

/// 时钟设置：时区、小时制、帧率、主题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSection {
    /// 目标时区 (IANA 名称)，为空表示使用本地时区
    #[serde(default)]
    pub timezone: TimezoneId,

    /// 是否使用 24 小时制
    #[serde(default = "default_use_24h")]
    pub use_24h: bool,

    /// 渲染帧率 (Hz)，必须在 (0, 240] 之内
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: f64,

    /// 主题覆盖
    #[serde(default)]
    pub theme: Theme,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            timezone: TimezoneId::default(),
            use_24h: default_use_24h(),
            frame_rate_hz: default_frame_rate_hz(),
            theme: Theme::System,
        }
    }
}

fn default_use_24h() -> bool {
    true
}

fn default_frame_rate_hz() -> f64 {
    60.0
}

fn default_sinks() -> Vec<SinkConfig> {
    vec![SinkConfig {
        name: "terminal".to_string(),
        sink_type: SinkType::Terminal,
        params: HashMap::new(),
    }]
}

/// Sink 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink 名称
    pub name: String,

    /// Sink 类型
    pub sink_type: SinkType,

    /// 类型特定参数
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// 日志输出
    Log,
    /// 文件输出 (JSON lines)
    File,
    /// 终端表盘
    Terminal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClockConfig::default();
        assert!(config.clock.timezone.is_blank());
        assert!(config.clock.use_24h);
        assert_eq!(config.clock.frame_rate_hz, 60.0);
        assert_eq!(config.sinks.len(), 1);
        assert_eq!(config.sinks[0].sink_type, SinkType::Terminal);
    }

    #[test]
    fn test_frame_interval() {
        let mut config = ClockConfig::default();
        config.clock.frame_rate_hz = 50.0;
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_settings_snapshot() {
        let mut config = ClockConfig::default();
        config.clock.timezone = "Asia/Tokyo".into();
        config.clock.use_24h = false;
        let settings = config.settings();
        assert_eq!(settings.timezone, "Asia/Tokyo");
        assert_eq!(settings.hour_format, HourFormat::Twelve);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: ClockConfig =
            serde_json::from_str(r#"{ "clock": { "timezone": "UTC" } }"#).unwrap();
        assert_eq!(config.clock.timezone, "UTC");
        assert!(config.clock.use_24h);
        assert_eq!(config.sinks[0].name, "terminal");
    }
}
