//! 配置校验模块
//!
//! 校验规则：
//! - frame_rate_hz 在 (0, 240] 之内
//! - 至少一个 sink
//! - sink 名称非空且唯一
//! - sink 参数格式合法 (log.every / file.path / terminal.radius)
//!
//! 未知时区不在此校验：运行时会回退到本地时区。

use std::collections::HashSet;

use contracts::{ClockConfig, ContractError, SinkConfig, SinkType};

/// 帧率上限 (Hz)
pub const MAX_FRAME_RATE_HZ: f64 = 240.0;

/// 终端表盘半径范围
const RADIUS_RANGE: std::ops::RangeInclusive<usize> = 2..=40;

/// 校验 ClockConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &ClockConfig) -> Result<(), ContractError> {
    validate_frame_rate(config)?;
    validate_sink_names(config)?;
    for (idx, sink) in config.sinks.iter().enumerate() {
        validate_sink_params(idx, sink)?;
    }
    Ok(())
}

/// 校验帧率
fn validate_frame_rate(config: &ClockConfig) -> Result<(), ContractError> {
    let hz = config.clock.frame_rate_hz;
    if !hz.is_finite() || hz <= 0.0 || hz > MAX_FRAME_RATE_HZ {
        return Err(ContractError::config_validation(
            "clock.frame_rate_hz",
            format!("frame_rate_hz must be in (0, {MAX_FRAME_RATE_HZ}], got {hz}"),
        ));
    }
    Ok(())
}

/// 校验 sink 名称：非空、唯一
fn validate_sink_names(config: &ClockConfig) -> Result<(), ContractError> {
    if config.sinks.is_empty() {
        return Err(ContractError::config_validation(
            "sinks",
            "at least one sink is required",
        ));
    }

    let mut seen = HashSet::new();
    for (idx, sink) in config.sinks.iter().enumerate() {
        if sink.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("sinks[{}].name", idx),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}

/// 校验 sink 类型特定参数
fn validate_sink_params(idx: usize, sink: &SinkConfig) -> Result<(), ContractError> {
    match sink.sink_type {
        SinkType::Log => {
            if let Some(every) = sink.params.get("every") {
                let ok = every.trim().parse::<u64>().is_ok_and(|n| n > 0);
                if !ok {
                    return Err(ContractError::config_validation(
                        format!("sinks[{}].params.every", idx),
                        format!("every must be a positive integer, got '{every}'"),
                    ));
                }
            }
        }
        SinkType::File => {
            if sink.params.get("path").is_some_and(|p| p.trim().is_empty()) {
                return Err(ContractError::config_validation(
                    format!("sinks[{}].params.path", idx),
                    "path cannot be empty",
                ));
            }
        }
        SinkType::Terminal => {
            if let Some(radius) = sink.params.get("radius") {
                let ok = radius
                    .trim()
                    .parse::<usize>()
                    .is_ok_and(|r| RADIUS_RANGE.contains(&r));
                if !ok {
                    return Err(ContractError::config_validation(
                        format!("sinks[{}].params.radius", idx),
                        format!(
                            "radius must be an integer in {}..={}, got '{radius}'",
                            RADIUS_RANGE.start(),
                            RADIUS_RANGE.end()
                        ),
                    ));
                }
            }
        }
    }
    Ok(())
}
