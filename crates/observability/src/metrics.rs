//! 渲染循环指标收集模块
//!
//! 每帧记录 Prometheus 指标，并在内存中聚合便于输出摘要。

use contracts::DisplayState;
use metrics::{counter, gauge, histogram};

/// 从一帧的结果记录指标
///
/// 每次产生 DisplayState 时调用此函数。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_frame_metrics;
///
/// let state = compose(fields, format, frame_id);
/// record_frame_metrics(&state, zone.fell_back, lag_ms);
/// ```
pub fn record_frame_metrics(state: &DisplayState, fell_back: bool, tick_lag_ms: f64) {
    // 帧计数器
    counter!("tzclock_frames_rendered_total").increment(1);

    // 帧 ID (用于检测跳帧)
    gauge!("tzclock_last_frame_id").set(state.frame_id as f64);

    // 调度延迟
    histogram!("tzclock_tick_lag_ms").record(tick_lag_ms);

    // 时区回退
    if fell_back {
        counter!("tzclock_timezone_fallbacks_total").increment(1);
    }
    gauge!("tzclock_timezone_fallback_active").set(if fell_back { 1.0 } else { 0.0 });
}

/// 记录单个 sink 的渲染结果
pub fn record_sink_render(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "tzclock_sink_renders_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// 帧指标聚合器
///
/// 在内存中聚合指标，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct FrameMetricsAggregator {
    /// 总帧数
    pub total_frames: u64,

    /// 使用本地时区回退的帧数
    pub fallback_frames: u64,

    /// 调度延迟统计 (毫秒)
    pub tick_lag_stats: RunningStats,
}

impl FrameMetricsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, fell_back: bool, tick_lag_ms: f64) {
        self.total_frames += 1;
        if fell_back {
            self.fallback_frames += 1;
        }
        self.tick_lag_stats.push(tick_lag_ms);
    }

    /// 生成摘要报告
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_frames: self.total_frames,
            fallback_frames: self.fallback_frames,
            fallback_rate: if self.total_frames > 0 {
                self.fallback_frames as f64 / self.total_frames as f64 * 100.0
            } else {
                0.0
            },
            tick_lag_ms: StatsSummary::from(&self.tick_lag_stats),
        }
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_frames: u64,
    pub fallback_frames: u64,
    pub fallback_rate: f64,
    pub tick_lag_ms: StatsSummary,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Render Loop Summary ===")?;
        writeln!(f, "Total frames: {}", self.total_frames)?;
        writeln!(
            f,
            "Local-zone fallbacks: {} ({:.2}%)",
            self.fallback_frames, self.fallback_rate
        )?;
        writeln!(f, "Tick lag (ms): {}", self.tick_lag_ms)?;
        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 样本方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
