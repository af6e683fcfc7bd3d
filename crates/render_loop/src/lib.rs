//! # Render Loop
//!
//! 逐帧渲染模块。
//!
//! 负责：
//! - 每帧读取当前时刻与设置快照，调用 `TimeResolver`
//! - 由同一组 `WallClockFields` 派生指针角度、数字时间和本地化日期
//! - 依次推送 `DisplayState` 到各个 sink
//! - 通过 `LoopHandle` 取消，取消后不再有任何推送

pub mod derive;
pub mod dial;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod runner;
pub mod sinks;
mod slot;

pub use contracts::{ClockSettings, DisplaySink, DisplayState, HourFormat, WallClockFields};
pub use derive::{compose, date_text, digital_text, hand_angles, HandAngles};
pub use dial::{Dial, Tick, TickRing};
pub use error::RenderLoopError;
pub use handle::{cancel_channel, CancelSender, CancelToken, LoopHandle, LoopReport};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use runner::{create_render_loop, Frame, RenderLoop, RenderLoopBuilder, RenderLoopConfig};
pub use sinks::{
    ConfiguredSink, FileSink, FileSinkConfig, LogSink, MemorySink, RecordedFrames, TerminalSink,
};
