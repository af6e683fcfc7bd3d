//! # Time Resolver
//!
//! 时区换算核心。
//!
//! 负责：
//! - (instant, timezone id) -> `WallClockFields`，纯函数、无副作用
//! - 无法识别的时区一律回退到观察者本地时区，从不报错
//! - 本地时区探测、时区目录、时间源
//!
//! ## 使用示例
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use time_resolver::TimeResolver;
//!
//! let resolver = TimeResolver::new();
//! let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
//! let fields = resolver.resolve(instant, "Asia/Tokyo");
//! assert_eq!(fields.hour, 21);
//! ```

pub mod catalog;
mod local;
mod resolver;
mod source;

pub use catalog::{ZoneCatalog, ZoneEntry, COMMON_ZONES};
pub use local::{detect_local_zone, detect_local_zone_from, LOCAL_ZONE_NAME};
pub use resolver::{is_valid_timezone, parse_zone, ResolvedZone, TimeResolver, ZoneRule};
pub use source::{ManualInstantSource, SystemInstantSource};

pub use contracts::{InstantSource, TimezoneId, WallClockFields};
