//! 时区目录
//!
//! 常用时区排在最前，其后是内置 IANA 数据库中的全部时区（去重，保持首次出现顺序）。
//! 观察者本地时区一定出现在目录中，并被标记为默认项。

use std::collections::HashSet;

use chrono_tz::TZ_VARIANTS;
use serde::Serialize;

/// 常用时区 (优先展示)
pub const COMMON_ZONES: [&str; 10] = [
    "Asia/Shanghai",
    "Asia/Hong_Kong",
    "Asia/Tokyo",
    "Asia/Bangkok",
    "Europe/Moscow",
    "Europe/London",
    "Europe/Paris",
    "America/Los_Angeles",
    "America/New_York",
    "UTC",
];

/// 目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneEntry {
    /// 时区标识符
    pub id: String,
    /// 是否为观察者本地时区 (默认选中)
    pub is_local: bool,
}

/// 可供选择的时区列表
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    entries: Vec<ZoneEntry>,
}

impl ZoneCatalog {
    /// 构建目录
    ///
    /// `local_zone` 为观察者本地时区名；若不在数据库中 (例如 "Local")，追加到末尾。
    pub fn build(local_zone: &str) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(COMMON_ZONES.len() + TZ_VARIANTS.len() + 1);

        let names = COMMON_ZONES
            .iter()
            .copied()
            .chain(TZ_VARIANTS.iter().map(|tz| tz.name()));

        for name in names {
            if seen.insert(name) {
                entries.push(ZoneEntry {
                    id: name.to_string(),
                    is_local: name == local_zone,
                });
            }
        }

        if !seen.contains(local_zone) {
            entries.push(ZoneEntry {
                id: local_zone.to_string(),
                is_local: true,
            });
        }

        Self { entries }
    }

    /// 全部条目 (按展示顺序)
    pub fn entries(&self) -> &[ZoneEntry] {
        &self.entries
    }

    /// 默认选中条目 (本地时区)
    pub fn default_entry(&self) -> Option<&ZoneEntry> {
        self.entries.iter().find(|e| e.is_local)
    }

    /// 按子串过滤 (不区分大小写)
    pub fn filter<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a ZoneEntry> + 'a {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.id.to_lowercase().contains(&needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
