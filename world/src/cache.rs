//! In-memory store of departed levels.

use std::collections::BTreeMap;

use crate::level::Level;

/// Cached copy of a level together with its write count.
#[derive(Clone, Debug)]
struct CacheEntry {
    version: u32,
    level: Level,
}

/// Cache entry summary exposed to adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CachedLevel {
    /// Index of the cached level.
    pub level: u32,
    /// Number of times the level has been written.
    pub version: u32,
}

/// Level snapshots keyed by level index.
///
/// Entries own their data, so restoring hands out an independent copy and
/// the live level can never alias a cached one.
#[derive(Clone, Debug, Default)]
pub(crate) struct LevelCache {
    entries: BTreeMap<u32, CacheEntry>,
}

impl LevelCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes `level` under its index and returns the entry's new version.
    pub(crate) fn store(&mut self, level: Level) -> u32 {
        let index = level.index;
        let version = self
            .entries
            .get(&index)
            .map_or(1, |entry| entry.version.saturating_add(1));
        let _ = self.entries.insert(index, CacheEntry { version, level });
        version
    }

    /// Copy of the cached level at `index`, if one exists.
    pub(crate) fn restore(&self, index: u32) -> Option<Level> {
        self.entries.get(&index).map(|entry| entry.level.clone())
    }

    pub(crate) fn contains(&self, index: u32) -> bool {
        self.entries.contains_key(&index)
    }

    pub(crate) fn summary(&self) -> Vec<CachedLevel> {
        self.entries
            .iter()
            .map(|(level, entry)| CachedLevel {
                level: *level,
                version: entry.version,
            })
            .collect()
    }
}
