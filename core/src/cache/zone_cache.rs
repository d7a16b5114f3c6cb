use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::prelude::AreaId;
use crate::zones::Zone;

/// Default freshness window for cached zone lists.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

#[derive(Debug)]
struct CacheEntry {
    zones: Vec<Zone>,
    fetched_at: Instant,
}

/// Time-boxed cache over per-area zone lists.
///
/// An entry is valid only while younger than the TTL. Mutations must call
/// `invalidate` rather than waiting for expiry, so a read issued right
/// after a write always refetches (local read-after-write consistency;
/// nothing is promised across clients).
#[derive(Debug)]
pub struct ZoneCache {
    ttl: Duration,
    entries: HashMap<AreaId, CacheEntry>,
}

impl ZoneCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// The cached list, if an entry exists and is still fresh.
    pub fn fresh(&self, area: AreaId, now: Instant) -> Option<&[Zone]> {
        let entry = self.entries.get(&area)?;
        if now.duration_since(entry.fetched_at) < self.ttl {
            Some(&entry.zones)
        } else {
            None
        }
    }

    pub fn store(&mut self, area: AreaId, zones: Vec<Zone>, now: Instant) {
        self.entries.insert(
            area,
            CacheEntry {
                zones,
                fetched_at: now,
            },
        );
    }

    /// Drop an area's entry entirely, forcing the next read to refetch.
    pub fn invalidate(&mut self, area: AreaId) -> bool {
        self.entries.remove(&area).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ZoneCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
