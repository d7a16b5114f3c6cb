use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prelude::AreaId;

/// Live per-area reading produced once per polling tick.
///
/// `zone_counts` is keyed by the backend's zone id, kept as a string so
/// arbitrary ids survive the trip through JSON object keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub area: AreaId,
    pub live_count: u32,
    pub zone_counts: BTreeMap<String, u32>,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn zone_total(&self) -> u32 {
        self.zone_counts.values().sum()
    }
}

/// One point of an area's historical series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub recorded_at: DateTime<Utc>,
    pub total_count: u32,
}

/// Statistical summary of an area over the backend's rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaStats {
    pub average: f64,
    pub maximum: u32,
    pub minimum: u32,
    pub records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_total_sums_all_zone_counts() {
        let sample = Sample {
            area: AreaId::Retail,
            live_count: 12,
            zone_counts: BTreeMap::from([("1".to_string(), 5), ("2".to_string(), 7)]),
            timestamp: Utc::now(),
        };
        assert_eq!(sample.zone_total(), 12);
    }
}
