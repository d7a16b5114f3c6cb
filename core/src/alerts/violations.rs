use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded threshold violation from the backend history feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub id: u64,
    pub area_name: String,
    pub people_count: u32,
    pub threshold: u32,
    pub violation_time: DateTime<Utc>,
    #[serde(default)]
    pub zone_details: String,
}

impl ViolationRecord {
    pub fn exceeded_by(&self) -> i64 {
        i64::from(self.people_count) - i64::from(self.threshold)
    }
}
