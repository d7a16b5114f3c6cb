use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alerts::ViolationRecord;
use crate::occupancy::{ConnectionStatus, HistoryPoint, OccupancyLevel, Sample};
use crate::zones::Zone;

/// Monitored area identifiers, a fixed closed set configured at deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AreaId {
    Entrance,
    Retail,
    Foodcourt,
}

impl AreaId {
    pub const ALL: [AreaId; 3] = [AreaId::Entrance, AreaId::Retail, AreaId::Foodcourt];

    /// Wire name used in backend routes and payload keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaId::Entrance => "entrance",
            AreaId::Retail => "retail",
            AreaId::Foodcourt => "foodcourt",
        }
    }

    /// Human-facing label shown on dashboards.
    pub fn display_name(&self) -> &'static str {
        match self {
            AreaId::Entrance => "Mall Entrance",
            AreaId::Retail => "Retail Area",
            AreaId::Foodcourt => "Food Court",
        }
    }

    pub fn from_name(name: &str) -> Option<AreaId> {
        AreaId::ALL.iter().copied().find(|area| area.as_str() == name)
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy for backend calls.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("http status {status}")]
    Http { status: u16 },
    #[error("malformed payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// An expired bearer token means "skip this cycle", not a hard failure.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, FetchError::Http { status: 401 })
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Edge-triggered outcome of one threshold evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTransition {
    None,
    Raised,
    Cleared,
}

/// Seam between the polling core and whatever renders it.
///
/// Chart, DOM, and canvas concerns live entirely behind this trait; the
/// core only publishes typed per-tick results.
pub trait ViewBridge {
    fn publish_live(&mut self, sample: &Sample, level: OccupancyLevel);
    fn publish_alert(&mut self, area: AreaId, transition: AlertTransition, count: u32, threshold: u32);
    fn publish_history(&mut self, area: AreaId, points: &[HistoryPoint]);
    fn publish_status(&mut self, status: ConnectionStatus);
    fn publish_zones(&mut self, area: AreaId, zones: &[Zone]);
    fn publish_violations(&mut self, records: &[ViolationRecord]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_names_round_trip() {
        for area in AreaId::ALL {
            assert_eq!(AreaId::from_name(area.as_str()), Some(area));
        }
        assert_eq!(AreaId::from_name("parking"), None);
    }

    #[test]
    fn only_401_counts_as_expired_auth() {
        assert!(FetchError::Http { status: 401 }.is_auth_expired());
        assert!(!FetchError::Http { status: 500 }.is_auth_expired());
        assert!(!FetchError::Network("reset".into()).is_auth_expired());
    }
}
