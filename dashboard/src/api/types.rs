//! Typed request/response schemas for the backend endpoints.
//!
//! Every payload is decoded into an explicit shape; a mismatch surfaces
//! as `FetchError::Decode` instead of silently defaulting fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use crowdcore::alerts::ViolationRecord;
use crowdcore::occupancy::{AreaStats, HistoryPoint};
use crowdcore::zones::{ZoneRecord, ZoneWire};
use serde::{Deserialize, Serialize};

/// Live metrics payload for one area.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveData {
    pub live_people: u32,
    pub zone_counts: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryPoint>,
}

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub area: String,
    pub stats: AreaStats,
}

#[derive(Debug, Deserialize)]
pub struct ZonesResponse {
    pub zones: Vec<ZoneRecord>,
}

#[derive(Debug, Serialize)]
pub struct SaveZonesRequest<'a> {
    pub zones: &'a [ZoneWire],
}

#[derive(Debug, Deserialize)]
pub struct SaveZonesResponse {
    pub zones_saved: u32,
}

#[derive(Debug, Serialize)]
pub struct VisibilityRequest {
    pub visible_to_users: bool,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdResponse {
    pub global_threshold: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ThresholdUpdate {
    pub threshold: u32,
}

#[derive(Debug, Deserialize)]
pub struct ViolationsResponse {
    pub violations: Vec<ViolationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AreasResponse {
    pub areas: Vec<AreaRecord>,
}

/// One area row from the assigned-areas endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaRecord {
    pub area_id: u32,
    pub area_name: String,
    #[serde(default)]
    pub video_source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub areas: Vec<String>,
}

/// Create/update body for the users endpoint.
///
/// The password is required for new accounts and optional on updates, so
/// it is omitted from the body entirely when absent.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub role: String,
    pub areas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CamerasResponse {
    pub cameras: Vec<CameraRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraRecord {
    pub area_id: u32,
    pub area_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub video_source: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default = "visible_default")]
    pub visible_to_users: bool,
    #[serde(default)]
    pub zone_count: u32,
}

fn visible_default() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct CameraPayload {
    pub area_name: String,
    pub display_name: String,
    pub video_source: String,
    pub model_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_payload_requires_both_fields() {
        let ok: LiveData =
            serde_json::from_str(r#"{"live_people": 7, "zone_counts": {"1": 3}}"#).unwrap();
        assert_eq!(ok.live_people, 7);

        // A missing field is a decode failure, not a silent default.
        assert!(serde_json::from_str::<LiveData>(r#"{"live_people": 7}"#).is_err());
    }

    #[test]
    fn user_payload_omits_absent_password() {
        let payload = UserPayload {
            name: "Dana".into(),
            email: "dana@example.com".into(),
            role: "user".into(),
            areas: vec!["entrance".into()],
            password: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("password").is_none());
    }
}
