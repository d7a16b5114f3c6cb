use crowdcore::alerts::ViolationRecord;
use crowdcore::occupancy::HistoryPoint;
use crowdcore::prelude::{AreaId, FetchError, FetchResult};
use crowdcore::zones::{ZoneRecord, ZoneWire};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::types::{
    AreaRecord, AreasResponse, CameraPayload, CameraRecord, CamerasResponse, HistoryResponse,
    LiveData, SaveZonesRequest, SaveZonesResponse, StatsResponse, ThresholdResponse,
    ThresholdUpdate, UserPayload, UserRecord, UsersResponse, ViolationsResponse,
    VisibilityRequest, ZonesResponse,
};

/// HTTP client for the occupancy backend.
///
/// The bearer credential is obtained once at session start and attached
/// to every request. All failures are folded into the `FetchError`
/// taxonomy; callers downgrade them to per-area "no data" outcomes and
/// rely on the next scheduled tick as the only retry.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// CSV export is a plain backend-generated download link.
    pub fn csv_export_url(&self, area: AreaId) -> String {
        format!("{}/api/export/csv/{}", self.base_url, area)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> FetchResult<Response> {
        request
            .send()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> FetchResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|error| FetchError::Decode(error.to_string()))
    }

    fn expect_ok(response: Response) -> FetchResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Http {
                status: status.as_u16(),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let response = Self::send(self.authed(self.http.get(self.url(path)))).await?;
        Self::decode(response).await
    }

    // Live and historical series -------------------------------------

    pub async fn live(&self, area: AreaId) -> FetchResult<LiveData> {
        self.get_json(&format!("live/{area}")).await
    }

    pub async fn history(
        &self,
        area: AreaId,
        limit: u32,
        hours: u32,
    ) -> FetchResult<Vec<HistoryPoint>> {
        let request = self
            .http
            .get(self.url(&format!("api/history/{area}")))
            .query(&[("limit", limit), ("hours", hours)]);
        let response = Self::send(self.authed(request)).await?;
        let payload: HistoryResponse = Self::decode(response).await?;
        Ok(payload.history)
    }

    pub async fn area_stats(&self, area: AreaId) -> FetchResult<StatsResponse> {
        self.get_json(&format!("api/history/stats/{area}")).await
    }

    // Zones ----------------------------------------------------------

    pub async fn zones(&self, area: AreaId) -> FetchResult<Vec<ZoneRecord>> {
        let payload: ZonesResponse = self
            .get_json(&format!("api/admin/zones/by-name/{area}"))
            .await?;
        Ok(payload.zones)
    }

    pub async fn save_zones(&self, area: AreaId, zones: &[ZoneWire]) -> FetchResult<u32> {
        let request = self
            .http
            .post(self.url(&format!("api/admin/zones/by-name/{area}")))
            .json(&SaveZonesRequest { zones });
        let response = Self::send(self.authed(request)).await?;
        let payload: SaveZonesResponse = Self::decode(response).await?;
        Ok(payload.zones_saved)
    }

    pub async fn set_zone_visibility(
        &self,
        area: AreaId,
        zone_id: u32,
        visible: bool,
    ) -> FetchResult<()> {
        let request = self
            .http
            .put(self.url(&format!(
                "api/admin/zones/by-name/{area}/{zone_id}/visibility"
            )))
            .json(&VisibilityRequest {
                visible_to_users: visible,
            });
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn delete_zone(&self, area: AreaId, zone_id: u32) -> FetchResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("api/admin/zones/by-name/{area}/{zone_id}")));
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    // Threshold ------------------------------------------------------

    pub async fn threshold(&self) -> FetchResult<ThresholdResponse> {
        self.get_json("api/live/threshold").await
    }

    pub async fn set_threshold(&self, threshold: u32) -> FetchResult<()> {
        let request = self
            .http
            .post(self.url("api/admin/threshold"))
            .json(&ThresholdUpdate { threshold });
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn violations(&self, limit: u32) -> FetchResult<Vec<ViolationRecord>> {
        let request = self
            .http
            .get(self.url("api/live/threshold/history"))
            .query(&[("limit", limit)]);
        let response = Self::send(self.authed(request)).await?;
        let payload: ViolationsResponse = Self::decode(response).await?;
        Ok(payload.violations)
    }

    // Areas, users, cameras ------------------------------------------

    pub async fn user_areas(&self) -> FetchResult<Vec<AreaRecord>> {
        let payload: AreasResponse = self.get_json("api/live/areas").await?;
        Ok(payload.areas)
    }

    pub async fn users(&self) -> FetchResult<Vec<UserRecord>> {
        let payload: UsersResponse = self.get_json("api/admin/users").await?;
        Ok(payload.users)
    }

    pub async fn create_user(&self, user: &UserPayload) -> FetchResult<()> {
        let request = self.http.post(self.url("api/admin/users")).json(user);
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn update_user(&self, user_id: u32, user: &UserPayload) -> FetchResult<()> {
        let request = self
            .http
            .put(self.url(&format!("api/admin/users/{user_id}")))
            .json(user);
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn delete_user(&self, user_id: u32) -> FetchResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("api/admin/users/{user_id}")));
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn cameras(&self) -> FetchResult<Vec<CameraRecord>> {
        let payload: CamerasResponse = self.get_json("api/admin/cameras").await?;
        Ok(payload.cameras)
    }

    pub async fn create_camera(&self, camera: &CameraPayload) -> FetchResult<()> {
        let request = self.http.post(self.url("api/admin/cameras")).json(camera);
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn update_camera(&self, area_id: u32, camera: &CameraPayload) -> FetchResult<()> {
        let request = self
            .http
            .put(self.url(&format!("api/admin/cameras/{area_id}")))
            .json(camera);
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn delete_camera(&self, area_id: u32) -> FetchResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("api/admin/cameras/{area_id}")));
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }

    pub async fn set_camera_visibility(&self, area_id: u32, visible: bool) -> FetchResult<()> {
        let request = self
            .http
            .put(self.url(&format!("api/admin/cameras/{area_id}/visibility")))
            .json(&VisibilityRequest {
                visible_to_users: visible,
            });
        Self::expect_ok(Self::send(self.authed(request)).await?)
    }
}
