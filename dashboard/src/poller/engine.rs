use chrono::Utc;
use crowdcore::occupancy::{ConnectionStatus, HistoryPoint, Sample};
use crowdcore::prelude::{AreaId, FetchResult};
use crowdcore::zones::Zone;
use futures::future;

use crate::api::ApiClient;

/// Outcome of one live polling tick across the configured areas.
#[derive(Debug)]
pub struct TickReport {
    pub samples: Vec<(AreaId, FetchResult<Sample>)>,
    pub status: ConnectionStatus,
}

/// Fan-out/fan-in poller over a fixed area set.
///
/// All requests of a tick run concurrently and the tick completes when
/// every request has settled. Results are matched back to areas by
/// position, never by arrival order, and a failed area only blanks its
/// own slot.
pub struct PollEngine {
    areas: Vec<AreaId>,
    history_limit: u32,
    history_hours: u32,
}

impl PollEngine {
    pub fn new(areas: Vec<AreaId>, history_limit: u32, history_hours: u32) -> Self {
        Self {
            areas,
            history_limit,
            history_hours,
        }
    }

    pub fn areas(&self) -> &[AreaId] {
        &self.areas
    }

    pub async fn poll_live(&self, api: &ApiClient) -> TickReport {
        let results = future::join_all(self.areas.iter().map(|&area| api.live(area))).await;

        let samples: Vec<(AreaId, FetchResult<Sample>)> = self
            .areas
            .iter()
            .zip(results)
            .map(|(&area, result)| {
                let sample = result.map(|data| Sample {
                    area,
                    live_count: data.live_people,
                    zone_counts: data.zone_counts,
                    timestamp: Utc::now(),
                });
                (area, sample)
            })
            .collect();

        let failures = samples.iter().filter(|(_, result)| result.is_err()).count();
        let status = ConnectionStatus::from_tick(samples.len() - failures, failures);
        TickReport { samples, status }
    }

    pub async fn poll_history(
        &self,
        api: &ApiClient,
    ) -> Vec<(AreaId, FetchResult<Vec<HistoryPoint>>)> {
        let results = future::join_all(
            self.areas
                .iter()
                .map(|&area| api.history(area, self.history_limit, self.history_hours)),
        )
        .await;
        self.areas.iter().copied().zip(results).collect()
    }

    /// Refresh zone lists for the given (usually cache-stale) subset.
    pub async fn poll_zones(
        &self,
        api: &ApiClient,
        areas: &[AreaId],
    ) -> Vec<(AreaId, FetchResult<Vec<Zone>>)> {
        let results = future::join_all(areas.iter().map(|&area| async move {
            let records = api.zones(area).await?;
            Ok(records.into_iter().map(Zone::from).collect::<Vec<Zone>>())
        }))
        .await;
        areas.iter().copied().zip(results).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdcore::prelude::FetchError;
    use serde_json::json;
    use warp::http::StatusCode;
    use warp::{Filter, Reply};

    fn engine() -> PollEngine {
        PollEngine::new(AreaId::ALL.to_vec(), 50, 1)
    }

    #[tokio::test]
    async fn results_are_matched_back_by_area_position() {
        // Retail fails; the other areas keep their own slots.
        let route = warp::path!("live" / String).map(|area: String| {
            if area == "retail" {
                warp::reply::with_status(
                    warp::reply::json(&json!({"error": "boom"})),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
                .into_response()
            } else {
                let count = if area == "entrance" { 11 } else { 22 };
                warp::reply::json(&json!({"live_people": count, "zone_counts": {}}))
                    .into_response()
            }
        });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let api = ApiClient::new(format!("http://{addr}"), None);
        let report = engine().poll_live(&api).await;

        assert_eq!(report.status, ConnectionStatus::Degraded);
        assert_eq!(report.samples.len(), 3);

        let (area, entrance) = &report.samples[0];
        assert_eq!(*area, AreaId::Entrance);
        assert_eq!(entrance.as_ref().unwrap().live_count, 11);

        let (area, retail) = &report.samples[1];
        assert_eq!(*area, AreaId::Retail);
        assert!(matches!(
            retail.as_ref().unwrap_err(),
            FetchError::Http { status: 500 }
        ));

        let (area, foodcourt) = &report.samples[2];
        assert_eq!(*area, AreaId::Foodcourt);
        assert_eq!(foodcourt.as_ref().unwrap().live_count, 22);
    }

    #[tokio::test]
    async fn total_failure_reports_disconnected() {
        let api = ApiClient::new("http://127.0.0.1:1", None);
        let report = engine().poll_live(&api).await;

        assert_eq!(report.status, ConnectionStatus::Disconnected);
        assert!(report.samples.iter().all(|(_, result)| result.is_err()));
    }

    #[tokio::test]
    async fn zone_refresh_converts_backend_rows() {
        let route = warp::path!("api" / "admin" / "zones" / "by-name" / String).map(
            |_area: String| {
                warp::reply::json(&json!({"zones": [
                    {"zone_id": 1, "zone_name": "Entrance Queue",
                     "coordinates": [[0, 0], [100, 0], [100, 80], [0, 80]],
                     "visible_to_users": true},
                    {"zone_id": 2,
                     "coordinates": [[200, 0], [300, 0], [300, 80], [200, 80]],
                     "visible_to_users": false},
                ]}))
            },
        );
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let api = ApiClient::new(format!("http://{addr}"), None);
        let results = engine().poll_zones(&api, &[AreaId::Entrance]).await;

        assert_eq!(results.len(), 1);
        let zones = results[0].1.as_ref().unwrap();
        assert_eq!(zones[0].name, "Entrance Queue");
        assert_eq!(zones[1].name, "Zone_2");
        assert!(!zones[1].visible_to_users);
    }
}
