use std::time::Instant;

use anyhow::Context;
use crowdcore::alerts::{AlertBanner, ThresholdDetector};
use crowdcore::cache::ZoneCache;
use crowdcore::occupancy::{ConnectionStatus, OccupancyLevel};
use crowdcore::prelude::{AlertTransition, AreaId, FetchResult, ViewBridge};
use crowdcore::telemetry::{ActivityLog, MetricsSnapshot, PollMetrics};
use crowdcore::zones::{to_wire, Zone};
use log::warn;
use tokio::time::{interval, MissedTickBehavior};

use crate::api::ApiClient;
use crate::config::{DashboardConfig, Surface};
use crate::poller::PollEngine;

/// Threshold assumed until the backend value has been fetched.
const DEFAULT_THRESHOLD: u32 = 50;
/// Violation rows requested per history refresh.
const VIOLATION_FETCH_LIMIT: u32 = 20;

/// Everything one dashboard surface needs, constructed once at startup
/// and threaded through explicitly; there is no module-global state.
pub struct Session {
    config: DashboardConfig,
    api: ApiClient,
    engine: PollEngine,
    detector: ThresholdDetector,
    banner: AlertBanner,
    cache: ZoneCache,
    metrics: PollMetrics,
    activity: ActivityLog,
}

impl Session {
    /// Build a session against the configured backend.
    ///
    /// Bootstrap fetches (assigned areas, global threshold) degrade to
    /// configured defaults on failure; nothing here is fatal.
    pub async fn connect(config: DashboardConfig) -> Self {
        let api = ApiClient::new(config.base_url.clone(), config.token.clone());

        let areas = match config.surface {
            Surface::Admin => config.areas.clone(),
            Surface::User => match api.user_areas().await {
                Ok(records) => {
                    let assigned: Vec<AreaId> = records
                        .iter()
                        .filter_map(|record| AreaId::from_name(&record.area_name))
                        .filter(|area| config.areas.contains(area))
                        .collect();
                    if assigned.is_empty() {
                        warn!("no assigned areas returned, falling back to configured set");
                        config.areas.clone()
                    } else {
                        assigned
                    }
                }
                Err(error) => {
                    warn!("assigned-area fetch failed, using configured set: {error}");
                    config.areas.clone()
                }
            },
        };

        let threshold = match api.threshold().await {
            Ok(response) => response.global_threshold,
            Err(error) => {
                warn!("threshold fetch failed, assuming {DEFAULT_THRESHOLD}: {error}");
                DEFAULT_THRESHOLD
            }
        };

        let engine = PollEngine::new(areas, config.history_limit, config.history_hours);
        Self {
            api,
            engine,
            detector: ThresholdDetector::new(threshold),
            banner: AlertBanner::new(config.alert_dismiss()),
            cache: ZoneCache::new(config.zone_cache_ttl()),
            metrics: PollMetrics::new(),
            activity: ActivityLog::default(),
            config,
        }
    }

    pub fn areas(&self) -> &[AreaId] {
        self.engine.areas()
    }

    pub fn threshold(&self) -> u32 {
        self.detector.threshold()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn banner(&self) -> &AlertBanner {
        &self.banner
    }

    /// Drive all polling loops until Ctrl+C.
    ///
    /// Everything runs cooperatively on one task, so a tick can never
    /// overlap the previous one of any kind; ticks missed while a slow
    /// cycle is in flight are skipped, not queued. That generalizes the
    /// zone-refresh re-entrancy guard into a uniform skip-if-busy policy.
    pub async fn run(&mut self, view: &mut dyn ViewBridge) -> anyhow::Result<()> {
        let mut live = interval(self.config.live_interval());
        let mut history = interval(self.config.history_interval());
        let mut zones = interval(self.config.zones_interval());
        let mut violations = interval(self.config.violations_interval());
        for ticker in [&mut live, &mut history, &mut zones, &mut violations] {
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        }

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = live.tick() => {
                    self.live_tick(view).await;
                }
                _ = history.tick() => {
                    self.history_tick(view).await;
                }
                _ = zones.tick(), if self.config.watch_zones => {
                    self.zones_tick(view).await;
                }
                _ = violations.tick(), if self.config.surface == Surface::User => {
                    self.violations_tick(view).await;
                }
                result = &mut ctrl_c => {
                    result.context("awaiting Ctrl+C to exit")?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// One full polling cycle, used by the `--once` driver mode.
    pub async fn run_once(&mut self, view: &mut dyn ViewBridge) -> ConnectionStatus {
        let status = self.live_tick(view).await;
        self.history_tick(view).await;
        self.zones_tick(view).await;
        status
    }

    async fn live_tick(&mut self, view: &mut dyn ViewBridge) -> ConnectionStatus {
        let report = self.engine.poll_live(&self.api).await;
        self.metrics.record_tick();
        let now = Instant::now();

        for (area, result) in &report.samples {
            match result {
                Ok(sample) => {
                    let threshold = self.detector.threshold();
                    let level = OccupancyLevel::classify(sample.live_count, threshold);
                    let transition = self.detector.evaluate(*area, sample.live_count);
                    match transition {
                        AlertTransition::Raised => {
                            self.metrics.record_alert();
                            self.activity.record(format!(
                                "Alert raised for {}: {} people (threshold {})",
                                area.display_name(),
                                sample.live_count,
                                threshold
                            ));
                            self.banner.raise(
                                format!(
                                    "{}: {} people (threshold {})",
                                    area.display_name(),
                                    sample.live_count,
                                    threshold
                                ),
                                now,
                            );
                            view.publish_alert(*area, transition, sample.live_count, threshold);
                        }
                        AlertTransition::Cleared => {
                            self.activity.record(format!(
                                "{} back under threshold",
                                area.display_name()
                            ));
                            view.publish_alert(*area, transition, sample.live_count, threshold);
                        }
                        AlertTransition::None => {}
                    }
                    view.publish_live(sample, level);
                }
                Err(error) if error.is_auth_expired() => {
                    warn!("auth token expired, skipping {area} this cycle");
                    self.metrics.record_failure();
                }
                Err(error) => {
                    warn!("live fetch failed for {area}: {error}");
                    self.metrics.record_failure();
                }
            }
        }

        // Auto-dismiss hides the banner only; detector arming is reset
        // solely by the count returning to the threshold.
        if !self.banner.visible(now) {
            self.banner.dismiss();
        }

        view.publish_status(report.status);
        report.status
    }

    async fn history_tick(&mut self, view: &mut dyn ViewBridge) {
        for (area, result) in self.engine.poll_history(&self.api).await {
            match result {
                Ok(points) => view.publish_history(area, &points),
                Err(error) if error.is_auth_expired() => {
                    warn!("auth token expired, skipping history for {area}");
                }
                Err(error) => {
                    warn!("history fetch failed for {area}: {error}");
                    self.metrics.record_failure();
                }
            }
        }
    }

    async fn zones_tick(&mut self, view: &mut dyn ViewBridge) {
        let now = Instant::now();
        let stale: Vec<AreaId> = self
            .engine
            .areas()
            .iter()
            .copied()
            .filter(|&area| self.cache.fresh(area, now).is_none())
            .collect();
        if stale.is_empty() {
            return;
        }

        for (area, result) in self.engine.poll_zones(&self.api, &stale).await {
            match result {
                Ok(zones) => {
                    view.publish_zones(area, &zones);
                    self.cache.store(area, zones, now);
                }
                Err(error) if error.is_auth_expired() => {
                    warn!("auth token expired, skipping zone refresh for {area}");
                }
                Err(error) => {
                    warn!("zone refresh failed for {area}: {error}");
                    self.metrics.record_failure();
                }
            }
        }
    }

    async fn violations_tick(&mut self, view: &mut dyn ViewBridge) {
        match self.api.violations(VIOLATION_FETCH_LIMIT).await {
            Ok(records) => view.publish_violations(&records),
            Err(error) if error.is_auth_expired() => {
                warn!("auth token expired, skipping violation history");
            }
            Err(error) => warn!("violation history fetch failed: {error}"),
        }
    }

    // Mutations ------------------------------------------------------
    //
    // Every zone mutation invalidates the affected area's cache entry so
    // the next read refetches instead of serving a stale list.

    pub async fn save_zones(&mut self, area: AreaId, zones: &[Zone]) -> FetchResult<u32> {
        let saved = self.api.save_zones(area, &to_wire(zones)).await?;
        self.cache.invalidate(area);
        self.activity
            .record(format!("{saved} zones saved for {}", area.display_name()));
        Ok(saved)
    }

    pub async fn set_zone_visibility(
        &mut self,
        area: AreaId,
        zone_id: u32,
        visible: bool,
    ) -> FetchResult<()> {
        self.api.set_zone_visibility(area, zone_id, visible).await?;
        self.cache.invalidate(area);
        Ok(())
    }

    pub async fn delete_zone(&mut self, area: AreaId, zone_id: u32) -> FetchResult<()> {
        self.api.delete_zone(area, zone_id).await?;
        self.cache.invalidate(area);
        self.activity.record(format!(
            "Zone {zone_id} deleted from {}",
            area.display_name()
        ));
        Ok(())
    }

    /// Push a new global threshold and re-arm cleanly against it.
    pub async fn apply_threshold(&mut self, value: u32) -> FetchResult<()> {
        self.api.set_threshold(value).await?;
        self.detector.set_threshold(value);
        self.banner.dismiss();
        self.activity
            .record(format!("Global threshold set to {value}"));
        Ok(())
    }
}
