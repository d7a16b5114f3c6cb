use crowdcore::alerts::ViolationRecord;
use crowdcore::occupancy::{ConnectionStatus, HistoryPoint, OccupancyLevel, Sample};
use crowdcore::prelude::{AlertTransition, AreaId, ViewBridge};
use crowdcore::zones::Zone;

/// Console rendering of the dashboard feed for headless runs.
///
/// Stands in for the chart/DOM surfaces, which live on the other side of
/// the `ViewBridge` seam.
#[derive(Debug, Default)]
pub struct ConsoleBridge {
    last_status: Option<ConnectionStatus>,
}

impl ConsoleBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewBridge for ConsoleBridge {
    fn publish_live(&mut self, sample: &Sample, level: OccupancyLevel) {
        println!(
            "[view] {}: {} people ({})",
            sample.area.display_name(),
            sample.live_count,
            level.label()
        );
    }

    fn publish_alert(
        &mut self,
        area: AreaId,
        transition: AlertTransition,
        count: u32,
        threshold: u32,
    ) {
        match transition {
            AlertTransition::Raised => println!(
                "[view] ALERT {}: {} people (threshold {})",
                area.display_name(),
                count,
                threshold
            ),
            AlertTransition::Cleared => println!(
                "[view] {} back under threshold ({} <= {})",
                area.display_name(),
                count,
                threshold
            ),
            AlertTransition::None => {}
        }
    }

    fn publish_history(&mut self, area: AreaId, points: &[HistoryPoint]) {
        println!(
            "[view] {}: {} history points",
            area.display_name(),
            points.len()
        );
    }

    fn publish_status(&mut self, status: ConnectionStatus) {
        // Only report changes; the status arrives every tick.
        if self.last_status != Some(status) {
            println!("[view] backend {}", status.label());
            self.last_status = Some(status);
        }
    }

    fn publish_zones(&mut self, area: AreaId, zones: &[Zone]) {
        println!(
            "[view] {}: {} zones configured",
            area.display_name(),
            zones.len()
        );
    }

    fn publish_violations(&mut self, records: &[ViolationRecord]) {
        println!("[view] {} recorded threshold violations", records.len());
        for record in records.iter().take(3) {
            println!(
                "[view]   {} -> {} people (exceeded by {})",
                record.area_name,
                record.people_count,
                record.exceeded_by()
            );
        }
    }
}
