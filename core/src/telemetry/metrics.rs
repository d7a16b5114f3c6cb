use std::sync::Mutex;

/// Counters gathered across polling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub ticks: usize,
    pub failures: usize,
    pub alerts_raised: usize,
}

pub struct PollMetrics {
    inner: Mutex<MetricsSnapshot>,
}

impl PollMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_tick(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ticks += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    pub fn record_alert(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.alerts_raised += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for PollMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = PollMetrics::new();
        metrics.record_tick();
        metrics.record_tick();
        metrics.record_failure();
        metrics.record_alert();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ticks, 2);
        assert_eq!(snapshot.failures, 1);
        assert_eq!(snapshot.alerts_raised, 1);
    }
}
