use std::collections::HashMap;

use crate::prelude::{AlertTransition, AreaId};

/// Edge-triggered threshold detector with per-area hysteresis.
///
/// An area arms on its first sample above the threshold and emits nothing
/// further until the count returns to or below the threshold, so one
/// excursion produces exactly one `Raised` and one `Cleared`.
#[derive(Debug)]
pub struct ThresholdDetector {
    threshold: u32,
    armed: HashMap<AreaId, bool>,
}

impl ThresholdDetector {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            armed: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_armed(&self, area: AreaId) -> bool {
        self.armed.get(&area).copied().unwrap_or(false)
    }

    /// Evaluate one sample against the current threshold.
    pub fn evaluate(&mut self, area: AreaId, count: u32) -> AlertTransition {
        let armed = self.armed.entry(area).or_insert(false);
        if count > self.threshold {
            if *armed {
                AlertTransition::None
            } else {
                *armed = true;
                AlertTransition::Raised
            }
        } else if *armed {
            *armed = false;
            AlertTransition::Cleared
        } else {
            AlertTransition::None
        }
    }

    /// Replace the global threshold.
    ///
    /// All armed state is cleared so the next tick re-evaluates cleanly
    /// against the new value.
    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold;
        self.armed.clear();
    }
}
