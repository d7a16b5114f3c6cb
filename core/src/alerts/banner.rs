use std::time::{Duration, Instant};

/// Presentation state for the threshold alert banner.
///
/// The banner auto-hides after a fixed duration. Hiding is cosmetic only;
/// detector arming is untouched, so a hidden banner never causes a repeat
/// alert while the excursion is still in progress.
#[derive(Debug)]
pub struct AlertBanner {
    dismiss_after: Duration,
    active: Option<(String, Instant)>,
}

impl AlertBanner {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            active: None,
        }
    }

    /// Show a new alert message, restarting the dismiss timer.
    pub fn raise(&mut self, message: String, now: Instant) {
        self.active = Some((message, now));
    }

    pub fn dismiss(&mut self) {
        self.active = None;
    }

    pub fn visible(&self, now: Instant) -> bool {
        match &self.active {
            Some((_, raised_at)) => now.duration_since(*raised_at) < self.dismiss_after,
            None => false,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.active.as_ref().map(|(message, _)| message.as_str())
    }
}
