use std::time::{Duration, Instant};

#[derive(Debug)]
struct Warning {
    message: String,
    shown_at: Instant,
}

/// A single line message that hides itself after a fixed duration.
///
/// Showing a new message replaces the current one and restarts the full duration.
#[derive(Debug)]
pub(crate) struct WarningBanner {
    duration: Duration,
    current: Option<Warning>,
}

impl WarningBanner {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub(crate) fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Warning {
            message: message.into(),
            shown_at: now,
        });
    }

    /// The message to display at `now`, if any.
    pub(crate) fn message(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|w| now.saturating_duration_since(w.shown_at) < self.duration)
            .map(|w| w.message.as_str())
    }
}
