//! Link availability contracts used by the monitor.

use async_trait::async_trait;
use tracing::warn;

/// A link whose accessibility changed between two sweeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityTransition {
    pub link_id: i64,
    pub short_code: String,
    pub long_url: String,
    pub was_accessible: bool,
    pub is_accessible: bool,
}

/// Checks whether a target URL currently answers.
///
/// Probe failures are observations, not errors: timeouts, connection errors
/// and non-success statuses all report `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_accessible(&self, url: &str) -> bool;
}

/// Receives accessibility transitions.
#[cfg_attr(test, mockall::automock)]
pub trait TransitionNotifier: Send + Sync {
    fn notify(&self, transition: &AvailabilityTransition);
}

/// Notifier that writes each transition to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl TransitionNotifier for LogNotifier {
    fn notify(&self, transition: &AvailabilityTransition) {
        warn!(
            link_id = transition.link_id,
            code = %transition.short_code,
            long_url = %transition.long_url,
            previous = state_label(transition.was_accessible),
            current = state_label(transition.is_accessible),
            "Link availability changed"
        );
    }
}

pub fn state_label(accessible: bool) -> &'static str {
    if accessible { "accessible" } else { "inaccessible" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_label() {
        assert_eq!(state_label(true), "accessible");
        assert_eq!(state_label(false), "inaccessible");
    }

    #[test]
    fn test_log_notifier_accepts_transition() {
        LogNotifier.notify(&AvailabilityTransition {
            link_id: 1,
            short_code: "abc123".to_string(),
            long_url: "https://example.com".to_string(),
            was_accessible: true,
            is_accessible: false,
        });
    }
}
