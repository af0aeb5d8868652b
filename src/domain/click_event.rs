//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// A click waiting in the pipeline queue.
///
/// Built by the redirect handler after the short code resolved, so `link_id`
/// always refers to an existing link. Ownership moves from the handler to the
/// queue and then to exactly one consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub source_address: Option<String>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    ///
    /// Empty header values are stored as `None`.
    pub fn new(link_id: i64, user_agent: Option<&str>, source_address: Option<String>) -> Self {
        Self {
            link_id,
            timestamp: Utc::now(),
            user_agent: user_agent
                .filter(|ua| !ua.is_empty())
                .map(ToString::to_string),
            source_address,
        }
    }

    /// Converts the event into the record persisted by the click store.
    pub fn into_new_click(self) -> NewClick {
        NewClick {
            link_id: self.link_id,
            clicked_at: self.timestamp,
            user_agent: self.user_agent,
            ip_address: self.source_address,
        }
    }
}
