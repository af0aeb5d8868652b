//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click recorded when a shortened link is followed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Input data for recording a new click.
///
/// The `link_id` must reference an existing link; the redirect handler only
/// builds one after resolving the short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_click_creation() {
        let now = Utc::now();
        let new_click = NewClick {
            link_id: 99,
            clicked_at: now,
            user_agent: Some("Chrome/120".to_string()),
            ip_address: None,
        };

        assert_eq!(new_click.link_id, 99);
        assert_eq!(new_click.clicked_at, now);
        assert!(new_click.user_agent.is_some());
        assert!(new_click.ip_address.is_none());
    }
}
