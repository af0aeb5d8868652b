//! DTOs for link statistics endpoint.

use serde::Serialize;

use crate::application::services::LinkStats;

/// Click statistics for a single link.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub short_code: String,
    pub long_url: String,
    pub total_clicks: i64,
}

impl From<LinkStats> for LinkStatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_code: stats.link.short_code,
            long_url: stats.link.long_url,
            total_clicks: stats.total_clicks,
        }
    }
}
