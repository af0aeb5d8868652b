//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::click_pipeline::ClickPipeline;
use crate::infrastructure::persistence::{SqliteClickRepository, SqliteLinkRepository};

/// Link service wired to the SQLite repositories.
pub type AppLinkService = LinkService<SqliteLinkRepository, SqliteClickRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub click_pipeline: ClickPipeline,
    /// Take the client address from proxy headers instead of the socket peer.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(link_service: Arc<AppLinkService>, click_pipeline: ClickPipeline, behind_proxy: bool) -> Self {
        Self {
            link_service,
            click_pipeline,
            behind_proxy,
        }
    }
}
