//! Repository trait for click persistence and counting.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recorded clicks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteClickRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Persists a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors, including a `link_id`
    /// that does not reference an existing link.
    async fn create(&self, new_click: NewClick) -> Result<(), AppError>;

    /// Counts clicks recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError>;
}
