//! SQLite implementation of click repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// SQLite repository for recorded clicks.
pub struct SqliteClickRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteClickRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for SqliteClickRepository {
    async fn create(&self, new_click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (link_id, clicked_at, user_agent, ip_address)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.clicked_at)
        .bind(new_click.user_agent)
        .bind(new_click.ip_address)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks WHERE link_id = ?")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
