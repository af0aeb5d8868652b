#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::Utc;
use linkwatch::application::services::LinkService;
use linkwatch::domain::click_event::ClickEvent;
use linkwatch::domain::click_pipeline::ClickPipeline;
use linkwatch::infrastructure::persistence::{
    SqliteClickRepository, SqliteLinkRepository, run_migrations,
};
use linkwatch::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://localhost:8080";

/// Fresh in-memory database with the schema applied.
///
/// A single connection that never expires keeps the database alive for the
/// whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();

    pool
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (short_code, long_url, created_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click(pool: &SqlitePool, link_id: i64, ip: &str) {
    sqlx::query("INSERT INTO clicks (link_id, clicked_at, ip_address) VALUES (?, ?, ?)")
        .bind(link_id)
        .bind(Utc::now())
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_clicks(pool: &SqlitePool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE link_id = ?")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: SqlitePool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with(pool, 100, false)
}

pub fn create_test_state_with(
    pool: SqlitePool,
    queue_capacity: usize,
    behind_proxy: bool,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let pool = Arc::new(pool);

    let link_repo = Arc::new(SqliteLinkRepository::new(pool.clone()));
    let click_repo = Arc::new(SqliteClickRepository::new(pool));

    let link_service = Arc::new(LinkService::new(link_repo, click_repo, BASE_URL.to_string()));
    let (click_pipeline, rx) = ClickPipeline::new(queue_capacity);

    (AppState::new(link_service, click_pipeline, behind_proxy), rx)
}

/// Injects a fixed peer address, standing in for
/// `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
