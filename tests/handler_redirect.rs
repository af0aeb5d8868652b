mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use linkwatch::api::handlers::redirect_handler;
use linkwatch::domain::click_event::ClickEvent;
use linkwatch::domain::click_pipeline::ClickPipeline;
use linkwatch::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(common::MockConnectInfoLayer)
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "redir1", "https://example.com/target").await;

    let (state, _rx) = common::create_test_state(pool);
    let server = server(state);

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let pool = common::test_pool().await;
    let (state, mut rx) = common::create_test_state(pool);
    let server = server(state);

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_enqueues_click() {
    let pool = common::test_pool().await;
    let link_id = common::create_test_link(&pool, "click1", "https://example.com").await;

    let (state, mut rx) = common::create_test_state(pool);
    let server = server(state);

    let response = server
        .get("/click1")
        .add_header("User-Agent", "Mozilla/5.0")
        .await;

    assert_eq!(response.status_code(), 302);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.link_id, link_id);
    assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(event.source_address.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_redirect_ignores_forwarded_header_by_default() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "proxy1", "https://example.com").await;

    let (state, mut rx) = common::create_test_state(pool);
    let server = server(state);

    server
        .get("/proxy1")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    let event = rx.try_recv().unwrap();
    assert_eq!(event.source_address.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_redirect_behind_proxy_uses_forwarded_header() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "proxy2", "https://example.com").await;

    let (state, mut rx) = common::create_test_state_with(pool, 10, true);
    let server = server(state);

    server
        .get("/proxy2")
        .add_header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .await;

    let event = rx.try_recv().unwrap();
    assert_eq!(event.source_address.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_redirect_served_when_click_queue_full() {
    let pool = common::test_pool().await;
    let link_id = common::create_test_link(&pool, "busy01", "https://example.com/busy").await;

    let (state, mut rx) = common::create_test_state_with(pool, 1, false);
    let pipeline: ClickPipeline = state.click_pipeline.clone();
    pipeline.submit(ClickEvent::new(link_id, Some("filler"), None));

    let server = server(state);
    let response = server.get("/busy01").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/busy");
    assert_eq!(pipeline.dropped(), 1);

    let queued = rx.try_recv().unwrap();
    assert_eq!(queued.user_agent.as_deref(), Some("filler"));
    assert!(rx.try_recv().is_err());
}
