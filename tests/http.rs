//! Router-level tests: the full axum app over the in-memory store.

#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use guestbook_server::api::build_app;
use guestbook_server::app_state::AppState;
use guestbook_server::domain::{Entry, SubmitOutcome};
use guestbook_server::persistence::{GuestbookStore, MemoryStore};
use guestbook_server::service::GuestbookService;

async fn make_app(store: MemoryStore) -> (Arc<MemoryStore>, Router) {
    make_app_started_at(store, Instant::now()).await
}

async fn make_app_started_at(
    store: MemoryStore,
    started_at: Instant,
) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(store);
    let guestbook = Arc::new(GuestbookService::new(
        Arc::clone(&store) as Arc<dyn GuestbookStore>
    ));
    if guestbook.initialize().await.is_err() {
        panic!("schema init failed");
    }
    (store, build_app(AppState::new(guestbook, started_at)))
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
}

fn get(uri: &str) -> Request<Body> {
    let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
        panic!("valid request");
    };
    request
}

fn sign(body: &str) -> Request<Body> {
    let Ok(request) = Request::builder()
        .method("POST")
        .uri("/sign")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
    else {
        panic!("valid request");
    };
    request
}

async fn body_text(response: Response<Body>) -> String {
    let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
        panic!("readable body");
    };
    String::from_utf8_lossy(&bytes).into_owned()
}

fn assert_redirect_home(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

fn outcome(response: &Response<Body>) -> Option<SubmitOutcome> {
    response.extensions().get::<SubmitOutcome>().copied()
}

#[tokio::test]
async fn home_counts_each_visit() {
    let (store, app) = make_app(MemoryStore::new()).await;

    let first = send(&app, get("/")).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert!(body_text(first).await.contains("visitors: <span>1</span>"));

    let second = send(&app, get("/")).await;
    assert!(body_text(second).await.contains("visitors: <span>2</span>"));
    assert_eq!(store.visitor_count().await, Some(2));
}

#[tokio::test]
async fn empty_guestbook_shows_placeholder() {
    let (_store, app) = make_app(MemoryStore::new()).await;
    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("No messages yet. Be the first to sign!"));
    assert!(html.contains("Messages (0)"));
}

#[tokio::test]
async fn signing_redirects_and_shows_escaped_entry() {
    let (store, app) = make_app(MemoryStore::new()).await;

    let response = send(
        &app,
        sign("name=%3Cb%3Ex%3C%2Fb%3E&message=it%27s+%22fun%22+%26+%3Cok%3E"),
    )
    .await;
    assert_redirect_home(&response);
    assert!(matches!(outcome(&response), Some(SubmitOutcome::Saved { .. })));
    assert_eq!(store.visitor_count().await, Some(0));

    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(html.contains("it&#39;s &quot;fun&quot; &amp; &lt;ok&gt;"));
    assert!(!html.contains("<b>x</b>"));
    assert!(!html.contains("<ok>"));
    assert!(html.contains("just now"));
}

#[tokio::test]
async fn over_length_input_is_truncated() {
    let (store, app) = make_app(MemoryStore::new()).await;
    let body = format!("name={}&message={}", "a".repeat(150), "b".repeat(600));

    let response = send(&app, sign(&body)).await;
    assert_redirect_home(&response);

    let Ok(entries) = store.recent_entries(50).await else {
        panic!("listing failed");
    };
    let [entry] = entries.as_slice() else {
        panic!("expected one entry");
    };
    assert_eq!(entry.name.len(), 100);
    assert_eq!(entry.message.len(), 500);
}

#[tokio::test]
async fn whitespace_name_is_skipped() {
    let (store, app) = make_app(MemoryStore::new()).await;

    let response = send(&app, sign("name=+++&message=hello")).await;
    assert_redirect_home(&response);
    assert_eq!(outcome(&response), Some(SubmitOutcome::Skipped));
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn missing_field_is_skipped() {
    let (store, app) = make_app(MemoryStore::new()).await;

    let response = send(&app, sign("name=ada")).await;
    assert_redirect_home(&response);
    assert_eq!(outcome(&response), Some(SubmitOutcome::Skipped));
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn unreadable_form_still_redirects() {
    let (store, app) = make_app(MemoryStore::new()).await;
    let Ok(request) = Request::builder()
        .method("POST")
        .uri("/sign")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"ada","message":"hi"}"#))
    else {
        panic!("valid request");
    };

    let response = send(&app, request).await;
    assert_redirect_home(&response);
    assert_eq!(outcome(&response), Some(SubmitOutcome::Skipped));
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn store_outage_fails_home_but_not_sign() {
    let (store, app) = make_app(MemoryStore::new()).await;
    store.set_online(false);

    let home = send(&app, get("/")).await;
    assert_eq!(home.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(home).await;
    assert!(html.contains("Something went wrong"));
    assert!(!html.contains("visitors:"));

    let response = send(&app, sign("name=ada&message=hello")).await;
    assert_redirect_home(&response);
    assert_eq!(outcome(&response), Some(SubmitOutcome::Dropped));

    store.set_online(true);
    assert_eq!(store.entry_count().await, 0);
    assert_eq!(store.visitor_count().await, Some(0));
}

#[tokio::test]
async fn listing_failure_after_count_serves_failure_page() {
    let (store, app) = make_app(MemoryStore::new()).await;
    let _ = send(&app, sign("name=ada&message=hello")).await;
    store.set_listing_online(false);

    let home = send(&app, get("/")).await;
    assert_eq!(home.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(home).await;
    assert!(html.contains("Something went wrong"));
    assert!(!html.contains("visitors:"));
    assert!(!html.contains("hello"));
    assert_eq!(store.visitor_count().await, Some(1));
}

#[tokio::test]
async fn health_uptime_counts_from_process_start() {
    let Some(started_at) = Instant::now().checked_sub(StdDuration::from_secs(120)) else {
        panic!("clock too close to boot");
    };
    let (_store, app) = make_app_started_at(MemoryStore::new(), started_at).await;

    let response = send(&app, get("/health")).await;
    let Ok(json) = serde_json::from_str::<serde_json::Value>(&body_text(response).await) else {
        panic!("health body should be JSON");
    };
    assert!(json["uptime"].as_f64().is_some_and(|u| u >= 120.0));
}

#[tokio::test]
async fn health_reports_ok_without_mutating() {
    let (store, app) = make_app(MemoryStore::new()).await;

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let Ok(json) = serde_json::from_str::<serde_json::Value>(&body_text(response).await) else {
        panic!("health body should be JSON");
    };
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
    assert!(json["uptime"].as_f64().is_some_and(|u| u >= 0.0));

    assert_eq!(store.visitor_count().await, Some(0));
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn health_reports_error_when_store_is_down() {
    let (store, app) = make_app(MemoryStore::new()).await;
    store.set_online(false);

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let Ok(json) = serde_json::from_str::<serde_json::Value>(&body_text(response).await) else {
        panic!("health body should be JSON");
    };
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn home_lists_at_most_fifty_newest_entries() {
    let start = Utc::now() - Duration::days(1);
    let seeded = (1..=60)
        .map(|id| Entry {
            id,
            name: format!("signer-{id:03}"),
            message: "hello".to_string(),
            created_at: start + Duration::minutes(id),
        })
        .collect();
    let (_store, app) = make_app(MemoryStore::with_entries(seeded)).await;

    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("Messages (50)"));
    assert!(html.contains("signer-060"));
    assert!(html.contains("signer-011"));
    assert!(!html.contains("signer-010"));

    let (Some(newest), Some(older)) = (html.find("signer-060"), html.find("signer-059")) else {
        panic!("entries should render");
    };
    assert!(newest < older);
}

#[tokio::test]
async fn concurrent_visits_are_all_counted() {
    let (store, app) = make_app(MemoryStore::new()).await;

    let mut handles = Vec::new();
    for _ in 0..32 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, get("/")).await.status()
        }));
    }
    for handle in handles {
        let Ok(status) = handle.await else {
            panic!("request task failed");
        };
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(store.visitor_count().await, Some(32));
}
