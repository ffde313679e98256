//! Integration Tests for API Endpoints
//!
//! Runs the full router against a stub release feed served on a local port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use release_filter::{api::create_router, upstream::ReleaseClient, AppState};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use tower::ServiceExt;

// == Stub Upstream ==

#[derive(Clone)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    releases: Value,
}

#[derive(Deserialize)]
struct PageQuery {
    page: u32,
    per_page: u32,
}

async fn releases_stub(State(upstream): State<Upstream>, Query(page): Query<PageQuery>) -> Response {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 10);

    if upstream.status.is_success() {
        Json(upstream.releases.clone()).into_response()
    } else {
        (upstream.status, Json(json!({ "message": "stub failure" }))).into_response()
    }
}

/// Serves `releases` at `/repos/payloadcms/payload/releases`, returns the base URL
async fn spawn_upstream(status: StatusCode, releases: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let upstream = Upstream {
        hits: hits.clone(),
        status,
        releases,
    };
    let app = Router::new()
        .route("/repos/payloadcms/payload/releases", get(releases_stub))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

/// Release feed, newest first, as the API returns it
fn feed() -> Value {
    json!([
        {
            "id": 105,
            "name": "v3.0.0-beta.90",
            "tag_name": "v3.0.0-beta.90",
            "body": "### BREAKING CHANGES\n\n* db: rename `id` column",
            "published_at": "2024-08-22T10:00:00Z",
            "html_url": "https://github.com/payloadcms/payload/releases/tag/v3.0.0-beta.90"
        },
        {
            "id": 104,
            "name": "v2.27.0",
            "tag_name": "v2.27.0",
            "body": "### Features",
            "published_at": "2024-08-21T10:00:00Z",
            "html_url": "https://github.com/payloadcms/payload/releases/tag/v2.27.0"
        },
        {
            "id": 103,
            "name": "v3.0.0-beta.89",
            "tag_name": "v3.0.0-beta.89",
            "body": "### Bug Fixes\n\n```ts\nconst config = buildConfig({})\nexport default config\n```",
            "published_at": "2024-08-20T20:46:11Z",
            "html_url": null
        },
        {
            "id": 102,
            "name": null,
            "tag_name": "v3.0.0-beta.88",
            "body": null,
            "published_at": "not-a-date",
            "html_url": null
        },
        {
            "id": 101,
            "name": "v30.0.0",
            "tag_name": "v30.0.0",
            "body": "",
            "published_at": "2024-08-18T10:00:00Z",
            "html_url": null
        }
    ])
}

// == Helper Functions ==

async fn test_app(status: StatusCode, releases: Value, ttl: u64) -> (Router, Arc<AtomicUsize>) {
    let (base_url, hits) = spawn_upstream(status, releases).await;
    let client = ReleaseClient::with_base_url(base_url, "payloadcms", "payload");
    (create_router(AppState::new(client, ttl)), hits)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(json: &Value, field: &str) -> Vec<u64> {
    json[field]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect()
}

// == GET /releases ==

#[tokio::test]
async fn test_releases_default_view() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (status, json) = get_json(&app, "/releases").await;

    assert_eq!(status, StatusCode::OK);
    // v30.0.0 matches version 3 by prefix
    assert_eq!(ids(&json, "releases"), vec![105, 103, 102, 101]);
    assert_eq!(ids(&json, "fromTo"), vec![101, 102, 103, 105]);
    assert_eq!(json["count"], 4);
    assert_eq!(json["fromTo"][1]["name"], "v3.0.0-beta.88");
}

#[tokio::test]
async fn test_releases_formats_dates() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (_, json) = get_json(&app, "/releases?sort=asc").await;
    let releases = json["releases"].as_array().unwrap();

    let beta_89 = releases.iter().find(|r| r["id"] == 103).unwrap();
    assert_eq!(beta_89["published_date"], "August 20, 2024");
    assert_eq!(beta_89["published_title"], "Aug 20, 2024, 8:46:11 PM");

    let beta_88 = releases.iter().find(|r| r["id"] == 102).unwrap();
    assert_eq!(beta_88["published_date"], "");
    assert_eq!(beta_88["body"], "");
}

#[tokio::test]
async fn test_releases_version_two() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (_, json) = get_json(&app, "/releases?version=2").await;

    assert_eq!(ids(&json, "releases"), vec![104]);
    assert_eq!(ids(&json, "fromTo"), vec![104]);
}

#[tokio::test]
async fn test_releases_range_and_sort() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (_, json) = get_json(&app, "/releases?from=102&to=105&sort=asc").await;

    assert_eq!(ids(&json, "releases"), vec![102, 103, 105]);
    // Selector options keep every v3 release
    assert_eq!(ids(&json, "fromTo"), vec![101, 102, 103, 105]);
}

#[tokio::test]
async fn test_releases_breaking_only() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (_, json) = get_json(&app, "/releases?breaking=on").await;
    assert_eq!(ids(&json, "releases"), vec![105]);
    assert_eq!(ids(&json, "fromTo").len(), 4);

    let (_, json) = get_json(&app, "/releases?breaking=off").await;
    assert_eq!(ids(&json, "releases").len(), 4);
}

#[tokio::test]
async fn test_releases_empty_bounds_from_form() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (status, json) = get_json(&app, "/releases?version=3&from=&to=&sort=desc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 4);
}

#[tokio::test]
async fn test_releases_out_of_range_is_empty() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (status, json) = get_json(&app, "/releases?from=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(ids(&json, "fromTo").len(), 4);
}

#[tokio::test]
async fn test_releases_non_numeric_bound_is_empty() {
    let (app, hits) = test_app(StatusCode::OK, feed(), 180).await;

    let (status, json) = get_json(&app, "/releases?to=v3.0.0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert!(json["releases"].as_array().unwrap().is_empty());
    assert_eq!(ids(&json, "fromTo").len(), 4);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_releases_negative_bound_keeps_all() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (status, json) = get_json(&app, "/releases?from=-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json, "releases"), vec![105, 103, 102, 101]);
}

#[tokio::test]
async fn test_releases_empty_version_matches_all() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (_, json) = get_json(&app, "/releases?version=").await;

    assert_eq!(ids(&json, "releases"), vec![105, 104, 103, 102, 101]);
    assert_eq!(ids(&json, "fromTo").len(), 5);
}

#[tokio::test]
async fn test_releases_code_blocks() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (_, json) = get_json(&app, "/releases").await;
    let releases = json["releases"].as_array().unwrap();

    let beta_89 = releases.iter().find(|r| r["id"] == 103).unwrap();
    assert_eq!(beta_89["code_blocks"][0]["language"], "ts");
    assert_eq!(beta_89["code_blocks"][0]["multiline"], true);
    assert_eq!(
        beta_89["code_blocks"][0]["code"],
        "const config = buildConfig({})\nexport default config\n"
    );

    let beta_90 = releases.iter().find(|r| r["id"] == 105).unwrap();
    assert_eq!(beta_90["code_blocks"], json!([]));
}

#[tokio::test]
async fn test_releases_empty_upstream() {
    let (app, _) = test_app(StatusCode::OK, json!([]), 180).await;

    let (status, json) = get_json(&app, "/releases").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert!(json["releases"].as_array().unwrap().is_empty());
    assert!(json["fromTo"].as_array().unwrap().is_empty());
}

// == Upstream Failures ==

#[tokio::test]
async fn test_releases_upstream_error_status() {
    let (app, hits) = test_app(StatusCode::INTERNAL_SERVER_ERROR, feed(), 180).await;

    let (status, json) = get_json(&app, "/releases").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("500"));

    // Failures are not cached
    let (status, _) = get_json(&app, "/releases").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_releases_upstream_malformed_record() {
    let (app, _) = test_app(StatusCode::OK, json!([{ "name": "v3.0.0" }]), 180).await;

    let (status, _) = get_json(&app, "/releases").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// == Caching ==

#[tokio::test]
async fn test_releases_served_from_cache() {
    let (app, hits) = test_app(StatusCode::OK, feed(), 180).await;

    for uri in ["/releases", "/releases?version=2", "/releases?sort=asc"] {
        let (status, _) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["hits"], 2);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["total_entries"], 1);
}

#[tokio::test]
async fn test_releases_refetched_after_ttl() {
    let (app, hits) = test_app(StatusCode::OK, feed(), 1).await;

    get_json(&app, "/releases").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, _) = get_json(&app, "/releases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_releases_client_directly() {
    let (base_url, _) = spawn_upstream(StatusCode::OK, feed()).await;
    let client = ReleaseClient::with_base_url(base_url, "payloadcms", "payload");

    let releases = assert_ok!(client.fetch_releases(1).await);
    assert_eq!(releases.len(), 5);
    assert_eq!(releases[3].name, "v3.0.0-beta.88");

    let (base_url, _) = spawn_upstream(StatusCode::NOT_FOUND, feed()).await;
    let client = ReleaseClient::with_base_url(base_url, "payloadcms", "payload");
    assert_err!(client.fetch_releases(1).await);
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app(StatusCode::OK, feed(), 180).await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
