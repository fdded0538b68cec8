use axum::http::StatusCode;
use http_body_util::BodyExt;
use mergington_core::catalog::default_catalog;
use mergington_core::{CapacityPolicy, Registry};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app() -> axum::Router {
    mergington_server::build_router(Registry::new(default_catalog()))
}

/// Send a request via `oneshot` and return (status, parsed JSON body).
async fn send(app: axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri).await
}

async fn post(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri).await
}

async fn delete(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri).await
}

async fn participants(app: axum::Router, name: &str) -> Vec<String> {
    let (_, json) = get(app, "/activities").await;
    json[name]["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_redirects_to_index() {
    let req = axum::http::Request::builder()
        .uri("/")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/static/index.html");
}

#[tokio::test]
async fn index_page_is_served() {
    let req = axum::http::Request::builder()
        .uri("/static/index.html")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Mergington High School"));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_every_activity_with_fields() {
    let (status, json) = get(app(), "/activities").await;
    assert_eq!(status, StatusCode::OK);

    let map = json.as_object().unwrap();
    assert!(!map.is_empty());
    for details in map.values() {
        assert!(details["description"].is_string());
        assert!(details["schedule"].is_string());
        assert!(details["max_participants"].as_u64().unwrap() > 0);
        assert!(details["participants"].is_array());
    }
    assert_eq!(
        json["Chess Club"]["description"],
        "Learn strategies and compete in chess tournaments"
    );
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_adds_participant() {
    let app = app();
    let (status, json) = post(
        app.clone(),
        "/activities/Chess%20Club/signup?email=test@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Signed up test@mergington.edu for Chess Club");

    let roster = participants(app, "Chess Club").await;
    assert_eq!(roster.last().unwrap(), "test@mergington.edu");
}

#[tokio::test]
async fn signup_unknown_activity_is_404() {
    let (status, json) = post(
        app(),
        "/activities/Nonexistent%20Activity/signup?email=test@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Activity not found");
}

#[tokio::test]
async fn signup_twice_is_400() {
    let app = app();
    let uri = "/activities/Chess%20Club/signup?email=duplicate@mergington.edu";
    let (first, _) = post(app.clone(), uri).await;
    assert_eq!(first, StatusCode::OK);

    let (second, json) = post(app.clone(), uri).await;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("already signed up"));

    let roster = participants(app, "Chess Club").await;
    let hits = roster.iter().filter(|p| *p == "duplicate@mergington.edu").count();
    assert_eq!(hits, 1);
}

#[tokio::test]
async fn signup_without_email_is_rejected() {
    let (status, json) = post(app(), "/activities/Chess%20Club/signup").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn unregister_without_email_is_rejected_as_json() {
    let (status, json) = delete(app(), "/activities/Chess%20Club/unregister").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn signup_past_capacity_succeeds_by_default() {
    let app = app();
    for i in 0..20 {
        let uri = format!("/activities/Math%20Club/signup?email=s{i}@mergington.edu");
        let (status, _) = post(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(participants(app, "Math Club").await.len(), 22);
}

#[tokio::test]
async fn signup_past_capacity_fails_when_enforced() {
    let registry = Registry::new(default_catalog()).with_capacity_policy(CapacityPolicy::Enforced);
    let app = mergington_server::build_router(registry);
    // Math Club seats 10 and starts with 2.
    for i in 0..8 {
        let uri = format!("/activities/Math%20Club/signup?email=s{i}@mergington.edu");
        let (status, _) = post(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, json) = post(
        app,
        "/activities/Math%20Club/signup?email=late@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Activity is full");
}

// ---------------------------------------------------------------------------
// Unregister
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unregister_after_signup_restores_count() {
    let app = app();
    let before = participants(app.clone(), "Chess Club").await.len();

    post(app.clone(), "/activities/Chess%20Club/signup?email=a@x.edu").await;
    assert_eq!(participants(app.clone(), "Chess Club").await.len(), before + 1);

    let (status, json) = delete(
        app.clone(),
        "/activities/Chess%20Club/unregister?email=a@x.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Unregistered a@x.edu from Chess Club");
    assert_eq!(participants(app, "Chess Club").await.len(), before);
}

#[tokio::test]
async fn unregister_unknown_activity_is_404() {
    let (status, json) = delete(
        app(),
        "/activities/Nonexistent%20Activity/unregister?email=test@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Activity not found");
}

#[tokio::test]
async fn unregister_not_signed_up_is_400() {
    let (status, json) = delete(
        app(),
        "/activities/Chess%20Club/unregister?email=notsignedup@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("not signed up"));
}

#[tokio::test]
async fn unregister_preset_participant() {
    let app = app();
    let (status, _) = delete(
        app.clone(),
        "/activities/Chess%20Club/unregister?email=michael@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let roster = participants(app, "Chess Club").await;
    assert!(!roster.contains(&"michael@mergington.edu".to_string()));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_duplicate_signups_enroll_once() {
    let app = app();
    let uri = "/activities/Art%20Club/signup?email=race@mergington.edu";
    let mut handles = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { post(app, uri).await.0 }));
    }
    let mut ok = 0;
    for h in handles {
        if h.await.unwrap() == StatusCode::OK {
            ok += 1;
        }
    }
    assert_eq!(ok, 1);
    let roster = participants(app, "Art Club").await;
    assert_eq!(
        roster.iter().filter(|p| *p == "race@mergington.edu").count(),
        1
    );
}
