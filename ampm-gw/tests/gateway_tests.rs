//! Integration tests for the gateway HTTP surface
//!
//! A stub upstream server stands in for the Apple Music API so tests can
//! assert exactly what the gateway forwards (URL, headers, payload) and how
//! it relays upstream responses and failures.

use std::collections::HashMap;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use ampm_gw::upstream::{AppleMusicClient, Credentials};
use ampm_gw::{build_router, AppState};

const DEV_TOKEN: &str = "dev-token-123";
const USER_TOKEN: &str = "user-token-456";

/// What the stub upstream observed, for assertions
#[derive(Debug, Default)]
struct Recorded {
    search_term: Option<String>,
    search_authorization: Option<String>,
    search_user_token: Option<String>,
    create_body: Option<Value>,
}

#[derive(Clone, Default)]
struct StubState {
    recorded: Arc<Mutex<Recorded>>,
}

async fn stub_search(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let mut recorded = state.recorded.lock().unwrap();
    recorded.search_term = params.get("term").cloned();
    recorded.search_authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    recorded.search_user_token = headers
        .get("music-user-token")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    Json(json!({ "results": { "playlists": { "data": [] } } }))
}

async fn stub_playlist(Path(id): Path<String>) -> impl IntoResponse {
    match id.as_str() {
        // Shape from the real playlist-detail endpoint, reduced
        "abc123" => (
            StatusCode::OK,
            Json(json!({
                "data": [
                    { "relationships": { "tracks": { "data": [ {"id": "t1"}, {"id": "t2"} ] } } }
                ]
            })),
        ),
        "empty" => (StatusCode::OK, Json(json!({ "data": [] }))),
        "notracks" => (
            StatusCode::OK,
            Json(json!({ "data": [ { "relationships": {} } ] })),
        ),
        "denied" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "errors": [ { "status": "401", "title": "Unauthorized" } ] })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "errors": [ { "status": "404" } ] })),
        ),
    }
}

async fn stub_create(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.recorded.lock().unwrap().create_body = Some(body);
    Json(json!({ "data": [ { "id": "p.l00000000", "type": "library-playlists" } ] }))
}

/// Spawn the stub upstream on an ephemeral local port.
async fn spawn_stub() -> (SocketAddr, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/catalog/us/search", get(stub_search))
        .route("/catalog/us/playlists/:id", get(stub_playlist))
        .route("/me/library/playlists", post(stub_create))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(axum::serve(listener, app).into_future());

    (addr, state)
}

/// Gateway app wired to the stub upstream
fn gateway_app(upstream: SocketAddr) -> Router {
    let credentials = Credentials {
        developer_token: DEV_TOKEN.to_string(),
        user_token: USER_TOKEN.to_string(),
    };
    let client =
        AppleMusicClient::with_base_url(credentials, "us", format!("http://{upstream}")).unwrap();
    build_router(AppState::new(client))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn search_forwards_term_and_both_credentials() {
    let (upstream, stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app
        .oneshot(get_request("/search?query=chill%20mix"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Upstream body relayed verbatim
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "results": { "playlists": { "data": [] } } }));

    let recorded = stub.recorded.lock().unwrap();
    assert_eq!(recorded.search_term.as_deref(), Some("chill mix"));
    assert_eq!(
        recorded.search_authorization.as_deref(),
        Some(format!("Bearer {DEV_TOKEN}").as_str())
    );
    assert_eq!(recorded.search_user_token.as_deref(), Some(USER_TOKEN));
}

#[tokio::test]
async fn search_without_query_forwards_empty_term() {
    let (upstream, stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app.oneshot(get_request("/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let recorded = stub.recorded.lock().unwrap();
    assert_eq!(recorded.search_term.as_deref(), Some(""));
}

#[tokio::test]
async fn tracks_returns_ordered_ids_only() {
    let (upstream, _stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app.oneshot(get_request("/tracks/abc123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!(["t1", "t2"]));
}

#[tokio::test]
async fn tracks_without_playlist_record_is_bad_gateway() {
    let (upstream, _stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app.oneshot(get_request("/tracks/empty")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("no playlist record"));
}

#[tokio::test]
async fn tracks_without_tracks_relationship_is_bad_gateway() {
    let (upstream, _stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app.oneshot(get_request("/tracks/notracks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("tracks relationship"));
}

#[tokio::test]
async fn upstream_error_is_relayed_with_raw_body() {
    let (upstream, _stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app.oneshot(get_request("/tracks/denied")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["upstream_status"], 401);
    assert_eq!(body["upstream_body"]["errors"][0]["title"], "Unauthorized");
}

#[tokio::test]
async fn create_playlist_preserves_track_order() {
    let (upstream, stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let request = post_json(
        "/create_playlist",
        &json!({ "name": "X", "description": "Y", "track_ids": ["t1", "t2"] }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Upstream creation response relayed verbatim
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["data"][0]["id"], "p.l00000000");

    let recorded = stub.recorded.lock().unwrap();
    let sent = recorded.create_body.as_ref().unwrap();
    assert_eq!(sent["attributes"]["name"], "X");
    assert_eq!(sent["attributes"]["description"], "Y");
    assert_eq!(
        sent["relationships"]["tracks"]["data"],
        json!([
            { "id": "t1", "type": "songs" },
            { "id": "t2", "type": "songs" },
        ])
    );
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    // Port from a listener that is immediately dropped: nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = gateway_app(addr);
    let response = app.oneshot(get_request("/tracks/abc123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn health_endpoint_reports_module() {
    let (upstream, _stub) = spawn_stub().await;
    let app = gateway_app(upstream);

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ampm-gw");
    assert!(body["version"].is_string());
}
