#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get as route_get;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wallbrowse_api::config::{CatalogConfig, ServerConfig};
use wallbrowse_api::router::build_app_router;
use wallbrowse_api::state::AppState;
use wallbrowse_catalog::ApiKey;

/// Credential configured on every test server.
pub const TEST_API_KEY: &str = "test-catalog-key";

/// The empty result page the catalog sends when nothing matches.
pub const EMPTY_PAGE: &str = r#"{"data":[],"meta":{"current_page":1,"last_page":1,"per_page":24,"total":0,"query":null,"seed":null}}"#;

/// Build a test `ServerConfig` pointing at `catalog_base_url`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 5-second upstream timeout and no upstream retries.
pub fn test_config(catalog_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        catalog: CatalogConfig {
            base_url: catalog_base_url.to_string(),
            api_key: ApiKey::new(TEST_API_KEY).unwrap(),
            timeout_secs: 5,
            max_retries: 0,
        },
    }
}

/// Build the full application router, exactly as `main.rs` does, with the
/// catalog client aimed at `catalog_base_url`.
pub fn build_test_app(catalog_base_url: &str) -> Router {
    let config = test_config(catalog_base_url);
    let state = AppState::from_config(config.clone()).unwrap();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fake catalog service
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: &'static str,
    queries: Arc<Mutex<Vec<String>>>,
}

/// An in-process stand-in for the catalog's `/search` endpoint.
///
/// Answers every request with a fixed status and body and records the raw
/// query-string it received.
pub struct FakeCatalog {
    pub base_url: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalog {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            body,
            queries: Arc::clone(&queries),
        };

        let router = Router::new()
            .route("/search", route_get(fake_search))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            queries,
        }
    }

    /// Every query-string received so far, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> String {
        self.queries()
            .pop()
            .expect("fake catalog received no request")
    }
}

async fn fake_search(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Response {
    state
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());
    (
        state.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// A base URL nothing is listening on.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
