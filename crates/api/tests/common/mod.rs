#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use menagerie_api::config::{ServerConfig, DEFAULT_NINJA_API_URL};
use menagerie_api::router::build_app_router;
use menagerie_api::state::AppState;
use menagerie_core::taxonomy::{LookupError, TaxonomyLookup, TaxonomyRecord};
use menagerie_store::{PictureStore, Registry};
use menagerie_upstream::HttpPictureFetcher;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(pictures_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        pictures_dir: pictures_dir.to_path_buf(),
        ninja_api_url: DEFAULT_NINJA_API_URL.to_string(),
        ninja_api_key: String::new(),
        upstream_timeout_secs: 5,
    }
}

/// Fixed taxonomy answers so tests never leave the process for lookups.
///
/// `Outage` simulates an upstream failure; unknown names have no match.
pub struct StaticLookup;

#[async_trait]
impl TaxonomyLookup for StaticLookup {
    async fn lookup(&self, name: &str) -> Result<Option<TaxonomyRecord>, LookupError> {
        let record = |family: &str, genus: &str, attributes: &[&str], lifespan: Option<u32>| {
            Some(TaxonomyRecord {
                family: Some(family.to_string()),
                genus: Some(genus.to_string()),
                attributes: attributes.iter().map(|a| a.to_string()).collect(),
                lifespan,
            })
        };

        Ok(match name.trim().to_lowercase().as_str() {
            "golden retriever" => record("Canidae", "Canis", &["friendly", "loyal"], Some(10)),
            "poodle" => record("Canidae", "Canis", &["smart"], Some(12)),
            "tiger" => record("Felidae", "Panthera", &["solitary"], Some(10)),
            "lion" => record("Felidae", "Panthera", &["social"], Some(8)),
            "outage" => return Err(LookupError("API response code 503".to_string())),
            _ => None,
        })
    }
}

/// A running application plus the temporary picture directory it owns.
///
/// The router is cloned per request; all clones share state.
pub struct TestApp {
    pub router: Router,
    pub pictures: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let pictures = TempDir::new().expect("create temp pictures dir");
        let config = test_config(pictures.path());
        let fetcher = HttpPictureFetcher::new(Duration::from_secs(config.upstream_timeout_secs))
            .expect("build picture client");

        let state = AppState {
            config: Arc::new(config.clone()),
            registry: Arc::new(Registry::new()),
            lookup: Arc::new(StaticLookup),
            pictures: PictureStore::new(pictures.path(), Arc::new(fetcher)),
        };

        Self {
            router: build_app_router(state, &config),
            pictures,
        }
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Names of the files currently stored in the picture directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.pictures.path())
            .expect("read pictures dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Create a pet type and return its id.
    pub async fn create_type(&self, name: &str) -> String {
        let response = post_json(self.app(), "/pet-types", serde_json::json!({ "type": name })).await;
        assert_eq!(response.status(), 201, "creating pet type {name}");
        body_json(response).await["id"]
            .as_str()
            .expect("id is a string")
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::POST, uri, Some("application/json"), body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::PUT, uri, Some("application/json"), body.to_string()).await
}

/// Send an arbitrary body with an optional content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    send(app, builder.body(body.into()).unwrap()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body is JSON")
}
