#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use quillpad::config::Config;
use quillpad::db::{AdminCredentials, Store};
use quillpad::state::SharedState;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "hunter2";

/// A router backed by its own throwaway SQLite file, plus the cookie jar of
/// a single browser.
pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub config: Config,
    cookie: Option<String>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn test_config() -> (Config, PathBuf) {
    let db_path =
        std::env::temp_dir().join(format!("quillpad-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.security.secret_key = "test-secret".to_string();
    config.observability.metrics_enabled = false;
    (config, db_path)
}

pub async fn spawn_app() -> TestApp {
    let (config, db_path) = test_config();
    spawn_app_with(config, db_path).await
}

pub async fn spawn_app_with(config: Config, db_path: PathBuf) -> TestApp {
    let store = Store::from_config(&config.general)
        .await
        .expect("Failed to open test database");

    let shared = Arc::new(SharedState::with_store(config.clone(), store.clone()));
    let state = quillpad::api::create_app_state(shared, None);
    let router = quillpad::api::router(state)
        .await
        .expect("Failed to build router");

    TestApp {
        router,
        store,
        config,
        cookie: None,
        db_path,
    }
}

impl TestApp {
    pub async fn seed_admin(&self) {
        self.store
            .upsert_admin(
                &AdminCredentials {
                    username: ADMIN_USERNAME,
                    password: ADMIN_PASSWORD,
                    name: Some("Ada"),
                },
                &self.config.security,
            )
            .await
            .expect("Failed to seed admin");
    }

    /// Sends a request with the current session cookie and keeps whatever
    /// cookie the response sets.
    pub async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let mut request = request;
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str().unwrap();
            let pair = set_cookie.split(';').next().unwrap().trim().to_string();
            let expired = set_cookie.contains("Max-Age=0") || pair.ends_with('=');
            self.cookie = if expired { None } else { Some(pair) };
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn login(&mut self) -> Response<Body> {
        self.post_form(
            "/",
            &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
        )
        .await
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
