use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{
    Expiry, SessionManagerLayer,
    cookie::{Key, SameSite},
};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::services::{ArticleService, AuthService};
use crate::state::SharedState;

mod articles;
mod assets;
pub mod auth;
mod context;
mod error;
pub mod flash;
mod observability;
mod validation;
mod views;

pub use context::PageContext;
pub use error::WebError;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn article_service(&self) -> &Arc<dyn ArticleService> {
        &self.shared.article_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let config = state.config();

    // Sessions live in the same SQLite file as the content.
    let session_store = SqliteStore::new(state.store().conn.get_sqlite_connection_pool().clone());
    session_store
        .migrate()
        .await
        .context("Failed to create session table")?;

    let expiry = config
        .server
        .session_idle_minutes
        .map_or(Expiry::OnSessionEnd, |minutes| {
            Expiry::OnInactivity(time::Duration::minutes(minutes))
        });

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.server.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(expiry)
        .with_signed(signing_key(&config.security.secret_key));

    let protected_routes = create_protected_router(state.clone());

    Ok(Router::new()
        .route("/", get(articles::index).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/static/{*path}", get(assets::serve_asset))
        .merge(protected_routes)
        .fallback(articles::not_found)
        .layer(session_layer)
        .with_state(state)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http()))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/ariticle/edit/{id}",
            get(articles::edit_form).post(articles::update_article),
        )
        .route("/ariticle/delete/{id}", post(articles::delete_article))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::require_login))
}

/// Stretches the configured secret to the 64 bytes a cookie `Key` needs.
fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
