//! # Sitecraft Server Library
//!
//! Shared types and routing for the Sitecraft server.
//! This library is used by both the binary and integration tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use site_core::ProjectStore;
use site_export::SiteExporter;

pub mod config;
pub mod error;
pub mod health;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Project documents.
    pub store: ProjectStore,
    /// Exporter used by the export endpoint.
    pub exporter: Arc<SiteExporter>,
}

impl AppState {
    /// Create state from a store and an exporter.
    #[must_use]
    pub fn new(store: ProjectStore, exporter: SiteExporter) -> Self {
        Self {
            store,
            exporter: Arc::new(exporter),
        }
    }

    /// Get a reference to the project store.
    #[must_use]
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }
}

/// API and health routes, without transport middleware.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness))
        .route("/api/templates", get(routes::list_templates))
        .route("/api/projects", get(routes::list_projects))
        .route(
            "/api/projects/{id}",
            get(routes::get_project).delete(routes::delete_project),
        )
        .route(
            "/api/projects/{id}/design",
            get(routes::get_design).put(routes::put_design),
        )
        .route("/api/projects/{id}/commands", post(routes::apply_command))
        .route(
            "/api/projects/{id}/export/{target}",
            get(routes::export_project),
        )
        .route("/api/projects/{id}/save", post(routes::save_project))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(ProjectStore::new(), SiteExporter::with_defaults()))
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_command_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/projects/default/commands")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"type":"teleport"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_project_design_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/projects/nope/design")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
