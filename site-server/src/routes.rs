//! API route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use site_core::{templates, Command, DesignSnapshot, DocumentSummary, Template};
use site_export::{ExportArtifact, ExportTarget};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Known project ids.
#[derive(Debug, Serialize)]
pub struct ProjectList {
    /// Sorted ids.
    pub projects: Vec<String>,
}

/// Result of one command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    /// Command name as received.
    pub command: &'static str,
    /// Whether the design or editor state changed.
    pub changed: bool,
    /// Id of a component, group or page the command created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Editor state after the command.
    pub state: DocumentSummary,
}

/// Generated export files.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Target that produced the files.
    pub target: ExportTarget,
    /// Files in output order.
    pub artifacts: Vec<ExportArtifact>,
}

/// Where a project was written.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    /// Project id.
    pub project: String,
    /// File path on the server.
    pub path: String,
}

/// `GET /api/projects`
#[tracing::instrument(name = "list_projects", skip(state))]
pub async fn list_projects(State(state): State<AppState>) -> Json<ProjectList> {
    Json(ProjectList {
        projects: state.store.project_ids(),
    })
}

/// `GET /api/projects/{id}`
#[tracing::instrument(name = "get_project", skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DocumentSummary>> {
    let document = state.store.get(&id).ok_or(ApiError::NotFound(id))?;
    Ok(Json(document.summary()))
}

/// `DELETE /api/projects/{id}`
#[tracing::instrument(name = "delete_project", skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store.remove(&id) {
        tracing::info!(project = %id, "Deleted project");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// `GET /api/projects/{id}/design`
#[tracing::instrument(name = "get_design", skip(state))]
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DesignSnapshot>> {
    Ok(Json(state.store.snapshot(&id)?))
}

/// `PUT /api/projects/{id}/design`
///
/// Accepts a snapshot or a legacy single-page design. On failure the stored
/// design is left as it was.
#[tracing::instrument(name = "put_design", skip(state, body), fields(bytes = body.len()))]
pub async fn put_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> ApiResult<Json<DocumentSummary>> {
    let summary = state.store.import(&id, &body)?;
    tracing::info!(project = %id, pages = summary.pages.len(), "Imported design");
    Ok(Json(summary))
}

/// `POST /api/projects/{id}/commands`
#[tracing::instrument(name = "apply_command", skip(state, body))]
pub async fn apply_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> ApiResult<Json<CommandResponse>> {
    let command: Command =
        serde_json::from_str(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let name = command.name();
    let (outcome, summary) = state.store.apply(&id, command)?;
    tracing::debug!(project = %id, command = name, changed = outcome.changed, "Applied command");
    Ok(Json(CommandResponse {
        command: name,
        changed: outcome.changed,
        created: outcome.created,
        state: summary,
    }))
}

/// `GET /api/projects/{id}/export/{target}`
#[tracing::instrument(name = "export_project", skip(state))]
pub async fn export_project(
    State(state): State<AppState>,
    Path((id, target)): Path<(String, String)>,
) -> ApiResult<Json<ExportResponse>> {
    let target: ExportTarget = target.parse()?;
    let document = state.store.get(&id).ok_or(ApiError::NotFound(id))?;
    let artifacts = state.exporter.export_document(&document, target)?;
    Ok(Json(ExportResponse { target, artifacts }))
}

/// `POST /api/projects/{id}/save`
#[tracing::instrument(name = "save_project", skip(state))]
pub async fn save_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SaveResponse>> {
    let path = state.store.save(&id)?;
    Ok(Json(SaveResponse {
        project: id,
        path: path.display().to_string(),
    }))
}

/// `GET /api/templates`
#[tracing::instrument(name = "list_templates")]
pub async fn list_templates() -> Json<Vec<Template>> {
    Json(templates::all())
}
