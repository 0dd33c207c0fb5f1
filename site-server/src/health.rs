//! Health check endpoints.
//!
//! - `/health/live` - the process is up
//! - `/health/ready` - the persistence directory is usable
//! - `/health` - same as `/health/ready`

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Number of projects held in memory
    pub projects: usize,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Data directory present, or persistence disabled
    pub persistence: bool,
}

/// Liveness probe.
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let projects = state.store.project_ids().len();
    let persistence_ok = state.store.data_dir().is_none_or(std::path::Path::is_dir);

    let status = HealthStatus {
        status: if persistence_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        projects,
        checks: HealthChecks {
            persistence: persistence_ok,
        },
    };
    let code = if persistence_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus {
            status: "healthy",
            version: "0.2.0",
            projects: 1,
            checks: HealthChecks {
                persistence: true,
            },
        };

        let json = serde_json::to_string(&status).expect("should serialize");
        assert!(json.contains("healthy"));
        assert!(json.contains("0.2.0"));
        assert!(json.contains("\"projects\":1"));
        assert!(json.contains("persistence"));
    }

    #[test]
    fn test_health_status_unhealthy() {
        let status = HealthStatus {
            status: "unhealthy",
            version: "0.2.0",
            projects: 0,
            checks: HealthChecks {
                persistence: false,
            },
        };

        let json = serde_json::to_string(&status).expect("should serialize");
        assert!(json.contains("unhealthy"));
        assert!(json.contains("false"));
    }
}
