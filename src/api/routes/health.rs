//! Health Routes
//!
//! Probes for load balancers and orchestrators.
//!
//! - GET /health/live - The process answers
//! - GET /health/ready - The assistants have model credentials
//! - GET /health - Status, model configuration, uptime and version

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Pages render without an API key but the assistants only apologize, so
/// the portal is not ready until one is configured.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.assistant.is_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model_ok = state.assistant.is_configured();

    Json(HealthResponse {
        status: if model_ok { "healthy" } else { "degraded" }.to_string(),
        model: if model_ok { "configured" } else { "missing_api_key" }.to_string(),
        provider: state.assistant.provider().to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{Assistant, ModelSet};
    use crate::config::ServerConfig;
    use crate::content::Catalog;
    use crate::gemini::testing::ScriptedModel;

    fn state() -> Arc<AppState> {
        let assistant = Assistant::new(Arc::new(ScriptedModel::text("ok")), ModelSet::default());
        Arc::new(AppState::new(
            Catalog::builtin(),
            assistant,
            ServerConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_live_always_ok() {
        assert_eq!(liveness().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_with_configured_model() {
        assert_eq!(readiness(State(state())).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_full_health_reports_provider() {
        let Json(health) = full_health(State(state())).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.model, "configured");
        assert_eq!(health.provider, "scripted");
    }
}
