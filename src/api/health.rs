use crate::api::MgmtState;
use crate::api::schemas::health::HealthResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Liveness check: returns 200 OK as long as the server is running.
pub async fn livez() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness check. A missing mail credential is a valid state, so it is reported but does not
/// fail the check.
pub async fn readyz(State(state): State<MgmtState>) -> impl IntoResponse {
    let mail = if state.contact_service.is_configured() {
        "ok"
    } else {
        tracing::debug!(component = "mail", "Email provider not configured");
        "not_configured"
    };

    Json(HealthResponse { status: "ok".to_string(), mail: mail.to_string() })
}
