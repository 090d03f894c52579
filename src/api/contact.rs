use crate::api::AppState;
use crate::api::schemas::contact::{ContactRequest, SubmissionResponse};
use crate::error::Result;
use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};

/// Accepts a contact form submission and sends the confirmation and notification emails.
///
/// An unconfigured server answers 503 even for malformed bodies, so a body that fails to parse
/// is only reported when an email provider is available.
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if state.contact_service.is_configured() => {
            return Err(state.contact_service.malformed_body(rejection.body_text()));
        }
        Err(_) => ContactRequest::default(),
    };

    let receipt = state.contact_service.submit(request.into()).await?;
    Ok(Json(SubmissionResponse::from(receipt)))
}
