use crate::domain::contact::ValidationError;
use crate::services::mail::DeliveryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const NOT_CONFIGURED_MESSAGE: &str = "Email service not configured. Please contact support.";
pub const DELIVERY_FAILED_MESSAGE: &str =
    "Failed to send email. Please try again or contact us directly at info@homifi.ae";
pub const DOMAIN_NOT_VERIFIED_MESSAGE: &str =
    "Email service is being configured. Please contact us directly at info@homifi.ae or call +971 4 000 0000.";
pub const REQUEST_TIMED_OUT_MESSAGE: &str =
    "Request timed out. Please try again or contact us directly at info@homifi.ae";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotConfigured,
    ValidationFailed,
    DeliveryFailed,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email service not configured")]
    NotConfigured,
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),
    #[error("Malformed request body")]
    MalformedBody { detail: Option<String> },
    #[error("Delivery failed: {source}")]
    Delivery {
        #[source]
        source: DeliveryError,
        detail: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured => ErrorKind::NotConfigured,
            Self::Validation(_) | Self::MalformedBody { .. } => ErrorKind::ValidationFailed,
            Self::Delivery { .. } => ErrorKind::DeliveryFailed,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorKind::DeliveryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text that is safe to show to the person who submitted the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            Self::Validation(e) => e.to_string(),
            Self::MalformedBody { .. } => ValidationError::MissingRequiredFields.to_string(),
            Self::Delivery { source: DeliveryError::DomainNotVerified(_), .. } => {
                DOMAIN_NOT_VERIFIED_MESSAGE.to_string()
            }
            Self::Delivery { .. } => DELIVERY_FAILED_MESSAGE.to_string(),
        }
    }

    /// Raw error description; only populated outside production.
    #[must_use]
    pub fn debug_detail(&self) -> Option<&str> {
        match self {
            Self::MalformedBody { detail } | Self::Delivery { detail, .. } => detail.as_deref(),
            Self::NotConfigured | Self::Validation(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotConfigured => {
                tracing::warn!("Contact submission refused: email service not configured");
            }
            Self::Validation(e) => {
                tracing::debug!(reason = %e, "Contact submission failed validation");
            }
            Self::MalformedBody { .. } => {
                tracing::debug!("Contact submission body could not be parsed");
            }
            Self::Delivery { source, .. } => {
                tracing::error!(error = %source, "Contact email delivery failed");
            }
        }

        let status = self.status();
        let body = self.debug_detail().map_or_else(
            || json!({ "error": self.user_message() }),
            |detail| json!({ "error": self.user_message(), "details": detail }),
        );

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotConfigured.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::from(ValidationError::InvalidEmail).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MalformedBody { detail: None }.kind(), ErrorKind::ValidationFailed);

        let err = AppError::Delivery { source: DeliveryError::Transport("reset".into()), detail: None };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), DELIVERY_FAILED_MESSAGE);
    }

    #[test]
    fn test_domain_errors_get_specific_message() {
        let err = AppError::Delivery {
            source: DeliveryError::classify(Some(403), "The homifi.ae domain is not verified"),
            detail: None,
        };
        assert_eq!(err.user_message(), DOMAIN_NOT_VERIFIED_MESSAGE);
        assert!(err.user_message().contains("+971"));
    }
}
