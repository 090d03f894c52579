use crate::domain::contact::{ContactForm, SubmissionReceipt};
use serde::{Deserialize, Serialize};

/// Contact form body. Every field is optional at the wire level so that missing and blank
/// fields produce the same validation error.
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub property: Option<String>,
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactForm {
    fn from(request: ContactRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            property: request.property,
            message: request.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_email_id: Option<String>,
}

impl From<SubmissionReceipt> for SubmissionResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: receipt.acknowledgement().to_string(),
            customer_email_id: receipt.confirmation_message_id,
            internal_email_id: receipt.notification_message_id,
        }
    }
}
