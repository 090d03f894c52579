use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use thiserror::Error;

pub const ACKNOWLEDGEMENT: &str = "Thank you! We'll get back to you within 48 hours.";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[^\s@]+@[^\s@]+\.[^\s]+$")
        .case_insensitive(true)
        .build()
        .expect("email pattern is valid")
});

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields (Name, Email, and Message).")]
    MissingRequiredFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Untrusted form fields as submitted by the website.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub property: Option<String>,
    pub message: Option<String>,
}

/// A contact request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) property: Option<String>,
    pub(crate) message: String,
}

impl ContactSubmission {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = ValidationError;

    /// Required fields are checked before the email format. The email is matched as submitted,
    /// so surrounding whitespace makes it invalid.
    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let email = form.email.filter(|email| !email.trim().is_empty());
        let (Some(name), Some(email), Some(message)) = (non_blank(form.name), email, non_blank(form.message))
        else {
            return Err(ValidationError::MissingRequiredFields);
        };

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self { name, email, phone: non_blank(form.phone), property: non_blank(form.property), message })
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Provider identifiers for the two messages sent for a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub confirmation_message_id: Option<String>,
    pub notification_message_id: Option<String>,
}

impl SubmissionReceipt {
    #[must_use]
    pub const fn acknowledgement(&self) -> &'static str {
        ACKNOWLEDGEMENT
    }
}
