use crate::domain::email::OutboundEmail;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Sending domain is not verified: {0}")]
    DomainNotVerified(String),
    #[error("Provider rejected the message: {message}")]
    Rejected { status: Option<u16>, message: String },
    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Could not compose message: {0}")]
    Compose(String),
}

impl DeliveryError {
    /// Maps a provider error description onto an error kind.
    ///
    /// Providers report an unverified sending domain only through their error text, so any
    /// description mentioning `domain` is treated as [`DeliveryError::DomainNotVerified`].
    #[must_use]
    pub fn classify(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("domain") {
            Self::DomainNotVerified(message)
        } else {
            Self::Rejected { status, message }
        }
    }

    /// Applies the same `domain` rule to an error that did not come through [`Self::classify`],
    /// such as a transport failure or a timeout.
    #[must_use]
    pub fn reclassify(self) -> Self {
        match self {
            Self::DomainNotVerified(_) => self,
            other => {
                let description = other.to_string();
                if description.contains("domain") { Self::DomainNotVerified(description) } else { other }
            }
        }
    }
}

#[async_trait]
pub trait EmailProvider: Send + Sync + std::fmt::Debug {
    /// Hands a message to the provider for delivery.
    ///
    /// Returns the provider-assigned message id when the provider reports one.
    ///
    /// # Errors
    /// Returns a [`DeliveryError`] if the provider refuses the message or cannot be reached.
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, DeliveryError>;
}
