use crate::config::Environment;
use crate::domain::contact::{ContactForm, ContactSubmission, SubmissionReceipt};
use crate::domain::email::{CONFIRMATION_SENDER, INTERNAL_INBOX, NOTIFICATION_SENDER, OutboundEmail, REPLY_TO};
use crate::error::{AppError, Result};
use crate::services::mail::templates::{self, TemplateKind};
use crate::services::mail::{DeliveryError, EmailProvider};
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
struct Metrics {
    submissions_total: Counter<u64>,
    delivery_duration_seconds: Histogram<f64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("homifi-server");
        Self {
            submissions_total: meter
                .u64_counter("contact_submissions_total")
                .with_description("Contact form submissions by outcome")
                .build(),
            delivery_duration_seconds: meter
                .f64_histogram("contact_delivery_duration_seconds")
                .with_description("Time taken by the email provider to accept a message")
                .build(),
        }
    }

    fn record_outcome(&self, outcome: &'static str) {
        self.submissions_total.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

/// Turns contact form submissions into a customer confirmation and an internal notification.
#[derive(Clone, Debug)]
pub struct ContactService {
    provider: Option<Arc<dyn EmailProvider>>,
    environment: Environment,
    send_timeout: Duration,
    metrics: Metrics,
}

impl ContactService {
    /// A `None` provider means no delivery credential was configured; every submission is then
    /// refused with [`AppError::NotConfigured`].
    #[must_use]
    pub fn new(provider: Option<Arc<dyn EmailProvider>>, environment: Environment, send_timeout: Duration) -> Self {
        Self { provider, environment, send_timeout, metrics: Metrics::new() }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Builds the error returned when the request body is not a valid submission document.
    #[must_use]
    pub fn malformed_body(&self, detail: String) -> AppError {
        self.metrics.record_outcome("invalid");
        AppError::MalformedBody { detail: self.debug_detail(detail) }
    }

    /// Validates a submission and sends both emails, confirmation first.
    ///
    /// Identical submissions are not deduplicated.
    ///
    /// # Errors
    /// Returns `AppError::NotConfigured` before doing anything else if no provider is set,
    /// `AppError::Validation` if the form is incomplete or the email is malformed, and
    /// `AppError::Delivery` if either message could not be sent.
    #[tracing::instrument(skip_all, fields(confirmation_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn submit(&self, form: ContactForm) -> Result<SubmissionReceipt> {
        let Some(provider) = self.provider.as_ref() else {
            self.metrics.record_outcome("not_configured");
            return Err(AppError::NotConfigured);
        };

        let submission = ContactSubmission::try_from(form).inspect_err(|_| {
            self.metrics.record_outcome("invalid");
        })?;

        match self.deliver(provider.as_ref(), &submission).await {
            Ok(receipt) => {
                self.metrics.record_outcome("sent");
                tracing::info!(
                    confirmation_id = ?receipt.confirmation_message_id,
                    notification_id = ?receipt.notification_message_id,
                    "Contact submission delivered"
                );
                Ok(receipt)
            }
            Err(source) => {
                self.metrics.record_outcome("failed");
                let detail = self.debug_detail(source.to_string());
                Err(AppError::Delivery { source: source.reclassify(), detail })
            }
        }
    }

    async fn deliver(
        &self,
        provider: &dyn EmailProvider,
        submission: &ContactSubmission,
    ) -> std::result::Result<SubmissionReceipt, DeliveryError> {
        let submitted_at = templates::format_submitted_at(OffsetDateTime::now_utc())
            .map_err(|e| DeliveryError::Compose(e.to_string()))?;

        let confirmation = compose(
            &TemplateKind::Confirmation,
            submission,
            CONFIRMATION_SENDER,
            submission.email(),
        );
        let confirmation_message_id = self.send(provider, &confirmation, "confirmation").await?;
        tracing::Span::current().record("confirmation_id", tracing::field::debug(&confirmation_message_id));

        let notification =
            compose(&TemplateKind::Notification { submitted_at }, submission, NOTIFICATION_SENDER, INTERNAL_INBOX);
        let notification_message_id = self.send(provider, &notification, "notification").await.inspect_err(|e| {
            tracing::error!(
                error = %e,
                confirmation_id = ?confirmation_message_id,
                "Customer was sent a confirmation but the internal notification failed; lead needs manual follow-up"
            );
        })?;

        Ok(SubmissionReceipt { confirmation_message_id, notification_message_id })
    }

    async fn send(
        &self,
        provider: &dyn EmailProvider,
        email: &OutboundEmail,
        kind: &'static str,
    ) -> std::result::Result<Option<String>, DeliveryError> {
        let start = Instant::now();
        let result = tokio::time::timeout(self.send_timeout, provider.send(email))
            .await
            .unwrap_or_else(|_| Err(DeliveryError::Timeout(self.send_timeout)));

        self.metrics.delivery_duration_seconds.record(
            start.elapsed().as_secs_f64(),
            &[KeyValue::new("kind", kind), KeyValue::new("status", if result.is_ok() { "ok" } else { "error" })],
        );

        result
    }

    fn debug_detail(&self, detail: String) -> Option<String> {
        (!self.environment.is_production()).then_some(detail)
    }
}

fn compose(kind: &TemplateKind, submission: &ContactSubmission, sender: &str, recipient: &str) -> OutboundEmail {
    let rendered = templates::render(kind, submission);
    OutboundEmail {
        from: sender.to_string(),
        to: recipient.to_string(),
        reply_to: REPLY_TO.to_string(),
        subject: rendered.subject,
        html: rendered.html,
        text: rendered.text,
    }
}
