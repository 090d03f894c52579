#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::mail::resend::ResendProvider;
use crate::config::Config;
use crate::services::contact_service::ContactService;
use crate::services::mail::EmailProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Wires the contact service from configuration.
///
/// A missing or blank API key leaves the service unconfigured rather than failing startup.
///
/// # Errors
/// Returns an error if the HTTP client for the email provider cannot be built.
pub fn build_contact_service(config: &Config) -> anyhow::Result<ContactService> {
    let send_timeout = Duration::from_millis(config.mail.send_timeout_ms);

    let provider: Option<Arc<dyn EmailProvider>> = match config.mail.api_key() {
        Some(api_key) => {
            let provider = ResendProvider::new(api_key, &config.mail.resend_base_url, send_timeout)?;
            Some(Arc::new(provider))
        }
        None => {
            tracing::warn!("RESEND_API_KEY is not set; contact submissions will be refused");
            None
        }
    };

    Ok(ContactService::new(provider, config.environment, send_timeout))
}

/// Routes panics through `tracing` so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();

        tracing::error!(location = %location, payload = %payload, "panic");
    }));
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
