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

use homifi_server::api::MgmtState;
use homifi_server::config::Config;
use homifi_server::telemetry;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    homifi_server::setup_panic_hook();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    homifi_server::spawn_signal_handler(shutdown_tx.clone());

    if !config.request_timeout_covers_sends() {
        tracing::warn!(
            request_timeout_secs = config.server.request_timeout_secs,
            send_timeout_ms = config.mail.send_timeout_ms,
            "Request timeout is shorter than two sends; slow deliveries will end as 408"
        );
    }

    let contact_service = homifi_server::build_contact_service(&config)?;
    tracing::info!(
        environment = ?config.environment,
        mail_configured = contact_service.is_configured(),
        "contact service ready"
    );

    let app_router = homifi_server::api::app_router(&config.server, contact_service.clone());
    let mgmt_app = homifi_server::api::mgmt_router(MgmtState { contact_service });

    let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

    let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
    let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

    tracing::info!(address = %api_addr, "listening");
    tracing::info!(address = %mgmt_addr, "management server listening");

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx;
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let servers = async { tokio::try_join!(api_server.into_future(), mgmt_server.into_future()) };

    tokio::select! {
        result = servers => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
            }
        }
        () = async {
            let mut rx = shutdown_tx.subscribe();
            let _ = rx.wait_for(|&s| s).await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            tracing::warn!("Timeout waiting for in-flight requests to finish.");
        }
    }

    let _ = shutdown_tx.send(true);
    telemetry_guard.shutdown();
    Ok(())
}
