#![allow(dead_code)]
use async_trait::async_trait;
use homifi_server::api::{self, MgmtState};
use homifi_server::config::{Environment, ServerConfig};
use homifi_server::domain::email::OutboundEmail;
use homifi_server::services::contact_service::ContactService;
use homifi_server::services::mail::{DeliveryError, EmailProvider};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("homifi_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub type SendOutcome = Result<Option<String>, DeliveryError>;

/// Records every message and answers from a script; once the script runs out it accepts
/// messages without an id.
#[derive(Debug, Default)]
pub struct StubProvider {
    replies: Mutex<VecDeque<SendOutcome>>,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(replies: Vec<SendOutcome>) -> Arc<Self> {
        Arc::new(Self { replies: Mutex::new(replies.into()), sent: Mutex::default() })
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailProvider for StubProvider {
    async fn send(&self, email: &OutboundEmail) -> SendOutcome {
        self.sent.lock().unwrap().push(email.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

/// Never answers; used to exercise timeouts.
#[derive(Debug)]
pub struct HangingProvider;

#[async_trait]
impl EmailProvider for HangingProvider {
    async fn send(&self, _email: &OutboundEmail) -> SendOutcome {
        std::future::pending().await
    }
}

pub fn get_test_server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        mgmt_port: 0,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 1,
        cors_origins: vec!["https://homifi.ae".to_string()],
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(provider: Option<Arc<StubProvider>>, environment: Environment) -> Self {
        let provider = provider.map(|p| p as Arc<dyn EmailProvider>);
        Self::spawn_with(provider, environment, get_test_server_config()).await
    }

    pub async fn spawn_with(
        provider: Option<Arc<dyn EmailProvider>>,
        environment: Environment,
        config: ServerConfig,
    ) -> Self {
        setup_tracing();

        let contact_service = ContactService::new(provider, environment, Duration::from_secs(5));

        let app = api::app_router(&config, contact_service.clone());
        let mgmt = api::mgmt_router(MgmtState { contact_service });

        let server_url = serve(app).await;
        let mgmt_url = serve(mgmt).await;

        Self { server_url, mgmt_url, client: reqwest::Client::new() }
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client.post(format!("{}/api/contact", self.server_url)).json(body).send().await.unwrap()
    }
}

async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn ahmed() -> serde_json::Value {
    serde_json::json!({
        "name": "Ahmed",
        "email": "ahmed@example.com",
        "phone": "+971501234567",
        "property": "Villa",
        "message": "Interested in lighting"
    })
}
