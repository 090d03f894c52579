use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Deployment environment; error details are only exposed outside production
    #[arg(long, env = "HOMIFI_ENVIRONMENT", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub mail: MailConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "HOMIFI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "HOMIFI_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (health checks)
    #[arg(long, env = "HOMIFI_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Upper bound on the time spent serving a single request. Both emails are sent inside it,
    /// so keep it above twice `HOMIFI_SEND_TIMEOUT_MS` or slow sends end as 408.
    #[arg(long, env = "HOMIFI_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// How long to wait for in-flight work after a shutdown signal
    #[arg(long, env = "HOMIFI_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,

    /// Comma-separated list of origins allowed to post the contact form cross-origin
    #[arg(long, env = "HOMIFI_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct MailConfig {
    /// Resend API key. When unset, submissions are refused with 503.
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Base URL of the Resend API
    #[arg(long, env = "HOMIFI_RESEND_BASE_URL", default_value = "https://api.resend.com")]
    pub resend_base_url: String,

    /// Timeout applied to each outbound email
    #[arg(long, env = "HOMIFI_SEND_TIMEOUT_MS", default_value_t = 10_000)]
    pub send_timeout_ms: u64,
}

impl MailConfig {
    /// Returns the API key if one is set and not blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.resend_api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP HTTP endpoint for traces and metrics (e.g. `http://localhost:4318`)
    #[arg(long, env = "HOMIFI_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "HOMIFI_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }

    /// Whether the request timeout leaves room for both sequential sends to hit their own timeout.
    #[must_use]
    pub const fn request_timeout_covers_sends(&self) -> bool {
        self.server.request_timeout_secs.saturating_mul(1000) > self.mail.send_timeout_ms.saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_without_api_key() {
        let config = Config::parse_from(["homifi-server"]);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.mail.resend_base_url, "https://api.resend.com");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = Config::parse_from(["homifi-server", "--resend-api-key", "   "]);
        assert!(config.mail.api_key().is_none());

        let config = Config::parse_from(["homifi-server", "--resend-api-key", "re_123"]);
        assert_eq!(config.mail.api_key(), Some("re_123"));
    }

    #[test]
    fn test_environment_flag() {
        let config = Config::parse_from(["homifi-server", "--environment", "development"]);
        assert!(!config.environment.is_production());
    }

    #[test]
    fn test_request_timeout_must_cover_both_sends() {
        let config = Config::parse_from(["homifi-server"]);
        assert!(config.request_timeout_covers_sends());

        let config = Config::parse_from(["homifi-server", "--request-timeout-secs", "20"]);
        assert!(!config.request_timeout_covers_sends());

        let config = Config::parse_from(["homifi-server", "--request-timeout-secs", "20", "--send-timeout-ms", "5000"]);
        assert!(config.request_timeout_covers_sends());
    }
}
