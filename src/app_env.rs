use anyhow::Context;
use std::env;
use std::net::SocketAddr;

/// URL for accessing the PostgreSQL database (should contain a database name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Maximum number of pooled database connections. Defaults to [DEFAULT_MAX_CONNECTIONS].
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
/// Socket address the HTTP server listens on. Defaults to [DEFAULT_SERVER_ADDR].
pub const SERVER_ADDR: &str = "SERVER_ADDR";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Endpoints for exporting OpenTelemetry data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtelEndpoints {
    pub span_export_url: String,
    pub metric_export_url: String,
}

/// Process configuration assembled from environment variables at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_url: String,
    pub db_max_connections: u32,
    pub server_addr: SocketAddr,
    /// Only present when both OpenTelemetry export URLs are configured
    pub otel: Option<OtelEndpoints>,
}

impl AppConfig {
    /// Reads the application's configuration from the process environment
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup so parsing can be tested without
    /// touching the process environment
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let db_url = lookup(DB_URL).with_context(|| format!("{DB_URL} must be set"))?;

        let db_max_connections = match lookup(DB_MAX_CONNECTIONS) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("{DB_MAX_CONNECTIONS} was not a valid number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let raw_addr = lookup(SERVER_ADDR).unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_owned());
        let server_addr = raw_addr
            .parse()
            .with_context(|| format!("{SERVER_ADDR} was not a valid socket address: {raw_addr}"))?;

        let otel = match (lookup(OTEL_SPAN_EXPORT_URL), lookup(OTEL_METRIC_EXPORT_URL)) {
            (Some(span_export_url), Some(metric_export_url)) => Some(OtelEndpoints {
                span_export_url,
                metric_export_url,
            }),
            _ => None,
        };

        Ok(AppConfig {
            db_url,
            db_max_connections,
            server_addr,
            otel,
        })
    }
}
