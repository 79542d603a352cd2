//! Structured request logging
//!
//! One JSON object per event. Request events carry the correlation id and the
//! request's method, uri, host, remote address and user agent as top-level
//! fields.

use std::fs::OpenOptions;

use actix_web::HttpRequest;
use actix_web::http::header;
use anyhow::Context;
use gandi_rrr_core::CoreError;
use sha2::{Digest, Sha256};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Hex characters kept from the digest.
const ID_LEN: usize = 32;

/// Install the global subscriber, writing to `log_file` or stdout when empty.
///
/// `log` records from the library crates are bridged in. Keep the returned
/// guard alive until exit so buffered lines get flushed.
pub fn init(log_file: &str) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = if log_file.is_empty() {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {log_file}"))?;
        tracing_appender::non_blocking(file)
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

/// Correlation id for one request. Only a grouping aid for log lines.
pub fn correlation_id(unix_nanos: i64, remote_address: &str) -> String {
    let digest = Sha256::digest(format!("{unix_nanos} {remote_address}"));
    let mut id = hex::encode(digest);
    id.truncate(ID_LEN);
    id
}

/// Emit one request event at a fixed level with every request field attached.
macro_rules! request_event {
    ($level:expr, $log:expr, $message:expr) => {
        tracing::event!(
            $level,
            id = %$log.id,
            method = %$log.method,
            uri = %$log.uri,
            host = %$log.host,
            remote_address = %$log.remote_address,
            user_agent = %$log.user_agent,
            "{}",
            $message
        )
    };
}

/// Logger bound to one request.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    id: String,
    method: String,
    uri: String,
    host: String,
    remote_address: String,
    user_agent: String,
}

impl RequestLogger {
    pub fn new(req: &HttpRequest) -> Self {
        let remote_address = req
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default();
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        // Forwarding headers are client-controlled and ignored here
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| req.uri().host())
            .unwrap_or_default();

        Self {
            id: correlation_id(nanos, &remote_address),
            method: req.method().to_string(),
            uri: req.uri().to_string(),
            host: host.to_string(),
            remote_address,
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn message(&self, message: &str) {
        request_event!(Level::INFO, self, message);
    }

    /// Expected failures (bad token, bad input) log at warn, the rest at error.
    pub fn error(&self, err: &CoreError) {
        if err.is_expected() {
            request_event!(Level::WARN, self, err);
        } else {
            request_event!(Level::ERROR, self, err);
        }
    }
}
