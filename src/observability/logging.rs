//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Access log middleware for the content routes
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging on stderr
//! - Log level configurable via config and `RUST_LOG`
//! - Access lines get their own layer: bare `key=value` tokens, no timestamp,
//!   level, target or colour, regardless of the operational log level
//! - A panicking handler produces no access log line for its request

use std::io::IsTerminal;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{extract::Request, middleware::Next, response::Response};
use percent_encoding::percent_decode_str;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    filter::{filter_fn, FilterExt, Targets},
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::observability::recorder;

/// Target of the per-request access log events.
pub const ACCESS_TARGET: &str = "staticsrv::access";

/// Install the global tracing subscriber.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(operational_layer(
            std::io::stderr,
            log_level,
            std::io::stderr().is_terminal(),
        ))
        .with(access_layer(std::io::stderr))
        .init();
}

/// Human oriented server log, everything except access lines.
pub fn operational_layer<S, W>(
    writer: W,
    log_level: &str,
    ansi: bool,
) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("staticsrv={log_level}").into());
    fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_filter(level.and(filter_fn(|meta| meta.target() != ACCESS_TARGET)))
}

/// One plain `key=value` line per access event.
pub fn access_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_filter(Targets::new().with_target(ACCESS_TARGET, Level::INFO))
}

/// Emit one access log line per request once its response has been sent.
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();

    let response = next.run(request).await;

    recorder::record(response, move |recorded| {
        let duration = start.elapsed();
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        tracing::info!(
            target: ACCESS_TARGET,
            method = %method,
            duration = ?duration,
            size = %human_size(recorded.bytes_written()),
            size_bytes = recorded.bytes_written(),
            status = recorded.status().as_u16(),
            path = ?path,
            time = time as u64,
        );
    })
}

const DECIMAL_UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Human readable size using decimal (1000) multiples and four significant
/// digits, e.g. `0B`, `512B`, `1.234kB`, `44.1MB`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < DECIMAL_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    let integer_digits = if value >= 100.0 {
        3
    } else if value >= 10.0 {
        2
    } else {
        1
    };
    let mut number = format!("{:.*}", 4 - integer_digits, value);
    if number.contains('.') {
        number.truncate(number.trim_end_matches('0').trim_end_matches('.').len());
    }

    format!("{}{}", number, DECIMAL_UNITS[unit])
}
