//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request metrics (count, latency, response size)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `staticsrv_http_requests_total` (counter): requests by method, status
//! - `staticsrv_http_requests_duration_seconds` (histogram): latency distribution
//! - `staticsrv_http_requests_size_bytes` (histogram): bytes written per response
//!
//! # Design Decisions
//! - The recorder is owned by `HttpMetrics`, never installed globally
//! - Low-overhead metric updates (atomic operations)
//! - Bucket boundaries are a contract with dashboards, keep them as is

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use metrics::{Counter, Histogram, Key, KeyName, Label, Level, Metadata, Recorder};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};

use crate::observability::recorder;

pub const REQUESTS_TOTAL: &str = "staticsrv_http_requests_total";
pub const REQUEST_DURATION: &str = "staticsrv_http_requests_duration_seconds";
pub const RESPONSE_SIZE: &str = "staticsrv_http_requests_size_bytes";

/// Duration buckets in seconds. `+Inf` is implicit.
pub const DURATION_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 1.0, 2.0, 5.0, 10.0,
];

/// Size buckets in bytes. `+Inf` is implicit.
pub const SIZE_BUCKETS: &[f64] = &[
    0.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0, 256.0, 512.0, 1024.0, 2048.0, 4094.0, 8192.0,
];

static METADATA: Metadata<'static> = Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

/// Request metrics, constructed once at startup and shared by every request.
pub struct HttpMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    duration: Histogram,
    size: Histogram,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.to_string()), DURATION_BUCKETS)?
            .set_buckets_for_metric(Matcher::Full(RESPONSE_SIZE.to_string()), SIZE_BUCKETS)?
            .build_recorder();

        recorder.describe_counter(
            KeyName::from_const_str(REQUESTS_TOTAL),
            None,
            "The total number of processed HTTP requests".into(),
        );
        recorder.describe_histogram(
            KeyName::from_const_str(REQUEST_DURATION),
            None,
            "Time it has taken to process HTTP requests".into(),
        );
        recorder.describe_histogram(
            KeyName::from_const_str(RESPONSE_SIZE),
            None,
            "Bytes written to the client over HTTP".into(),
        );

        let duration = recorder.register_histogram(&Key::from_static_name(REQUEST_DURATION), &METADATA);
        let size = recorder.register_histogram(&Key::from_static_name(RESPONSE_SIZE), &METADATA);
        let handle = recorder.handle();

        Ok(Self {
            recorder,
            handle,
            duration,
            size,
        })
    }

    fn requests(&self, method: &str, status: u16) -> Counter {
        let labels = vec![
            Label::new("method", method.to_string()),
            Label::new("status", status.to_string()),
        ];
        self.recorder
            .register_counter(&Key::from_parts(REQUESTS_TOTAL, labels), &METADATA)
    }

    /// Record the outcome of one request.
    pub fn observe(&self, method: &str, status: u16, elapsed: Duration, bytes_written: u64) {
        self.requests(method, status).increment(1);
        self.duration.record(elapsed.as_secs_f64());
        self.size.record(bytes_written as f64);
    }

    /// Render the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Count the request and observe its latency and size once the response is sent.
pub async fn metrics_middleware(
    State(metrics): State<Arc<HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = next.run(request).await;

    recorder::record(response, move |recorded| {
        metrics.observe(
            method.as_str(),
            recorded.status().as_u16(),
            start.elapsed(),
            recorded.bytes_written(),
        );
    })
}

/// Router serving the exposition format on `path`.
pub fn exposition_router(metrics: Arc<HttpMetrics>, path: &str) -> Router {
    Router::new()
        .route(path, get(render_metrics))
        .with_state(metrics)
}

async fn render_metrics(State(metrics): State<Arc<HttpMetrics>>) -> String {
    metrics.render()
}
