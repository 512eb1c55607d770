//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Content request
//!     → metrics.rs middleware (outermost, own recorder)
//!     → logging.rs middleware (own recorder)
//!     → content resolver
//!     ← recorder.rs observes status and bytes as the body streams out
//!     → counters/histograms updated, access log line emitted
//!
//! Consumers:
//!     → stderr (key=value lines)
//!     → Metrics endpoint (Prometheus scrape, separate listener)
//! ```
//!
//! # Design Decisions
//! - Each decorator wraps the response in its own recorder
//! - Metrics live in an explicitly constructed `HttpMetrics`, passed by `Arc`
//! - Either decorator may be enabled on its own

pub mod logging;
pub mod metrics;
pub mod recorder;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::config::ObservabilityConfig;
use crate::observability::metrics::HttpMetrics;

/// Observability capabilities applied to the content routes.
#[derive(Clone, Default)]
pub struct Observability {
    pub metrics: Option<Arc<HttpMetrics>>,
    pub access_log: bool,
}

impl Observability {
    /// Build the capability set described by the config.
    pub fn from_config(
        config: &ObservabilityConfig,
    ) -> Result<Self, metrics_exporter_prometheus::BuildError> {
        let metrics = if config.metrics_enabled {
            Some(Arc::new(HttpMetrics::new()?))
        } else {
            None
        };
        Ok(Self {
            metrics,
            access_log: config.access_log,
        })
    }

    /// Wrap `router` with the enabled decorators, metrics outermost.
    pub fn apply(&self, router: Router) -> Router {
        let router = if self.access_log {
            router.layer(middleware::from_fn(logging::access_log_middleware))
        } else {
            router
        };
        match &self.metrics {
            Some(metrics) => router.layer(middleware::from_fn_with_state(
                metrics.clone(),
                metrics::metrics_middleware,
            )),
            None => router,
        }
    }
}
