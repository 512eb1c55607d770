//! Static content server for single page applications.
//!
//! Serves a directory over HTTP, optionally substituting `index.html` for
//! missing paths so client-side routers can own the URL space. Alongside the
//! content it offers Kubernetes probes, a `/config.json` document built from
//! selected environment variables, a key=value access log and Prometheus
//! request metrics on a separate listener.

// Core subsystems
pub mod config;
pub mod content;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::schema::StaticConfig;
pub use content::ContentResolver;
pub use error::ServerError;
pub use http::StaticServer;
pub use lifecycle::Shutdown;

/// Version reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
