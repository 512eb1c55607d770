//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route dispatch)
//!         /livez, /readyz, /healthz → handlers.rs (fixed "ok")
//!         /config.json              → handlers.rs (JSON of ConfigVariables)
//!         anything else             → observability decorators → content resolver
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{build_router, StaticServer};
