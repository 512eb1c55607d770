//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured address
//!     → listener.rs (parse, bind)
//!     → Hand off to HTTP layer (axum::serve accept loop)
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
