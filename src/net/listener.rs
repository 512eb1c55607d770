//! TCP listener setup.
//!
//! # Responsibilities
//! - Resolve and bind configured addresses, `:port` meaning all interfaces
//! - Report bind failures as fatal startup errors
//!
//! # Design Decisions
//! - No admission control: concurrency is bounded only by the accept loop
//!   and available resources

use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to resolve or bind the address.
    Bind(String, std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(addr, e) => write!(f, "Failed to bind {}: {}", addr, e),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Bind(_, e) => Some(e),
        }
    }
}

/// Fill in the wildcard host for the `:port` shorthand.
pub fn normalise_address(address: &str) -> String {
    if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    }
}

/// Bind a TCP listener to `address`, resolving host names.
pub async fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    let address = normalise_address(address);

    let listener = TcpListener::bind(address.as_str())
        .await
        .map_err(|e| ListenerError::Bind(address.clone(), e))?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::debug!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}
