//! Static content subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → path.rs (decode, root, lexical clean)
//!     → resolver.rs
//!         exists / other error → ServeDir (conditional, range, MIME)
//!         not found + fallback → index.html, written verbatim
//! ```
//!
//! # Design Decisions
//! - The cleaned path is returned explicitly, the request is never rewritten
//! - ServeDir enforces the root boundary on its own as well

pub mod path;
pub mod resolver;

pub use path::sanitise_path;
pub use resolver::ContentResolver;
