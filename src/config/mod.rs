//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line
//!     → args.rs (clap parse)
//!     → StaticConfig (schema.rs, serde defaults)
//!     → validation.rs (semantic checks)
//!     → immutable, shared by value/Arc with all subsystems
//!
//! environment
//!     → variables.rs (names listed on the command line)
//!     → ConfigVariables, served as /config.json
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (clap/serde) from semantic checks

pub mod args;
pub mod schema;
pub mod validation;
pub mod variables;

pub use args::Args;
pub use schema::StaticConfig;
pub use schema::{ContentConfig, EndpointConfig, ListenerConfig, ObservabilityConfig};
pub use variables::ConfigVariables;
