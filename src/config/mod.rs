//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (apply API_SERVER_URL override)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the gateway runs with no config file at all
//! - The upstream origin is resolved exactly once at startup; handlers never
//!   consult the environment per request

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, ConfigError, API_SERVER_URL_VAR};
pub use schema::GatewayConfig;
pub use validation::validate_config;
