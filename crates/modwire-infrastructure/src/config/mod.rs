//! Configuration
//!
//! Layered application configuration: defaults, then a TOML file, then
//! `MODWIRE__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, InjectorConfig, LoggingConfig};
