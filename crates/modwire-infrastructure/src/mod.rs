//! # Infrastructure Layer
//!
//! The resolution engine and the technical concerns around it.
//!
//! ## Module Categories
//!
//! ### Dependency Injection
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Registries, provider model, container, and the injector |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML/env configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use error_ext::ErrorContext;
