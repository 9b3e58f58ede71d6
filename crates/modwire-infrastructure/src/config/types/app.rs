//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::injector::InjectorConfig;
pub use super::logging::LoggingConfig;

/// Top-level configuration of an application embedding the injector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Injector configuration
    pub injector: InjectorConfig,
}
