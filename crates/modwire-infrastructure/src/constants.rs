//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `modwire_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "modwire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "modwire";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MODWIRE";

/// Separator between the prefix and nested keys of environment variables
pub const ENV_NESTING_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV_VAR: &str = "MODWIRE_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "modwire";
