//! Domain layer constants
//!
//! Contains constants that are part of the composition model itself.
//! Infrastructure-specific constants remain in `modwire_infrastructure::constants`.

// ============================================================================
// TOKEN CONSTANTS
// ============================================================================

/// Names given to classes that were declared without one
pub const ANONYMOUS_CLASS_NAMES: &[&str] = &["anonymous", "<anonymous>"];

/// Separator between tokens when printing a resolution chain
pub const CYCLE_PATH_SEPARATOR: &str = " -> ";
