//! Error handling types
//!
//! Every failure the composition engine can raise is a misconfiguration of the
//! module graph. They are fatal: a bootstrap that returns an error never hands
//! back a partially built object graph.

use thiserror::Error;

use crate::constants::CYCLE_PATH_SEPARATOR;
use crate::token::Token;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Registry or scope an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// Module registry (module name -> dependency list)
    Module,
    /// Provider registry (factory name -> provider list)
    Factory,
    /// Resolved instances of one bootstrap
    Container,
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Module => "ModuleRegistry",
            Self::Factory => "ProviderRegistry",
            Self::Container => "Container",
        };
        f.write_str(name)
    }
}

/// Main error type for module composition
#[derive(Error, Debug)]
pub enum Error {
    /// Class handed to a registry has no usable name
    #[error("Invalid module type: {message}")]
    InvalidModuleType {
        /// Description of the problem
        message: String,
    },

    /// Class name looks like an anonymous type or closure
    #[error("Anonymous class [{name}] cannot be registered, give it an explicit name")]
    AnonymousClass {
        /// The rejected name
        name: String,
    },

    /// Declared metadata of a module or factory is malformed
    #[error("Invalid metadata for [{name}]: {message}")]
    InvalidModuleMetadata {
        /// Module or factory name
        name: Token,
        /// Description of the problem
        message: String,
    },

    /// Provider declaration does not match any of the four provider shapes
    #[error("Invalid provider format: {message}")]
    InvalidProviderFormat {
        /// Description of the problem
        message: String,
    },

    /// Same name registered twice
    #[error("Can only register [{name}] once in {kind}")]
    DuplicateRegistration {
        /// Registry that rejected the name
        kind: RegistryKind,
        /// The duplicated name
        name: Token,
    },

    /// A token was requested while it was already being resolved
    #[error("Circular dependency detected: {}", format_path(.path))]
    CircularDependency {
        /// Pending chain, ending with the token that closed the cycle
        path: Vec<Token>,
    },

    /// A non-optional dependency has no provider
    #[error("Module [{token}] required by [{requested_by}] is not registered as a provider")]
    UnresolvedDependency {
        /// Missing token
        token: Token,
        /// Module or factory that declared the dependency
        requested_by: Token,
    },

    /// Lookup of an unknown name
    #[error("Cannot find [{name}] in {kind}")]
    NotFound {
        /// Registry that was searched
        kind: RegistryKind,
        /// The missing name
        name: Token,
    },

    /// Instance does not have the requested concrete type
    #[error("Instance [{token}] is not of type {expected}")]
    TypeMismatch {
        /// Token or argument key of the instance
        token: String,
        /// Requested type name
        expected: &'static str,
    },

    /// Constructor argument was not injected
    #[error("Missing constructor argument [{key}]")]
    MissingArgument {
        /// Camel-cased argument key
        key: String,
    },

    /// Constructor or factory function failed
    #[error("Failed to construct [{token}]: {source}")]
    Construction {
        /// Token being constructed
        token: Token,
        /// Error returned by user code
        #[source]
        source: anyhow::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn format_path(path: &[Token]) -> String {
    path.iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(CYCLE_PATH_SEPARATOR)
}

// Registration error creation methods
impl Error {
    /// Create an invalid module type error
    pub fn invalid_module_type<S: Into<String>>(message: S) -> Self {
        Self::InvalidModuleType {
            message: message.into(),
        }
    }

    /// Create an anonymous class error
    pub fn anonymous_class<S: Into<String>>(name: S) -> Self {
        Self::AnonymousClass { name: name.into() }
    }

    /// Create an invalid metadata error
    pub fn invalid_metadata<T: Into<Token>, S: Into<String>>(name: T, message: S) -> Self {
        Self::InvalidModuleMetadata {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid provider format error
    pub fn invalid_provider<S: Into<String>>(message: S) -> Self {
        Self::InvalidProviderFormat {
            message: message.into(),
        }
    }

    /// Create a duplicate registration error
    pub fn duplicate<T: Into<Token>>(kind: RegistryKind, name: T) -> Self {
        Self::DuplicateRegistration {
            kind,
            name: name.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<T: Into<Token>>(kind: RegistryKind, name: T) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

// Resolution error creation methods
impl Error {
    /// Create a circular dependency error from the pending chain
    pub fn circular(path: Vec<Token>) -> Self {
        Self::CircularDependency { path }
    }

    /// Create an unresolved dependency error
    pub fn unresolved<T: Into<Token>, R: Into<Token>>(token: T, requested_by: R) -> Self {
        Self::UnresolvedDependency {
            token: token.into(),
            requested_by: requested_by.into(),
        }
    }

    /// Create a type mismatch error for `T`
    pub fn type_mismatch<T>(token: impl Into<String>) -> Self {
        Self::TypeMismatch {
            token: token.into(),
            expected: std::any::type_name::<T>(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument<S: Into<String>>(key: S) -> Self {
        Self::MissingArgument { key: key.into() }
    }

    /// Wrap a failure raised by user construction code
    pub fn construction<T: Into<Token>>(token: T, source: anyhow::Error) -> Self {
        Self::Construction {
            token: token.into(),
            source,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Check if this is a circular dependency error
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Check if this is an unresolved dependency error
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::UnresolvedDependency { .. })
    }

    /// Check if this is a duplicate registration error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRegistration { .. })
    }

    /// Cycle path carried by a circular dependency error
    pub fn cycle_path(&self) -> Option<&[Token]> {
        match self {
            Self::CircularDependency { path } => Some(path),
            _ => None,
        }
    }
}
