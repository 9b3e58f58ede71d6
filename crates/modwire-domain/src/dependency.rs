//! Dependency declarations
//!
//! An entry in a module's `deps` list: a bare token, or a token with flags.

use crate::token::Token;

/// One declared dependency of a module or factory provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Token to inject
    pub token: Token,
    /// Absence of a provider does not fail resolution; the argument is omitted
    pub optional: bool,
    /// May be satisfied from the parent scope's container
    pub inherited: bool,
}

impl Dependency {
    /// Required dependency on `token`
    pub fn new(token: impl Into<Token>) -> Self {
        Self {
            token: token.into(),
            optional: false,
            inherited: false,
        }
    }

    /// Optional dependency on `token`
    pub fn optional(token: impl Into<Token>) -> Self {
        Self {
            optional: true,
            ..Self::new(token)
        }
    }

    /// Dependency that may be read from the parent scope
    pub fn inherited(token: impl Into<Token>) -> Self {
        Self {
            inherited: true,
            ..Self::new(token)
        }
    }

    /// Set the optional flag
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Set the inherited flag
    pub fn with_inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }
}

impl From<&str> for Dependency {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Dependency {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<Token> for Dependency {
    fn from(token: Token) -> Self {
        Self::new(token)
    }
}

impl From<(&str, bool)> for Dependency {
    fn from((token, optional): (&str, bool)) -> Self {
        Self::new(token).with_optional(optional)
    }
}

/// Collect anything convertible into dependencies
///
/// ```
/// use modwire_domain::dependency::{deps, Dependency};
///
/// let list = deps(["MessageStore", "Options"]);
/// assert_eq!(list[1], Dependency::new("Options"));
/// ```
pub fn deps<I, D>(items: I) -> Vec<Dependency>
where
    I: IntoIterator<Item = D>,
    D: Into<Dependency>,
{
    items.into_iter().map(Into::into).collect()
}
