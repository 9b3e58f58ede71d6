//! Provider declarations
//!
//! [`ProviderDecl`] is the raw, declared form of a provider as written in a
//! module factory. It is deliberately loose so that it can express every
//! shape a factory author might write; the injector normalizes it into one of
//! exactly four provider kinds and rejects everything else.
//!
//! ```
//! use modwire_domain::provider::ProviderDecl;
//! use serde_json::json;
//!
//! let options = ProviderDecl::provide("Options")
//!     .use_json(json!({ "appKey": "k1" }))
//!     .merge();
//! let alias = ProviderDecl::provide("Settings").use_existing("Options");
//! assert!(options.merge && alias.use_existing.is_some());
//! ```

use std::any::Any;
use std::fmt;

use crate::args::Args;
use crate::class::{constructor, Class, Constructor};
use crate::dependency::Dependency;
use crate::instance::{instance, Value};
use crate::token::Token;

/// Declared provider metadata of a module factory
#[derive(Clone, Default)]
pub struct ProviderDecl {
    /// Token this provider supplies
    pub provide: Option<Token>,
    /// Static value
    pub use_value: Option<Value>,
    /// Class to construct
    pub use_class: Option<Class>,
    /// Function called with the resolved dependencies
    pub use_factory: Option<Constructor>,
    /// Token to alias
    pub use_existing: Option<Token>,
    /// Explicit dependency list (class and factory providers)
    pub deps: Option<Vec<Dependency>>,
    /// Merge the value's fields into dependents' arguments
    pub spread: bool,
    /// Shallow-merge with the ancestor factory's value for the same token
    pub merge: bool,
}

impl ProviderDecl {
    /// Start a declaration for `token`
    pub fn provide(token: impl Into<Token>) -> Self {
        Self {
            provide: Some(token.into()),
            ..Self::default()
        }
    }

    /// Bare class shorthand: provides the class under its own name
    pub fn class(class: &Class) -> Self {
        Self {
            provide: Some(class.name().clone()),
            use_class: Some(class.clone()),
            ..Self::default()
        }
    }

    /// Provide a shared Rust value
    pub fn use_value<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.use_value = Some(Value::Instance(instance(value)));
        self
    }

    /// Provide a JSON value
    pub fn use_json(mut self, value: serde_json::Value) -> Self {
        self.use_value = Some(Value::Json(value));
        self
    }

    /// Provide an instance of `class`
    pub fn use_class(mut self, class: &Class) -> Self {
        self.use_class = Some(class.clone());
        self
    }

    /// Provide the return value of `factory`
    pub fn use_factory<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Args) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.use_factory = Some(constructor(factory));
        self
    }

    /// Alias another token
    pub fn use_existing(mut self, token: impl Into<Token>) -> Self {
        self.use_existing = Some(token.into());
        self
    }

    /// Explicit dependencies
    pub fn deps<I, D>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Dependency>,
    {
        self.deps = Some(deps.into_iter().map(Into::into).collect());
        self
    }

    /// Spread the value into dependents' arguments
    pub fn spread(mut self) -> Self {
        self.spread = true;
        self
    }

    /// Merge with the ancestor's value instead of replacing it
    pub fn merge(mut self) -> Self {
        self.merge = true;
        self
    }

    /// Number of `use_*` strategies set
    pub fn strategy_count(&self) -> usize {
        [
            self.use_value.is_some(),
            self.use_class.is_some(),
            self.use_factory.is_some(),
            self.use_existing.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl From<&Class> for ProviderDecl {
    fn from(class: &Class) -> Self {
        Self::class(class)
    }
}

impl From<Class> for ProviderDecl {
    fn from(class: Class) -> Self {
        Self::class(&class)
    }
}

impl fmt::Debug for ProviderDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDecl")
            .field("provide", &self.provide)
            .field("use_value", &self.use_value)
            .field("use_class", &self.use_class.as_ref().map(Class::name))
            .field("use_factory", &self.use_factory.is_some())
            .field("use_existing", &self.use_existing)
            .field("deps", &self.deps)
            .field("spread", &self.spread)
            .field("merge", &self.merge)
            .finish()
    }
}
