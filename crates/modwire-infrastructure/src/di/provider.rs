//! Provider Model
//!
//! The closed set of provider kinds an injector knows how to resolve. Raw
//! [`ProviderDecl`] metadata is normalized into exactly one of the four
//! variants at registration time; any other shape is rejected with
//! [`Error::InvalidProviderFormat`].
//!
//! ```text
//! ProviderDecl ──normalize()──► Provider::Value    (useValue [+ spread] [+ merge])
//!                               Provider::Class    (useClass | bare class)
//!                               Provider::Factory  (useFactory [+ deps])
//!                               Provider::Existing (useExisting)
//! ```

use std::fmt;

use modwire_domain::class::Constructor;
use modwire_domain::error::{Error, Result};
use modwire_domain::{Class, Dependency, ProviderDecl, Token, Value};

/// Provides a static value
#[derive(Debug, Clone)]
pub struct ValueProvider {
    /// Provided token
    pub token: Token,
    /// The value
    pub value: Value,
    /// Spread the value's fields into dependents' arguments
    pub spread: bool,
    /// Merge with the ancestor factory's value for the same token
    pub merge: bool,
}

/// Provides an instance of a class
#[derive(Debug, Clone)]
pub struct ClassProvider {
    /// Provided token
    pub token: Token,
    /// Class to construct
    pub class: Class,
    /// Explicit dependencies; `None` falls back to the class's module deps
    pub deps: Option<Vec<Dependency>>,
}

/// Provides the return value of a function
#[derive(Clone)]
pub struct FactoryProvider {
    /// Provided token
    pub token: Token,
    /// Function invoked with the resolved dependencies
    pub factory: Constructor,
    /// Dependencies passed to the function
    pub deps: Vec<Dependency>,
}

impl fmt::Debug for FactoryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryProvider")
            .field("token", &self.token)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Aliases another token
#[derive(Debug, Clone)]
pub struct ExistingProvider {
    /// Alias token
    pub token: Token,
    /// Token whose resolved value is shared
    pub existing: Token,
}

/// Provider kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// [`ValueProvider`]
    Value,
    /// [`ClassProvider`]
    Class,
    /// [`FactoryProvider`]
    Factory,
    /// [`ExistingProvider`]
    Existing,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Value => "value",
            Self::Class => "class",
            Self::Factory => "factory",
            Self::Existing => "existing",
        };
        f.write_str(name)
    }
}

/// A strategy for producing the value behind a token
#[derive(Debug, Clone)]
pub enum Provider {
    /// Static value
    Value(ValueProvider),
    /// Class instance
    Class(ClassProvider),
    /// Function result
    Factory(FactoryProvider),
    /// Alias of another token
    Existing(ExistingProvider),
}

impl Provider {
    /// Value provider for `token`
    pub fn value(token: impl Into<Token>, value: impl Into<Value>) -> Self {
        Self::Value(ValueProvider {
            token: token.into(),
            value: value.into(),
            spread: false,
            merge: false,
        })
    }

    /// Spread value provider for `token`
    pub fn spread(token: impl Into<Token>, value: serde_json::Value) -> Self {
        Self::Value(ValueProvider {
            token: token.into(),
            value: Value::Json(value),
            spread: true,
            merge: false,
        })
    }

    /// Class provider for `token` using the class's registered deps
    pub fn class(token: impl Into<Token>, class: &Class) -> Self {
        Self::Class(ClassProvider {
            token: token.into(),
            class: class.clone(),
            deps: None,
        })
    }

    /// Factory provider for `token`
    pub fn factory(token: impl Into<Token>, factory: Constructor, deps: Vec<Dependency>) -> Self {
        Self::Factory(FactoryProvider {
            token: token.into(),
            factory,
            deps,
        })
    }

    /// Alias provider: `token` resolves to whatever `existing` resolves to
    pub fn existing(token: impl Into<Token>, existing: impl Into<Token>) -> Self {
        Self::Existing(ExistingProvider {
            token: token.into(),
            existing: existing.into(),
        })
    }

    /// Provided token
    pub fn token(&self) -> &Token {
        match self {
            Self::Value(p) => &p.token,
            Self::Class(p) => &p.token,
            Self::Factory(p) => &p.token,
            Self::Existing(p) => &p.token,
        }
    }

    /// Kind tag
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Value(_) => ProviderKind::Value,
            Self::Class(_) => ProviderKind::Class,
            Self::Factory(_) => ProviderKind::Factory,
            Self::Existing(_) => ProviderKind::Existing,
        }
    }

    /// Normalize a raw declaration into one of the four provider kinds
    pub fn normalize(decl: ProviderDecl) -> Result<Self> {
        let token = match &decl.provide {
            Some(token) if !token.is_empty() => token.clone(),
            _ => {
                return Err(Error::invalid_provider(format!(
                    "provider declares no token: {decl:?}"
                )))
            }
        };
        match decl.strategy_count() {
            0 => {
                return Err(Error::invalid_provider(format!(
                    "[{token}] must declare one of useValue, useClass, useFactory or useExisting"
                )))
            }
            1 => {}
            _ => {
                return Err(Error::invalid_provider(format!(
                    "[{token}] declares more than one of useValue, useClass, useFactory, useExisting"
                )))
            }
        }
        if let Some(deps) = &decl.deps {
            if let Some(dep) = deps.iter().find(|d| d.token.is_empty()) {
                return Err(Error::invalid_provider(format!(
                    "[{token}] declares an empty dependency token: {dep:?}"
                )));
            }
        }

        let ProviderDecl {
            use_value,
            use_class,
            use_factory,
            use_existing,
            deps,
            spread,
            merge,
            ..
        } = decl;

        if let Some(value) = use_value {
            if deps.is_some() {
                return Err(Error::invalid_provider(format!(
                    "value provider [{token}] cannot declare deps"
                )));
            }
            if spread && !value.is_object() {
                return Err(Error::invalid_provider(format!(
                    "spread value provider [{token}] must be an object, found {}",
                    value.kind()
                )));
            }
            return Ok(Self::Value(ValueProvider {
                token,
                value,
                spread,
                merge,
            }));
        }

        if spread || merge {
            return Err(Error::invalid_provider(format!(
                "only value providers support spread and merge: [{token}]"
            )));
        }

        if let Some(class) = use_class {
            return Ok(Self::Class(ClassProvider { token, class, deps }));
        }
        if let Some(factory) = use_factory {
            return Ok(Self::Factory(FactoryProvider {
                token,
                factory,
                deps: deps.unwrap_or_default(),
            }));
        }
        match use_existing {
            Some(_) if deps.is_some() => Err(Error::invalid_provider(format!(
                "existing provider [{token}] cannot declare deps"
            ))),
            Some(existing) if existing == token || existing.is_empty() => Err(
                Error::invalid_provider(format!("[{token}] cannot alias [{existing}]")),
            ),
            Some(existing) => Ok(Self::Existing(ExistingProvider { token, existing })),
            None => Err(Error::invalid_provider(format!(
                "[{token}] has no provider strategy"
            ))),
        }
    }
}

impl TryFrom<ProviderDecl> for Provider {
    type Error = Error;

    fn try_from(decl: ProviderDecl) -> Result<Self> {
        Self::normalize(decl)
    }
}
