//! Provider registry: module factory name → provider list
//!
//! Declarations are normalized into [`Provider`] values when the factory is
//! registered, so a malformed provider fails at declaration time rather than
//! during bootstrap.

use std::collections::HashSet;
use std::sync::Arc;

use modwire_domain::error::{Error, RegistryKind, Result};
use modwire_domain::{Class, ProviderDecl, Token};

use super::ClassRegistry;
use crate::di::inheritance::merge_providers;
use crate::di::provider::Provider;

/// Stores module factory providers and resolves factory inheritance
pub struct ProviderRegistry {
    inner: ClassRegistry<Provider>,
}

impl ProviderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            inner: ClassRegistry::new(RegistryKind::Factory),
        }
    }

    /// Register `class` as a module factory
    ///
    /// Every declaration is normalized; the first invalid one aborts the
    /// registration and leaves the registry unchanged.
    pub fn register(&mut self, class: &Class, decls: Vec<ProviderDecl>) -> Result<()> {
        class.validate_name()?;
        let providers = decls
            .into_iter()
            .map(Provider::normalize)
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.token()) {
                return Err(Error::invalid_provider(format!(
                    "provider [{}] is declared twice in [{}]",
                    provider.token(),
                    class.name()
                )));
            }
        }
        self.inner.insert(class, providers)
    }

    /// Merged provider list (ancestors first, own overrides applied)
    pub fn get(&self, name: &str) -> Result<Arc<[Provider]>> {
        self.inner.resolve_with(name, &|_, own, inherited| {
            merge_providers(own, inherited)
        })
    }

    /// Providers as declared, without ancestors
    pub fn declared(&self, name: &str) -> Result<&[Provider]> {
        self.inner.declared(name)
    }

    /// Class registered under `name`
    pub fn class(&self, name: &str) -> Result<&Class> {
        self.inner.class(name)
    }

    /// Whether `name` is registered
    pub fn has(&self, name: &str) -> bool {
        self.inner.has(name)
    }

    /// Whether the merged view of `name` has been computed
    pub fn is_resolved(&self, name: &str) -> bool {
        self.inner.is_resolved(name)
    }

    /// Registered factory names in registration order
    pub fn names(&self) -> impl Iterator<Item = &Token> {
        self.inner.names()
    }

    /// Number of registered factories
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no factory is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
