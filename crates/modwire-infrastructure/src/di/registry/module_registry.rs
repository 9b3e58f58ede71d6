//! Module registry: module name → declared dependency list

use std::collections::HashSet;
use std::sync::Arc;

use modwire_domain::error::{Error, RegistryKind, Result};
use modwire_domain::{Class, Dependency, Token};

use super::ClassRegistry;
use crate::di::inheritance::merge_dependencies;

/// Stores module metadata and resolves dependency inheritance
pub struct ModuleRegistry {
    inner: ClassRegistry<Dependency>,
}

impl ModuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            inner: ClassRegistry::new(RegistryKind::Module),
        }
    }

    /// Register `class` with its declared dependencies
    ///
    /// Fails on an empty or anonymous name, an empty dependency token, a token
    /// listed twice, or a name that is already registered. A failed
    /// registration leaves the registry unchanged.
    pub fn register(&mut self, class: &Class, deps: Vec<Dependency>) -> Result<()> {
        class.validate_name()?;
        let mut seen = HashSet::new();
        for dep in &deps {
            if dep.token.is_empty() {
                return Err(Error::invalid_metadata(
                    class.name(),
                    "dependency tokens cannot be empty",
                ));
            }
            if !seen.insert(&dep.token) {
                return Err(Error::invalid_metadata(
                    class.name(),
                    format!("dependency [{}] is declared twice", dep.token),
                ));
            }
        }
        self.inner.insert(class, deps)
    }

    /// Merged dependency list (own + ancestors), computed once per module
    pub fn get(&self, name: &str) -> Result<Arc<[Dependency]>> {
        self.inner
            .resolve_with(name, &|_, own, inherited| Ok(merge_dependencies(own, inherited)))
    }

    /// Dependencies as declared, without ancestors
    pub fn declared(&self, name: &str) -> Result<&[Dependency]> {
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

    /// Registered module names in registration order
    pub fn names(&self) -> impl Iterator<Item = &Token> {
        self.inner.names()
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no module is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
