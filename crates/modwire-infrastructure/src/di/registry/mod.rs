//! Declaration Registries
//!
//! Registries hold what classes declare about themselves, keyed by class name:
//!
//! ```text
//! Registry
//! ├── ModuleRegistry    module name  → { class, deps[] }
//! └── ProviderRegistry  factory name → { class, providers[] }
//! ```
//!
//! Both are populated once, right after each class is defined, and read during
//! bootstrap. The merged (own + ancestors) view of an entry is computed on first
//! access and cached on the entry, so a shared `&Registry` can serve repeated or
//! parallel bootstraps. Registering an ancestor later drops the cached views of
//! its descendants.

mod module_registry;
mod provider_registry;

pub use module_registry::ModuleRegistry;
pub use provider_registry::ProviderRegistry;

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use modwire_domain::error::{Error, RegistryKind, Result};
use modwire_domain::{Class, Dependency, ProviderDecl, Token};
use tracing::debug;

struct Entry<T> {
    class: Class,
    declared: Vec<T>,
    resolved: OnceLock<Arc<[T]>>,
}

/// Name-keyed store of per-class metadata with cached inheritance merging
pub(crate) struct ClassRegistry<T> {
    kind: RegistryKind,
    entries: IndexMap<Token, Entry<T>>,
}

impl<T: Clone> ClassRegistry<T> {
    pub(crate) fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Store `declared` under the class name; the first registration wins
    ///
    /// Cached merged views of registered descendants are dropped, so they pick
    /// up the new ancestor on their next access.
    pub(crate) fn insert(&mut self, class: &Class, declared: Vec<T>) -> Result<()> {
        class.validate_name()?;
        let name = class.name();
        if self.entries.contains_key(name) {
            return Err(Error::duplicate(self.kind, name));
        }
        debug!(registry = %self.kind, name = %name, entries = declared.len(), "Registered class");
        for (descendant, entry) in &mut self.entries {
            let extends = entry.class.lineage().skip(1).any(|c| c.name() == name);
            if extends && entry.resolved.take().is_some() {
                debug!(registry = %self.kind, name = %descendant, ancestor = %name, "Invalidated merged view");
            }
        }
        self.entries.insert(
            name.clone(),
            Entry {
                class: class.clone(),
                declared,
                resolved: OnceLock::new(),
            },
        );
        Ok(())
    }

    fn entry(&self, name: &str) -> Result<&Entry<T>> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::not_found(self.kind, name))
    }

    pub(crate) fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn class(&self, name: &str) -> Result<&Class> {
        self.entry(name).map(|e| &e.class)
    }

    pub(crate) fn declared(&self, name: &str) -> Result<&[T]> {
        self.entry(name).map(|e| e.declared.as_slice())
    }

    pub(crate) fn is_resolved(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|e| e.resolved.get().is_some())
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &Token> {
        self.entries.keys()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Merged view of `name` and its registered ancestors
    ///
    /// Unregistered classes in the ancestor chain are skipped. `merge` receives
    /// the entry's own list and the already merged list of its nearest
    /// registered ancestor.
    pub(crate) fn resolve_with<F>(&self, name: &str, merge: &F) -> Result<Arc<[T]>>
    where
        F: Fn(&Token, &[T], &[T]) -> Result<Vec<T>>,
    {
        let entry = self.entry(name)?;
        if let Some(resolved) = entry.resolved.get() {
            return Ok(resolved.clone());
        }

        let ancestor = entry
            .class
            .lineage()
            .skip(1)
            .find(|class| self.has(class.name()));
        let inherited = match ancestor {
            Some(class) => self.resolve_with(class.name(), merge)?,
            None => Arc::from(Vec::new()),
        };

        let merged: Arc<[T]> = merge(entry.class.name(), &entry.declared, &inherited)?.into();
        debug!(
            registry = %self.kind,
            name = %entry.class.name(),
            inherited = inherited.len(),
            merged = merged.len(),
            "Resolved inheritance"
        );
        Ok(entry.resolved.get_or_init(|| merged).clone())
    }
}

/// Module and provider registries of one application
///
/// Registries are plain values: build one per application (or per test) and
/// hand it to [`crate::di::Injector`].
pub struct Registry {
    modules: ModuleRegistry,
    providers: ProviderRegistry,
}

impl Registry {
    /// Empty registries
    pub fn new() -> Self {
        Self {
            modules: ModuleRegistry::new(),
            providers: ProviderRegistry::new(),
        }
    }

    /// Declare `class` as a module with its dependencies
    pub fn register_module<I, D>(&mut self, class: &Class, deps: I) -> Result<()>
    where
        I: IntoIterator<Item = D>,
        D: Into<Dependency>,
    {
        self.modules
            .register(class, deps.into_iter().map(Into::into).collect())
    }

    /// Declare `class` as a module factory with its providers
    pub fn register_factory<I, P>(&mut self, class: &Class, providers: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<ProviderDecl>,
    {
        self.providers
            .register(class, providers.into_iter().map(Into::into).collect())
    }

    /// Module registry
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Provider registry
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Whether `class` is a module factory rather than a plain module
    pub fn is_factory(&self, class: &Class) -> bool {
        let name = class.name();
        self.providers.has(name) && !self.modules.has(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("modules", &self.modules.len())
            .field("factories", &self.providers.len())
            .finish()
    }
}
