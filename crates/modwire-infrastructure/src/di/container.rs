//! Container
//!
//! Token → resolved instance map of one resolution scope. Entries are written
//! exactly once and kept in insertion order, which is the order the root
//! factory receives them in.
//!
//! A container may hold a parent container (the enclosing scope). Plain
//! lookups never leave the local scope; only [`Container::get_inherited`]
//! walks up the parent chain.

use std::any::Any;
use std::sync::Arc;

use indexmap::IndexMap;
use modwire_domain::error::{Error, RegistryKind, Result};
use modwire_domain::{Resolved, Token};

/// Resolved instances of one resolution scope
#[derive(Clone, Default)]
pub struct Container {
    entries: IndexMap<Token, Resolved>,
    parent: Option<Arc<Container>>,
}

impl Container {
    /// Empty root container
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty container nested in `parent`
    pub fn with_parent(parent: Arc<Container>) -> Self {
        Self {
            entries: IndexMap::new(),
            parent: Some(parent),
        }
    }

    /// Store `resolved` under `token`; a token can only be set once
    pub fn set(&mut self, token: impl Into<Token>, resolved: Resolved) -> Result<()> {
        let token = token.into();
        if self.entries.contains_key(&token) {
            return Err(Error::duplicate(RegistryKind::Container, token));
        }
        self.entries.insert(token, resolved);
        Ok(())
    }

    /// Local entry for `token`
    pub fn get(&self, token: &str) -> Result<&Resolved> {
        self.entries
            .get(token)
            .ok_or_else(|| Error::not_found(RegistryKind::Container, token))
    }

    /// Local instance for `token`, downcast to `T`
    pub fn get_as<T: Any + Send + Sync>(&self, token: &str) -> Result<Arc<T>> {
        let instance = self
            .get(token)?
            .instance()
            .ok_or_else(|| Error::type_mismatch::<T>(token))?;
        instance
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch::<T>(token))
    }

    /// Whether `token` is resolved in this scope
    pub fn has(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Entry for `token` in this scope or the nearest enclosing scope
    pub fn get_inherited(&self, token: &str) -> Option<&Resolved> {
        match self.entries.get(token) {
            Some(resolved) => Some(resolved),
            None => self.parent.as_deref()?.get_inherited(token),
        }
    }

    /// Enclosing scope
    pub fn parent(&self) -> Option<&Container> {
        self.parent.as_deref()
    }

    /// Local entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&Token, &Resolved)> {
        self.entries.iter()
    }

    /// Local tokens in insertion order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.entries.keys()
    }

    /// Number of local entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is resolved locally
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("tokens", &self.entries.keys().collect::<Vec<_>>())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
