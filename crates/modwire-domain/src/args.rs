//! Constructor arguments
//!
//! Every module constructor and factory function receives a single [`Args`]
//! object whose keys are the camel-cased tokens of the declared dependencies,
//! plus the fields of any spread value provider.

use std::any::Any;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::instance::Instance;

/// Ordered, named constructor arguments
#[derive(Clone, Default)]
pub struct Args {
    values: IndexMap<String, Instance>,
}

impl Args {
    /// Empty arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an argument; a later insert under the same key wins
    pub fn insert(&mut self, key: impl Into<String>, value: Instance) {
        self.values.insert(key.into(), value);
    }

    /// Merge JSON object fields, each becoming its own argument
    pub fn spread(&mut self, fields: &serde_json::Map<String, Json>) {
        for (key, value) in fields {
            self.values.insert(key.clone(), Arc::new(value.clone()));
        }
    }

    /// Raw instance under `key`
    pub fn instance(&self, key: &str) -> Option<&Instance> {
        self.values.get(key)
    }

    /// Typed argument, failing if absent or of another type
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| Error::missing_argument(key))?;
        value
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch::<T>(key))
    }

    /// Typed argument if present and of type `T`
    pub fn try_get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.values.get(key)?.clone().downcast::<T>().ok()
    }

    /// JSON argument (value providers and spread fields)
    pub fn json(&self, key: &str) -> Result<Arc<Json>> {
        self.get::<Json>(key)
    }

    /// Deserialize a JSON argument into a typed structure
    pub fn deserialize<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let json = self.json(key)?;
        T::deserialize(&*json).map_err(|e| {
            Error::configuration_with_source(format!("Cannot deserialize argument [{key}]"), e)
        })
    }

    /// Whether `key` was injected
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Argument keys in injection order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Arguments in injection order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no argument was injected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
