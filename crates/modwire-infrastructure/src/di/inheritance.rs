//! Inheritance Resolver
//!
//! Merge rules applied when a module or module factory extends another one.
//! Both merges keep ancestor entries first, replace overridden entries in
//! place, and append entries the child introduces.

use indexmap::IndexMap;
use modwire_domain::error::{Error, Result};
use modwire_domain::{Dependency, Token, Value};
use serde_json::Value as Json;

use crate::di::provider::{Provider, ValueProvider};

/// Merge a module's own dependencies over its ancestors' dependencies
///
/// A child declaration of a token the ancestor already declares replaces it
/// entirely, optionality included: the most specific declaration wins.
pub fn merge_dependencies(own: &[Dependency], inherited: &[Dependency]) -> Vec<Dependency> {
    let mut merged: IndexMap<Token, Dependency> = inherited
        .iter()
        .map(|dep| (dep.token.clone(), dep.clone()))
        .collect();
    for dep in own {
        merged.insert(dep.token.clone(), dep.clone());
    }
    merged.into_values().collect()
}

/// Merge a factory's own providers over its ancestors' providers
///
/// A child value provider flagged `merge` is shallow-merged into the ancestor
/// value of the same token (child keys win); the ancestor must then be a value
/// provider holding an object. Every other child provider replaces the
/// ancestor entry. A `merge` value without an ancestor entry is a plain value.
pub fn merge_providers(own: &[Provider], inherited: &[Provider]) -> Result<Vec<Provider>> {
    let mut merged: IndexMap<Token, Provider> = inherited
        .iter()
        .map(|provider| (provider.token().clone(), provider.clone()))
        .collect();

    for provider in own {
        let token = provider.token();
        let replacement = match (provider, merged.get(token)) {
            (Provider::Value(child), Some(parent)) if child.merge => {
                let Provider::Value(parent) = parent else {
                    return Err(Error::invalid_provider(format!(
                        "Expected parent provider of [{token}] to be a value provider, found {}",
                        parent.kind()
                    )));
                };
                Provider::Value(merge_value_providers(parent, child)?)
            }
            _ => provider.clone(),
        };
        merged.insert(token.clone(), replacement);
    }

    Ok(merged.into_values().collect())
}

fn merge_value_providers(parent: &ValueProvider, child: &ValueProvider) -> Result<ValueProvider> {
    let (Some(base), Some(overlay)) = (parent.value.as_object(), child.value.as_object()) else {
        return Err(Error::invalid_provider(format!(
            "Cannot merge [{}]: expected two objects, found {} and {}",
            child.token,
            parent.value.kind(),
            child.value.kind()
        )));
    };
    let mut fields = base.clone();
    for (key, value) in overlay {
        fields.insert(key.clone(), value.clone());
    }
    Ok(ValueProvider {
        token: child.token.clone(),
        value: Value::Json(Json::Object(fields)),
        spread: parent.spread || child.spread,
        merge: true,
    })
}
