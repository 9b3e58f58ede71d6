//! Type-erased instances and resolved container entries

use std::any::Any;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

/// A constructed object, shared by reference between all dependents
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wrap a concrete value as an [`Instance`]
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

/// Static value carried by a value provider
#[derive(Clone)]
pub enum Value {
    /// JSON data; objects can be spread and merged
    Json(Json),
    /// Any other shared Rust value, injected as-is
    Instance(Instance),
}

impl Value {
    /// JSON object fields, if this value is a JSON object
    pub fn as_object(&self) -> Option<&Map<String, Json>> {
        match self {
            Self::Json(Json::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Whether the value can be spread or merged
    pub fn is_object(&self) -> bool {
        self.as_object().is_some()
    }

    /// Shape name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Json(Json::Object(_)) => "object",
            Self::Json(_) => "json",
            Self::Instance(_) => "instance",
        }
    }

    /// Shared instance injected into dependents
    pub fn to_instance(&self) -> Instance {
        match self {
            Self::Json(json) => Arc::new(json.clone()),
            Self::Instance(instance) => instance.clone(),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Self::Json(json)
    }
}

/// What the container stores under a token
#[derive(Clone)]
pub enum Resolved {
    /// Injected under the token's camel-cased key
    Instance(Instance),
    /// Merged key by key into dependents' arguments
    Spread(Arc<Map<String, Json>>),
}

impl Resolved {
    /// The instance, unless this entry is spread
    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Spread(_) => None,
        }
    }

    /// Spread fields, if this entry is spread
    pub fn spread(&self) -> Option<&Map<String, Json>> {
        match self {
            Self::Spread(map) => Some(map),
            Self::Instance(_) => None,
        }
    }

    /// Reference identity of two entries
    pub fn ptr_eq(&self, other: &Resolved) -> bool {
        match (self, other) {
            (Self::Instance(a), Self::Instance(b)) => Arc::ptr_eq(a, b),
            (Self::Spread(a), Self::Spread(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Spread(map) => f
                .debug_struct("Spread")
                .field("keys", &map.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}
