//! Bootstrap - Composition Entry Points
//!
//! One call composes one root module factory against a registry. Each call
//! builds its own [`Injector`], so a shared registry can be bootstrapped
//! repeatedly or from several threads at once.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = Registry::new();
//! registry.register_module(&greeter, ["config"])?;
//! registry.register_factory(&app, [
//!     ProviderDecl::provide("config").use_json(json!({ "greeting": "hi" })),
//!     ProviderDecl::provide("greeter").use_class(&greeter),
//! ])?;
//!
//! let app: Arc<App> = bootstrap_as(&registry, &app)?;
//! ```

use std::any::Any;
use std::sync::Arc;

use modwire_domain::error::Result;
use modwire_domain::{Class, Instance};

use crate::config::InjectorConfig;
use crate::di::injector::{Composition, Injector};
use crate::di::registry::Registry;

/// Compose `root` and return its instance
pub fn bootstrap(registry: &Registry, root: &Class) -> Result<Instance> {
    Injector::new(registry).bootstrap(root)
}

/// Compose `root` and downcast its instance to `T`
pub fn bootstrap_as<T: Any + Send + Sync>(registry: &Registry, root: &Class) -> Result<Arc<T>> {
    Injector::new(registry).bootstrap_as(root)
}

/// Compose `root` with injector settings, keeping the resolved container
pub fn bootstrap_with_config(
    registry: &Registry,
    root: &Class,
    config: InjectorConfig,
) -> Result<Composition> {
    Injector::with_config(registry, config).compose(root)
}
