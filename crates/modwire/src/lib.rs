//! # modwire
//!
//! Declarative module composition: modules declare what they depend on,
//! module factories declare how each dependency is provided, and one
//! bootstrap call resolves the whole graph into a constructed root instance.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use modwire::prelude::*;
//! use serde_json::json;
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! struct App {
//!     greeter: Arc<Greeter>,
//! }
//!
//! let greeter = Class::new("Greeter", |args: Args| {
//!     let config = args.json("config")?;
//!     Ok(Greeter {
//!         greeting: config["greeting"].as_str().unwrap_or("hello").to_string(),
//!     })
//! });
//! let app = Class::new("App", |args: Args| Ok(App { greeter: args.get("greeter")? }));
//!
//! let mut registry = Registry::new();
//! registry.register_module(&greeter, ["config"])?;
//! registry.register_factory(&app, [
//!     ProviderDecl::provide("config").use_json(json!({ "greeting": "hi" })),
//!     ProviderDecl::from(&greeter),
//! ])?;
//!
//! let app: Arc<App> = modwire::bootstrap_as(&registry, &app)?;
//! assert_eq!(app.greeter.greeting, "hi");
//! # Ok::<(), modwire::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - tokens, class descriptors, provider declarations, errors
//! - `infrastructure` - registries, resolution engine, config, logging

/// Domain layer - declaration types and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use modwire_domain::*;
}

/// Infrastructure layer - resolution engine, config, and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use modwire_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the entry points at the crate root
pub use infrastructure::di::{bootstrap, bootstrap_as, bootstrap_with_config};
pub use infrastructure::di::{Composition, Container, Injector, Registry};

/// Everything needed to declare and bootstrap modules
pub mod prelude {
    pub use modwire_domain::{Args, Class, Dependency, Error, ProviderDecl, Result, Token};
    pub use modwire_infrastructure::config::{AppConfig, InjectorConfig};
    pub use modwire_infrastructure::di::{bootstrap, bootstrap_as, Registry};
}
