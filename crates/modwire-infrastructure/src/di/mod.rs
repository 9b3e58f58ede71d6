//! Dependency Injection - Module Composition Engine
//!
//! Resolves the provider graph of a root module factory into one constructed
//! object graph.
//!
//! ## Architecture Overview
//!
//! ```text
//! Registry ──────────────┐
//! ├── ModuleRegistry     │  declared once per class
//! └── ProviderRegistry   │  (merged with ancestors on first read)
//!                        ▼
//!                    Injector ── Provider (value | class | factory | existing)
//!                        │
//!                        ▼
//!                    Container ── parent Container (nested factory scopes)
//! ```
//!
//! ## Key Principles
//!
//! - **Explicit registries**: no process-wide state; every bootstrap is isolated
//! - **Single construction**: each token is instantiated at most once per scope
//! - **Fail fast**: the first error aborts the bootstrap with no partial graph

pub mod bootstrap;
pub mod container;
pub mod inheritance;
pub mod injector;
pub mod provider;
pub mod registry;

pub use bootstrap::{bootstrap, bootstrap_as, bootstrap_with_config};
pub use container::Container;
pub use inheritance::{merge_dependencies, merge_providers};
pub use injector::{Composition, Injector, Pending};
pub use provider::{
    ClassProvider, ExistingProvider, FactoryProvider, Provider, ProviderKind, ValueProvider,
};
pub use registry::{ModuleRegistry, ProviderRegistry, Registry};
