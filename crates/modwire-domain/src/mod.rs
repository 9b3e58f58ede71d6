//! # Domain Layer
//!
//! Core types of the module-composition model. This crate holds no resolution
//! logic; it only describes what can be declared and what an injector hands
//! back.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`token`] | Provider tokens and argument-key camel-casing |
//! | [`dependency`] | Dependency declarations (`token`, `optional`, `inherited`) |
//! | [`class`] | Class descriptors with explicit names and parents |
//! | [`provider`] | Raw provider declarations of module factories |
//! | [`instance`] | Type-erased instances, values, and container entries |
//! | [`args`] | The named-arguments object passed to constructors |
//! | [`error`] | Error taxonomy shared by every layer |

pub mod args;
pub mod class;
pub mod constants;
pub mod dependency;
pub mod error;
pub mod instance;
pub mod provider;
pub mod token;

pub use args::Args;
pub use class::{Class, Constructor};
pub use dependency::Dependency;
pub use error::{Error, RegistryKind, Result};
pub use instance::{Instance, Resolved, Value};
pub use provider::ProviderDecl;
pub use token::Token;
