//! Class descriptors
//!
//! A [`Class`] stands in for a constructible type: an explicit name, an
//! optional parent class for inheritance, and a constructor taking the
//! injected [`Args`]. Descriptors are cheap to clone and compare by identity.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::args::Args;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::token::Token;

/// Type-erased constructor or factory function
pub type Constructor = Arc<dyn Fn(Args) -> anyhow::Result<Instance> + Send + Sync>;

/// Erase a typed constructor closure
pub fn constructor<T, F>(f: F) -> Constructor
where
    T: Any + Send + Sync,
    F: Fn(Args) -> anyhow::Result<T> + Send + Sync + 'static,
{
    Arc::new(move |args| f(args).map(|value| Arc::new(value) as Instance))
}

struct ClassInner {
    name: Token,
    parent: Option<Class>,
    constructor: Constructor,
}

/// Descriptor of a constructible module, library, or module factory
#[derive(Clone)]
pub struct Class {
    inner: Arc<ClassInner>,
}

impl Class {
    /// Declare a class named `name` built by `ctor`
    pub fn new<T, F>(name: impl Into<Token>, ctor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Args) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self::from_constructor(name, constructor(ctor))
    }

    /// Declare a class from an already erased constructor
    pub fn from_constructor(name: impl Into<Token>, ctor: Constructor) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                name: name.into(),
                parent: None,
                constructor: ctor,
            }),
        }
    }

    /// Declare a class whose instances carry no state
    pub fn unit(name: impl Into<Token>) -> Self {
        Self::new(name, |_| Ok(()))
    }

    /// Same class, declared as a subclass of `parent`
    pub fn extends(self, parent: &Class) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                name: self.inner.name.clone(),
                parent: Some(parent.clone()),
                constructor: self.inner.constructor.clone(),
            }),
        }
    }

    /// Class name, used as its token
    pub fn name(&self) -> &Token {
        &self.inner.name
    }

    /// Direct parent class
    pub fn parent(&self) -> Option<&Class> {
        self.inner.parent.as_ref()
    }

    /// This class followed by its ancestors, most derived first
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage {
            next: Some(self),
        }
    }

    /// Check the name can be used for registration
    pub fn validate_name(&self) -> Result<()> {
        let name = self.name();
        if name.is_empty() {
            return Err(Error::invalid_module_type(
                "Expected module to be a class with a non-empty name",
            ));
        }
        if name.is_anonymous() {
            return Err(Error::anonymous_class(name.as_str()));
        }
        Ok(())
    }

    /// Run the constructor
    pub fn construct(&self, args: Args) -> Result<Instance> {
        (self.inner.constructor)(args).map_err(|e| Error::construction(self.name(), e))
    }

    /// Whether both descriptors are the same declaration
    pub fn ptr_eq(&self, other: &Class) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.inner.name)
            .field("parent", &self.parent().map(Class::name))
            .finish()
    }
}

/// Iterator over a class and its ancestors
pub struct Lineage<'a> {
    next: Option<&'a Class>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Class;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
