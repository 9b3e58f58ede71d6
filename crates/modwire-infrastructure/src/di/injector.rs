//! Injector - Resolution Engine
//!
//! One [`Injector`] drives one bootstrap of a module factory:
//!
//! ```text
//! bootstrap(Root)
//!   │
//!   ├─ load_factory   merged provider metadata of Root and its ancestors
//!   │                 (+ configured overrides) → token → Provider map
//!   ├─ resolve_all    drain the map in declaration order; each provider
//!   │                 resolves its dependencies first (depth first),
//!   │                 cycles are caught through the pending chain
//!   └─ construct      Root receives every resolved entry as named args
//! ```
//!
//! The container and the pending chain live and die with the injector, so
//! independent bootstraps never share state even when they share a
//! [`Registry`].

use std::any::Any;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use modwire_domain::error::{Error, RegistryKind, Result};
use modwire_domain::{Args, Class, Dependency, Instance, Resolved, Token};
use tracing::{debug, info, trace, warn};

use crate::config::InjectorConfig;
use crate::di::container::Container;
use crate::di::inheritance::merge_providers;
use crate::di::provider::{ClassProvider, ExistingProvider, FactoryProvider, Provider};
use crate::di::registry::Registry;

/// Tokens currently under resolution, in call order
#[derive(Debug, Default, Clone)]
pub struct Pending {
    chain: IndexSet<Token>,
}

impl Pending {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `token` is being resolved
    pub fn contains(&self, token: &str) -> bool {
        self.chain.contains(token)
    }

    /// Tokens in call order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.chain.iter()
    }

    /// Number of tokens under resolution
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether nothing is under resolution
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    fn enter(&mut self, token: &Token) {
        self.chain.insert(token.clone());
    }

    fn leave(&mut self, token: &Token) {
        self.chain.shift_remove(token);
    }

    fn cycle(&self, closing: &Token) -> Error {
        let mut path: Vec<Token> = self.chain.iter().cloned().collect();
        path.push(closing.clone());
        Error::circular(path)
    }
}

/// Outcome of a successful bootstrap
pub struct Composition {
    /// Constructed root factory instance
    pub root: Instance,
    /// Every instance resolved for the root scope
    pub container: Container,
}

impl Composition {
    /// Root instance downcast to `T`
    pub fn root_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.root
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch::<T>(name))
    }
}

/// Resolution state of one bootstrap scope
pub struct Injector<'r> {
    registry: &'r Registry,
    providers: IndexMap<Token, Provider>,
    container: Container,
    config: InjectorConfig,
    scopes: Vec<Token>,
}

impl<'r> Injector<'r> {
    /// Fresh scope reading declarations from `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, InjectorConfig::default())
    }

    /// Fresh scope with injector settings
    pub fn with_config(registry: &'r Registry, config: InjectorConfig) -> Self {
        Self {
            registry,
            providers: IndexMap::new(),
            container: Container::new(),
            config,
            scopes: Vec::new(),
        }
    }

    /// Nest this scope in `parent`
    pub fn with_parent(mut self, parent: Arc<Container>) -> Self {
        self.container = Container::with_parent(parent);
        self
    }

    /// Registry this injector reads from
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Resolved instances so far
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Provider registered for `token` in this scope
    pub fn provider(&self, token: &str) -> Option<&Provider> {
        self.providers.get(token)
    }

    /// Providers of this scope in declaration order
    pub fn providers(&self) -> impl Iterator<Item = &Provider> {
        self.providers.values()
    }

    /// Add a provider; a later provider for the same token replaces the earlier one
    pub fn add_provider(&mut self, provider: Provider) -> Option<Provider> {
        self.providers.insert(provider.token().clone(), provider)
    }

    /// Resolved entry for `token`
    pub fn get(&self, token: &str) -> Result<&Resolved> {
        self.container.get(token)
    }

    /// Resolved instance for `token`, downcast to `T`
    pub fn get_as<T: Any + Send + Sync>(&self, token: &str) -> Result<Arc<T>> {
        self.container.get_as(token)
    }

    /// Collect the merged provider metadata of `root` and its ancestors
    ///
    /// Configured overrides are applied last, as `merge` value providers.
    pub fn load_factory(&mut self, root: &Class) -> Result<()> {
        let factories = self.registry.providers();
        let declaring = root
            .lineage()
            .find(|class| factories.has(class.name()))
            .ok_or_else(|| Error::not_found(RegistryKind::Factory, root.name()))?;

        let metadata = factories.get(declaring.name())?;
        for provider in metadata.iter() {
            self.add_provider(provider.clone());
        }

        if !self.config.overrides.is_empty() {
            self.apply_overrides()?;
        }
        debug!(
            factory = %root.name(),
            providers = self.providers.len(),
            "Loaded provider metadata"
        );
        Ok(())
    }

    fn apply_overrides(&mut self) -> Result<()> {
        let overrides: Vec<Provider> = self
            .config
            .overrides
            .iter()
            .map(|(token, value)| {
                let mut provider = Provider::value(token.as_str(), value.clone());
                if let Provider::Value(p) = &mut provider {
                    p.merge = true;
                }
                provider
            })
            .collect();
        let current: Vec<Provider> = self.providers.values().cloned().collect();
        let merged = merge_providers(&overrides, &current)?;
        self.providers = merged
            .into_iter()
            .map(|provider| (provider.token().clone(), provider))
            .collect();
        debug!(overrides = overrides.len(), "Applied configured overrides");
        Ok(())
    }

    /// Resolve every provider of this scope in declaration order
    pub fn resolve_all(&mut self) -> Result<()> {
        let queue: Vec<Provider> = self.providers.values().cloned().collect();
        for provider in &queue {
            if !self.container.has(provider.token()) {
                self.resolve_provider(provider, &mut Pending::new())?;
            }
        }
        Ok(())
    }

    /// Resolve `provider` into the container, dependencies first
    pub fn resolve_provider(&mut self, provider: &Provider, pending: &mut Pending) -> Result<()> {
        let token = provider.token();
        if self.container.has(token) {
            return Ok(());
        }
        debug!(token = %token, kind = %provider.kind(), "Resolving provider");

        match provider {
            Provider::Value(p) => {
                let resolved = if p.spread {
                    let fields = p.value.as_object().ok_or_else(|| {
                        Error::invalid_provider(format!(
                            "spread value provider [{token}] must be an object"
                        ))
                    })?;
                    Resolved::Spread(Arc::new(fields.clone()))
                } else {
                    Resolved::Instance(p.value.to_instance())
                };
                self.container.set(token, resolved)
            }
            Provider::Factory(p) => self.resolve_factory(p, pending),
            Provider::Class(p) => self.resolve_class(p, pending),
            Provider::Existing(p) => self.resolve_existing(p, pending),
        }
    }

    fn resolve_factory(&mut self, provider: &FactoryProvider, pending: &mut Pending) -> Result<()> {
        let token = &provider.token;
        pending.enter(token);
        let args = self.resolve_dependencies(&provider.deps, token, pending)?;
        let instance = (provider.factory)(args).map_err(|e| Error::construction(token, e))?;
        self.container.set(token, Resolved::Instance(instance))?;
        pending.leave(token);
        Ok(())
    }

    fn resolve_class(&mut self, provider: &ClassProvider, pending: &mut Pending) -> Result<()> {
        let token = &provider.token;
        let class = &provider.class;
        if provider.deps.is_none() && self.registry.is_factory(class) {
            return self.resolve_nested_factory(token, class);
        }

        let modules = self.registry.modules();
        let deps: Arc<[Dependency]> = match &provider.deps {
            Some(deps) => deps.clone().into(),
            None if modules.has(class.name()) => modules.get(class.name())?,
            None => Arc::from(Vec::new()),
        };

        if deps.is_empty() {
            let instance = class.construct(Args::new())?;
            return self.container.set(token, Resolved::Instance(instance));
        }

        pending.enter(token);
        let args = self.resolve_dependencies(&deps, token, pending)?;
        let instance = class.construct(args)?;
        self.container.set(token, Resolved::Instance(instance))?;
        pending.leave(token);
        Ok(())
    }

    fn resolve_existing(&mut self, provider: &ExistingProvider, pending: &mut Pending) -> Result<()> {
        let token = &provider.token;
        let target = &provider.existing;
        pending.enter(token);
        if pending.contains(target) {
            return Err(pending.cycle(target));
        }
        if !self.container.has(target) {
            let aliased = self
                .providers
                .get(target)
                .cloned()
                .ok_or_else(|| Error::unresolved(target, token))?;
            self.resolve_provider(&aliased, pending)?;
        }
        let resolved = self.container.get(target)?.clone();
        trace!(alias = %token, target = %target, "Aliased provider");
        self.container.set(token, resolved)?;
        pending.leave(token);
        Ok(())
    }

    /// Compose a factory used as a class provider in a child scope
    fn resolve_nested_factory(&mut self, token: &Token, class: &Class) -> Result<()> {
        if self.scopes.contains(class.name()) {
            let mut path = self.scopes.clone();
            path.push(class.name().clone());
            return Err(Error::circular(path));
        }
        debug!(token = %token, factory = %class.name(), "Composing nested factory scope");

        // overrides target the root factory only
        let config = InjectorConfig {
            overrides: IndexMap::new(),
            ..self.config.clone()
        };
        let parent = Arc::new(self.container.clone());
        let mut child = Injector::with_config(self.registry, config).with_parent(parent);
        child.scopes = self.scopes.clone();
        let instance = child.bootstrap(class)?;
        self.container.set(token, Resolved::Instance(instance))
    }

    /// Resolve `deps` into the named arguments of `requested_by`
    ///
    /// Arguments are assembled in declaration order; on a key collision the
    /// later dependency wins.
    pub fn resolve_dependencies(
        &mut self,
        deps: &[Dependency],
        requested_by: &Token,
        pending: &mut Pending,
    ) -> Result<Args> {
        let mut args = Args::new();
        for dep in deps {
            let token = &dep.token;
            if pending.contains(token) {
                return Err(pending.cycle(token));
            }
            trace!(from = %requested_by, to = %token, "Resolving dependency");

            let Some(resolved) = self.lookup(dep, requested_by, pending)? else {
                continue;
            };
            match resolved {
                Resolved::Spread(fields) => args.spread(&fields),
                Resolved::Instance(instance) => args.insert(token.camel_case(), instance),
            }
        }
        Ok(args)
    }

    fn lookup(
        &mut self,
        dep: &Dependency,
        requested_by: &Token,
        pending: &mut Pending,
    ) -> Result<Option<Resolved>> {
        let token = &dep.token;
        if !self.container.has(token) {
            match self.providers.get(token).cloned() {
                Some(provider) => self.resolve_provider(&provider, pending)?,
                None => {
                    if dep.inherited {
                        if let Some(resolved) = self.container.get_inherited(token) {
                            trace!(token = %token, "Shared from parent scope");
                            return Ok(Some(resolved.clone()));
                        }
                    }
                    if dep.optional {
                        if self.config.strict_optional {
                            warn!(token = %token, requested_by = %requested_by, "Optional dependency not provided");
                        } else {
                            debug!(token = %token, requested_by = %requested_by, "Optional dependency not provided");
                        }
                        return Ok(None);
                    }
                    return Err(Error::unresolved(token, requested_by));
                }
            }
        }
        self.container.get(token).map(|resolved| Some(resolved.clone()))
    }

    /// Named arguments for the root factory: every local entry
    ///
    /// Spread entries are not spread here; the root receives their fields as
    /// one `serde_json::Map` under the camel-cased token.
    pub fn root_args(&self) -> Args {
        let mut args = Args::new();
        for (token, resolved) in self.container.entries() {
            let instance: Instance = match resolved {
                Resolved::Spread(fields) => Arc::clone(fields) as Instance,
                Resolved::Instance(instance) => instance.clone(),
            };
            args.insert(token.camel_case(), instance);
        }
        args
    }

    /// Compose `root` and keep the resolved container
    pub fn compose(mut self, root: &Class) -> Result<Composition> {
        info!(root = %root.name(), "Bootstrapping module factory");
        self.scopes.push(root.name().clone());
        self.load_factory(root)?;
        self.resolve_all()?;

        let root_instance = root.construct(self.root_args())?;
        info!(
            root = %root.name(),
            instances = self.container.len(),
            "Bootstrap complete"
        );
        Ok(Composition {
            root: root_instance,
            container: self.container,
        })
    }

    /// Compose `root` and return its instance
    pub fn bootstrap(self, root: &Class) -> Result<Instance> {
        self.compose(root).map(|composition| composition.root)
    }

    /// Compose `root` and downcast its instance to `T`
    pub fn bootstrap_as<T: Any + Send + Sync>(self, root: &Class) -> Result<Arc<T>> {
        let name = root.name().to_string();
        self.compose(root)?.root_as::<T>(&name)
    }
}
