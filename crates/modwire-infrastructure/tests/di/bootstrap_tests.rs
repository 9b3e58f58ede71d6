//! Bootstrap behavior of module factories

use std::sync::Arc;

use modwire_domain::{Args, Class, Dependency, Error, ProviderDecl, RegistryKind};
use modwire_infrastructure::di::{bootstrap, bootstrap_as, Registry};
use serde_json::{json, Map, Value as Json};

use super::fixtures::{message_store, recent_message, root, MessageStore, RecentMessage, Root};

fn store_and_recent(registry: &mut Registry) -> (Class, Class) {
    let store = message_store();
    let recent = recent_message();
    registry
        .register_module(&store, Vec::<Dependency>::new())
        .unwrap();
    registry.register_module(&recent, ["MessageStore"]).unwrap();
    (store, recent)
}

#[test]
fn test_injects_modules_into_root() {
    let mut registry = Registry::new();
    let (store, recent) = store_and_recent(&mut registry);
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("MessageStore").use_class(&store),
                ProviderDecl::provide("RecentMessage").use_class(&recent),
            ],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    let keys: Vec<&str> = instance.args.keys().collect();
    assert_eq!(keys, ["messageStore", "recentMessage"]);
}

#[test]
fn test_injects_dependencies_by_reference() {
    let mut registry = Registry::new();
    let (store, recent) = store_and_recent(&mut registry);
    let app = root("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&recent), ProviderDecl::from(&store)])
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    let store = instance.get::<MessageStore>("messageStore");
    let recent = instance.get::<RecentMessage>("recentMessage");
    assert!(Arc::ptr_eq(&store, &recent.message_store));
}

#[test]
fn test_dependencies_resolve_before_dependents() {
    let mut registry = Registry::new();
    let (store, recent) = store_and_recent(&mut registry);
    let app = root("Root");
    // RecentMessage is declared first and pulls MessageStore in on demand
    registry
        .register_factory(&app, [ProviderDecl::from(&recent), ProviderDecl::from(&store)])
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    let keys: Vec<&str> = instance.args.keys().collect();
    assert_eq!(keys, ["messageStore", "recentMessage"]);
}

#[test]
fn test_circular_dependency_lists_the_chain() {
    let mut registry = Registry::new();
    let a = Class::unit("ModuleA");
    let b = Class::unit("ModuleB");
    let c = Class::unit("ModuleC");
    registry.register_module(&a, ["ModuleC"]).unwrap();
    registry.register_module(&b, ["ModuleA"]).unwrap();
    registry.register_module(&c, ["ModuleB"]).unwrap();
    let app = Class::unit("RootModule");
    registry
        .register_factory(&app, [&a, &b, &c].map(ProviderDecl::from))
        .unwrap();

    let err = bootstrap(&registry, &app).unwrap_err();
    assert!(err.is_circular());
    assert_eq!(
        err.to_string(),
        "Circular dependency detected: ModuleA -> ModuleC -> ModuleB -> ModuleA"
    );
}

#[test]
fn test_self_dependency_is_circular() {
    let mut registry = Registry::new();
    let selfish = Class::unit("Selfish");
    registry.register_module(&selfish, ["Selfish"]).unwrap();
    let app = Class::unit("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&selfish)])
        .unwrap();

    let err = bootstrap(&registry, &app).unwrap_err();
    let path: Vec<&str> = err.cycle_path().unwrap().iter().map(|t| t.as_str()).collect();
    assert_eq!(path, ["Selfish", "Selfish"]);
}

#[test]
fn test_factory_inheritance() {
    let mut registry = Registry::new();
    let module_a = Class::unit("ModuleA");
    let module_b = Class::unit("ModuleB");
    let parent = root("RootModule");
    let child = root("ChildModule").extends(&parent);
    registry
        .register_factory(&parent, [ProviderDecl::from(&module_b)])
        .unwrap();
    registry
        .register_factory(&child, [ProviderDecl::from(&module_a)])
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &child).unwrap();
    let keys: Vec<&str> = instance.args.keys().collect();
    assert_eq!(keys, ["moduleB", "moduleA"]);
}

#[test]
fn test_parent_factory_registered_after_child_bootstrap() {
    let mut registry = Registry::new();
    let parent = root("RootModule");
    let child = root("ChildModule").extends(&parent);
    registry
        .register_factory(&child, [ProviderDecl::provide("X").use_json(json!(1))])
        .unwrap();

    let first: Arc<Root> = bootstrap_as(&registry, &child).unwrap();
    assert_eq!(first.args.keys().collect::<Vec<_>>(), ["x"]);

    registry
        .register_factory(&parent, [ProviderDecl::provide("Y").use_json(json!(2))])
        .unwrap();
    let second: Arc<Root> = bootstrap_as(&registry, &child).unwrap();
    assert_eq!(second.args.keys().collect::<Vec<_>>(), ["y", "x"]);
}

#[test]
fn test_value_inheritance_with_merge() {
    let mut registry = Registry::new();
    let parent = root("RootModule");
    let child = root("ChildModule").extends(&parent);
    registry
        .register_factory(
            &parent,
            [ProviderDecl::provide("Options")
                .use_json(json!({"appKey": "appKey", "appSecret": "appSecret"}))],
        )
        .unwrap();
    registry
        .register_factory(
            &child,
            [ProviderDecl::provide("Options")
                .use_json(json!({"appKey": "newAppKey"}))
                .merge()],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &child).unwrap();
    assert_eq!(
        *instance.get::<Json>("options"),
        json!({"appKey": "newAppKey", "appSecret": "appSecret"})
    );
}

#[test]
fn test_value_overwrite_without_merge() {
    let mut registry = Registry::new();
    let parent = root("RootModule");
    let child = root("ChildModule").extends(&parent);
    registry
        .register_factory(
            &parent,
            [ProviderDecl::provide("Options")
                .use_json(json!({"appKey": "appKey", "appSecret": "appSecret"}))],
        )
        .unwrap();
    registry
        .register_factory(
            &child,
            [ProviderDecl::provide("Options").use_json(json!({"appKey": "newAppKey"}))],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &child).unwrap();
    assert_eq!(*instance.get::<Json>("options"), json!({"appKey": "newAppKey"}));
}

#[test]
fn test_missing_dependency_names_requester() {
    let mut registry = Registry::new();
    let needy = Class::unit("Needy");
    registry.register_module(&needy, ["Missing"]).unwrap();
    let app = Class::unit("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&needy)])
        .unwrap();

    let err = bootstrap(&registry, &app).unwrap_err();
    assert!(err.is_unresolved());
    assert_eq!(
        err.to_string(),
        "Module [Missing] required by [Needy] is not registered as a provider"
    );
}

#[test]
fn test_optional_dependency_is_omitted() {
    let mut registry = Registry::new();
    let seen = Class::new("Relaxed", |args: Args| Ok(args.contains("missing")));
    registry
        .register_module(&seen, [Dependency::optional("Missing")])
        .unwrap();
    let app = root("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&seen)])
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert!(!*instance.get::<bool>("relaxed"));
    assert!(!instance.args.contains("missing"));
}

#[test]
fn test_spread_values_and_aliases() {
    let mut registry = Registry::new();
    let store = Class::unit("MessageStore");
    let recent = Class::new("RecentMessage", |args: Args| {
        let enabled = args.try_get::<Json>("enabled");
        Ok((
            enabled.and_then(|v| v.as_bool()).unwrap_or(false),
            args.contains("existingOptions"),
            args.contains("recentMessageOptions"),
        ))
    });
    registry
        .register_module(&store, Vec::<Dependency>::new())
        .unwrap();
    registry
        .register_module(
            &recent,
            [
                Dependency::new("MessageStore"),
                Dependency::new("ExistingOptions"),
                Dependency::optional("RecentMessageOptions"),
            ],
        )
        .unwrap();
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("MessageStore").use_class(&store),
                ProviderDecl::provide("RecentMessage").use_class(&recent),
                ProviderDecl::provide("RecentMessageOptions")
                    .use_json(json!({"enabled": true}))
                    .spread(),
                ProviderDecl::provide("ExistingOptions").use_existing("RecentMessageOptions"),
            ],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    let flags = instance.get::<(bool, bool, bool)>("recentMessage");
    assert_eq!(*flags, (true, false, false));
    // the root gets spread entries whole, under their own keys
    let keys: Vec<&str> = instance.args.keys().collect();
    assert_eq!(
        keys,
        ["messageStore", "recentMessageOptions", "existingOptions", "recentMessage"]
    );
    let options = instance.get::<Map<String, Json>>("recentMessageOptions");
    assert_eq!(options["enabled"], json!(true));
    assert!(Arc::ptr_eq(
        &options,
        &instance.get::<Map<String, Json>>("existingOptions")
    ));
    assert!(!instance.args.contains("enabled"));
}

#[test]
fn test_spread_keys_do_not_shadow_root_arguments() {
    let mut registry = Registry::new();
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("Mode").use_json(json!("plain")),
                ProviderDecl::provide("Options")
                    .use_json(json!({"mode": "spread", "b": 2}))
                    .spread(),
            ],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert_eq!(instance.args.keys().collect::<Vec<_>>(), ["mode", "options"]);
    assert_eq!(*instance.get::<Json>("mode"), json!("plain"));
    assert_eq!(instance.get::<Map<String, Json>>("options")["b"], json!(2));
}

#[test]
fn test_later_spread_wins_on_key_collision() {
    let mut registry = Registry::new();
    let consumer = Class::new("Consumer", |args: Args| {
        Ok(args.json("mode").map(|v| (*v).clone()).unwrap_or(Json::Null))
    });
    registry
        .register_module(&consumer, ["First", "Second"])
        .unwrap();
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("First").use_json(json!({"mode": "a"})).spread(),
                ProviderDecl::provide("Second").use_json(json!({"mode": "b"})).spread(),
                ProviderDecl::from(&consumer),
            ],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert_eq!(*instance.get::<Json>("consumer"), json!("b"));
}

#[test]
fn test_alias_shares_the_instance() {
    let mut registry = Registry::new();
    let store = message_store();
    registry
        .register_module(&store, Vec::<Dependency>::new())
        .unwrap();
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("Store").use_existing("MessageStore"),
                ProviderDecl::from(&store),
            ],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert!(Arc::ptr_eq(
        &instance.get::<MessageStore>("store"),
        &instance.get::<MessageStore>("messageStore")
    ));
}

#[test]
fn test_alias_cycle_is_detected() {
    let mut registry = Registry::new();
    let app = Class::unit("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("A").use_existing("B"),
                ProviderDecl::provide("B").use_existing("A"),
            ],
        )
        .unwrap();

    let err = bootstrap(&registry, &app).unwrap_err();
    assert_eq!(err.to_string(), "Circular dependency detected: A -> B -> A");
}

#[test]
fn test_factory_provider_receives_dependencies() {
    let mut registry = Registry::new();
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("Config").use_json(json!({"base": 40})),
                ProviderDecl::provide("Answer")
                    .use_factory(|args: Args| {
                        let config = args.json("config")?;
                        Ok(config["base"].as_u64().unwrap_or_default() + 2)
                    })
                    .deps(["Config"]),
            ],
        )
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert_eq!(*instance.get::<u64>("answer"), 42);
}

#[test]
fn test_explicit_class_deps_override_module_deps() {
    let mut registry = Registry::new();
    let (_, recent) = store_and_recent(&mut registry);
    let app = root("Root");
    registry
        .register_factory(
            &app,
            [
                ProviderDecl::provide("Store").use_value(MessageStore),
                ProviderDecl::provide("RecentMessage")
                    .use_class(&recent)
                    .deps([Dependency::new("Store")]),
            ],
        )
        .unwrap();

    // the constructor still asks for `messageStore`
    let err = bootstrap(&registry, &app).unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

#[test]
fn test_inherited_optional_dependency_made_required() {
    let base = Class::unit("BaseModule");
    let strict = Class::unit("StrictModule").extends(&base);

    let mut registry = Registry::new();
    registry
        .register_module(&base, [Dependency::optional("X")])
        .unwrap();
    registry.register_module(&strict, ["X"]).unwrap();

    let relaxed_app = Class::unit("RelaxedApp");
    registry
        .register_factory(&relaxed_app, [ProviderDecl::from(&base)])
        .unwrap();
    assert!(bootstrap(&registry, &relaxed_app).is_ok());

    let strict_app = Class::unit("StrictApp");
    registry
        .register_factory(&strict_app, [ProviderDecl::from(&strict)])
        .unwrap();
    let err = bootstrap(&registry, &strict_app).unwrap_err();
    assert!(err.is_unresolved());
}

#[test]
fn test_construction_error_aborts_bootstrap() {
    let mut registry = Registry::new();
    let broken = Class::new("Broken", |_| -> anyhow::Result<()> {
        anyhow::bail!("no database")
    });
    let app = Class::unit("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&broken)])
        .unwrap();

    let err = bootstrap(&registry, &app).unwrap_err();
    assert_eq!(err.to_string(), "Failed to construct [Broken]: no database");
}

#[test]
fn test_unregistered_root_is_not_found() {
    let registry = Registry::new();
    let err = bootstrap(&registry, &Class::unit("Nowhere")).unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            kind: RegistryKind::Factory,
            ..
        }
    ));
}

#[test]
fn test_empty_factory_bootstraps() {
    let mut registry = Registry::new();
    let app = root("Empty");
    registry
        .register_factory(&app, Vec::<ProviderDecl>::new())
        .unwrap();

    let instance: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert!(instance.args.is_empty());
}

#[test]
fn test_bootstrap_as_checks_root_type() {
    let mut registry = Registry::new();
    let app = Class::unit("Root");
    registry
        .register_factory(&app, Vec::<ProviderDecl>::new())
        .unwrap();

    let err = bootstrap_as::<String>(&registry, &app).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_repeated_bootstraps_are_isolated() {
    let mut registry = Registry::new();
    let (store, recent) = store_and_recent(&mut registry);
    let app = root("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&store), ProviderDecl::from(&recent)])
        .unwrap();

    let first: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    let second: Arc<Root> = bootstrap_as(&registry, &app).unwrap();
    assert!(!Arc::ptr_eq(
        &first.get::<MessageStore>("messageStore"),
        &second.get::<MessageStore>("messageStore")
    ));
}

#[test]
fn test_parallel_bootstraps_share_a_registry() {
    let mut registry = Registry::new();
    let (store, recent) = store_and_recent(&mut registry);
    let app = root("Root");
    registry
        .register_factory(&app, [ProviderDecl::from(&store), ProviderDecl::from(&recent)])
        .unwrap();

    let registry = &registry;
    let app = &app;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || bootstrap_as::<Root>(registry, app).map(|r| r.args.len())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 2);
        }
    });
}
