//! Unit tests for constructor arguments

use std::sync::Arc;

use modwire_domain::instance::instance;
use modwire_domain::{Args, Error};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, PartialEq)]
struct Store {
    id: u32,
}

#[test]
fn test_typed_get() {
    let mut args = Args::new();
    args.insert("messageStore", instance(Store { id: 7 }));

    let store = args.get::<Store>("messageStore").unwrap();
    assert_eq!(store.id, 7);
    assert!(args.try_get::<String>("messageStore").is_none());
}

#[test]
fn test_get_missing_argument() {
    let args = Args::new();
    match args.get::<Store>("messageStore") {
        Err(Error::MissingArgument { key }) => assert_eq!(key, "messageStore"),
        other => panic!("Expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn test_get_wrong_type() {
    let mut args = Args::new();
    args.insert("messageStore", instance(42u64));
    assert!(matches!(
        args.get::<Store>("messageStore"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_spread_fields_become_arguments() {
    let mut args = Args::new();
    let fields = json!({ "a": 1, "b": 2 });
    args.spread(fields.as_object().unwrap());

    assert_eq!(args.len(), 2);
    assert_eq!(*args.json("a").unwrap(), json!(1));
    assert_eq!(*args.json("b").unwrap(), json!(2));
    assert!(!args.contains("value"));
}

#[test]
fn test_later_insert_wins() {
    let mut args = Args::new();
    args.spread(json!({ "enabled": false }).as_object().unwrap());
    args.spread(json!({ "enabled": true }).as_object().unwrap());
    assert_eq!(*args.json("enabled").unwrap(), json!(true));
    assert_eq!(args.keys().collect::<Vec<_>>(), vec!["enabled"]);
}

#[test]
fn test_deserialize_json_argument() {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Options {
        app_key: String,
        app_secret: Option<String>,
    }

    let mut args = Args::new();
    args.insert("options", Arc::new(json!({ "appKey": "k1" })));
    let options: Options = args.deserialize("options").unwrap();
    assert_eq!(options.app_key, "k1");
    assert!(options.app_secret.is_none());
}

#[test]
fn test_iteration_order_is_insertion_order() {
    let mut args = Args::new();
    args.insert("b", instance(1u8));
    args.insert("a", instance(2u8));
    let keys: Vec<_> = args.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a"]);
}
