//! Property-based tests using proptest
//!
//! These tests verify the field-mapping engine and endpoint construction
//! using randomized payloads and paths.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use towerctl::credential::{get_kind, Credential, InputValue};
use towerctl::resource::endpoint::{clean, item, item_without_slash};
use towerctl::resource::{
    apply_field_mappings, set_string, Attr, Callee, Diagnostics, FieldMapping, Outcome, Payload,
    Source, Updater,
};

/// Generate an arbitrary scalar JSON value
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 _.-]{0,24}".prop_map(Value::String),
    ]
}

/// Generate a flat payload with arbitrary keys
fn arb_payload() -> impl Strategy<Value = Payload> {
    prop::collection::btree_map("[a-z_]{1,12}", arb_scalar(), 0..16)
        .prop_map(|entries| entries.into_iter().collect::<Map<String, Value>>())
}

/// Generate a credential response payload
fn arb_credential_payload() -> impl Strategy<Value = Payload> {
    (
        prop::option::of(0i64..100_000),
        prop::option::of("[a-z][a-z0-9-]{0,30}"),
        prop::option::of(arb_scalar()),
        prop::option::of(prop::option::of(1i64..50)),
        prop::option::of(("[a-z]{0,12}", any::<bool>())),
    )
        .prop_map(|(id, name, description, organization, inputs)| {
            let mut map = Map::new();
            if let Some(id) = id {
                map.insert("id".to_string(), json!(id));
            }
            if let Some(name) = name {
                map.insert("name".to_string(), json!(name));
            }
            if let Some(description) = description {
                map.insert("description".to_string(), description);
            }
            if let Some(organization) = organization {
                map.insert("organization".to_string(), json!(organization));
            }
            if let Some((username, authorize)) = inputs {
                map.insert(
                    "inputs".to_string(),
                    json!({"username": username, "password": "$encrypted$", "authorize": authorize}),
                );
            }
            map
        })
}

/// Generate a slash separated path, possibly messy
fn arb_path() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        "[a-z0-9_]{1,8}",
        Just(".".to_string()),
        Just("..".to_string()),
        Just(String::new()),
    ];
    prop::collection::vec(segment, 0..8)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

proptest! {
    /// Empty mapping list: no diagnostics, no error, whatever the payload
    #[test]
    fn empty_mapping_list_is_a_no_op(data in arb_payload()) {
        let outcome = apply_field_mappings(Some(&data), Vec::<FieldMapping>::new());
        prop_assert!(outcome.diagnostics.is_empty());
        prop_assert!(outcome.result.is_ok());
    }

    /// Setters only run for keys present in the payload
    #[test]
    fn absent_keys_never_invoke_setters(data in arb_payload(), key in "[A-Z]{1,8}") {
        let mut calls = 0;
        let mut field = Attr::from("unchanged");
        let outcome = apply_field_mappings(
            Some(&data),
            vec![FieldMapping::new(&key, |v| {
                calls += 1;
                set_string(&mut field, v)
            })],
        );
        prop_assert!(outcome.result.is_ok());
        prop_assert_eq!(calls, 0);
        prop_assert_eq!(field, Attr::from("unchanged"));
    }

    /// Every present key invokes its setter exactly once
    #[test]
    fn present_keys_invoke_setter_once(data in arb_payload()) {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let mappings: Vec<FieldMapping> = data
            .keys()
            .map(move |key| {
                FieldMapping::new(key.as_str(), move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Outcome::done(Diagnostics::new())
                })
            })
            .collect();

        let outcome = apply_field_mappings(Some(&data), mappings);
        prop_assert!(outcome.diagnostics.is_empty());
        prop_assert_eq!(calls.load(Ordering::SeqCst), data.len());
    }

    /// Applying the same payload twice gives the same state as applying it once
    #[test]
    fn update_is_idempotent(data in arb_credential_payload()) {
        let kind = get_kind("net").unwrap();
        let mut once = Credential::new(kind);
        once.set_input_str("password", "secret").unwrap();
        let mut twice = once.clone();

        let first = once.update_with_api_data(Source::Resource, Callee::Read, &data);
        let _ = twice.update_with_api_data(Source::Resource, Callee::Read, &data);
        let second = twice.update_with_api_data(Source::Resource, Callee::Read, &data);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(first.diagnostics, second.diagnostics);
        prop_assert_eq!(
            once.input("password"),
            Some(&InputValue::String(Attr::from("secret")))
        );
    }

    /// Cleaning is idempotent and never leaves empty segments
    #[test]
    fn clean_is_idempotent(path in arb_path()) {
        let cleaned = clean(&path);
        prop_assert_eq!(clean(&cleaned), cleaned.clone());
        prop_assert!(cleaned.starts_with('/'));
        prop_assert!(!cleaned.contains("//"));
    }

    /// Item endpoints end in `/<id>/`; update endpoints in `/<id>`
    #[test]
    fn item_endpoints_carry_the_id(path in arb_path(), id in 0i64..1_000_000) {
        let suffix = format!("/{}/", id);
        prop_assert!(item(&path, id).ends_with(&suffix));

        let unslashed = item_without_slash(&path, id);
        let expected_suffix = format!("/{}", id);
        prop_assert!(unslashed.ends_with(&expected_suffix));
        prop_assert!(!unslashed.contains("//"));
    }
}
