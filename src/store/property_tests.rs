//! Property-Based Tests for the Store Module
//!
//! Uses proptest to check the in-process store against a simple model.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::store::{glob_match, KvStore, MemoryStore, StoreError};

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-c]{1,4}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of set/get/delete behaves like a plain map with
    // last-write-wins semantics.
    #[test]
    fn prop_last_write_wins(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let rt = runtime();
        let store = MemoryStore::new();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    rt.block_on(store.set(&key, &value)).unwrap();
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    let actual = rt.block_on(store.get(&key));
                    match model.get(&key) {
                        Some(expected) => prop_assert_eq!(actual, Ok(expected.clone())),
                        None => prop_assert_eq!(actual, Err(StoreError::NotFound)),
                    }
                }
                StoreOp::Delete { key } => {
                    let actual = rt.block_on(store.delete(&key));
                    if model.remove(&key).is_some() {
                        prop_assert!(actual.is_ok());
                    } else {
                        prop_assert_eq!(actual, Err(StoreError::NotFound));
                    }
                }
            }
        }

        prop_assert_eq!(rt.block_on(store.len()), model.len());
    }

    // A prefix pattern lists exactly the keys sharing that prefix.
    #[test]
    fn prop_prefix_listing(
        keys in prop::collection::hash_set("[a-z]{1,6}", 0..20),
        prefix in "[a-z]{1,2}",
    ) {
        let rt = runtime();
        let store = MemoryStore::new();
        for key in &keys {
            rt.block_on(store.set(key, "v")).unwrap();
        }

        let listed = rt.block_on(store.keys(&format!("{}*", prefix))).unwrap();
        let mut expected: Vec<String> = keys
            .iter()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect();
        expected.sort();

        prop_assert_eq!(listed, expected);
    }

    // A pattern without wildcards matches only the identical string.
    #[test]
    fn prop_literal_pattern_matches_itself(text in "[a-z0-9_:]{0,16}", other in "[a-z0-9_:]{0,16}") {
        prop_assert!(glob_match(&text, &text));
        prop_assert_eq!(glob_match(&text, &other), text == other);
    }
}
