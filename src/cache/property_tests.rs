//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's bookkeeping and invalidation behaviour
//! over arbitrary operation sequences.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{product_key, CacheStore, PRODUCTS_KEY};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Keys shaped like the ones the product service uses
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(PRODUCTS_KEY.to_string()),
        (1i64..20).prop_map(product_key),
    ]
}

fn snapshot_strategy() -> impl Strategy<Value = Value> {
    (any::<i64>(), "[a-zA-Z0-9 ]{1,32}").prop_map(|(id, name)| json!({"id": id, "name": name}))
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: Value },
    Get { key: String },
    Forget { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), snapshot_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Forget { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The store behaves like a map under put/get/forget while nothing expires,
    // and its counters match what callers observed.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let mut model: HashMap<String, Value> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_invalidations: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key.clone(), value.clone(), TEST_TTL);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                    if got.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
                CacheOp::Forget { key } => {
                    let removed = store.forget(&key);
                    prop_assert_eq!(removed, model.remove(&key).is_some());
                    if removed {
                        expected_invalidations += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.invalidations, expected_invalidations);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // A forgotten key is never served again until it is put back.
    #[test]
    fn prop_forget_invalidates(key in key_strategy(), value in snapshot_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.put(key.clone(), value, TEST_TTL);
        prop_assert!(store.get(&key).is_some());

        store.forget(&key);
        prop_assert!(store.get(&key).is_none());
    }

    // The store never holds more than its capacity, and every overflow
    // is accounted for as an eviction.
    #[test]
    fn prop_capacity_enforced(
        capacity in 1usize..10,
        keys in prop::collection::hash_set("[a-z]{1,8}", 1..40),
    ) {
        let mut store = CacheStore::new(capacity);
        let inserted = keys.len();

        for key in keys {
            store.put(key, json!(null), TEST_TTL);
            prop_assert!(store.len() <= capacity);
        }

        let overflow = inserted.saturating_sub(capacity) as u64;
        prop_assert_eq!(store.stats().evictions, overflow);
    }

    // Overwriting keeps the latest snapshot and a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in snapshot_strategy(),
        second in snapshot_strategy(),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.put(key.clone(), first, TEST_TTL);
        store.put(key.clone(), second.clone(), TEST_TTL);

        prop_assert_eq!(store.get(&key), Some(second));
        prop_assert_eq!(store.len(), 1);
    }
}
