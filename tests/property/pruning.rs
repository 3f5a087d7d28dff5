//! Property-based tests for pruning and aggregation guarantees

use confex::tree::{FieldMap, GroupMap};
use confex::{
    merge, prune_inherited, remove_factory_defaults, ConfigTree, FactoryDefaults, ResultTree,
    ScopedTrees,
};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Small key alphabets so that generated trees overlap often.
fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[ab]{0,2}".prop_map(Value::String),
        (0i64..3).prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn config_tree() -> impl Strategy<Value = ConfigTree> {
    let fields = prop::collection::btree_map("f[12]", leaf_value(), 0..3);
    let groups = prop::collection::btree_map("g[12]", fields, 0..3);
    prop::collection::btree_map("s[12]", groups, 0..3)
        .prop_map(|sections: BTreeMap<String, GroupMap>| sections.into_iter().collect())
}

fn result_tree() -> impl Strategy<Value = ResultTree> {
    (
        config_tree(),
        prop::collection::btree_map("w[12]", config_tree(), 0..3),
        prop::collection::btree_map("st[12]", config_tree(), 0..3),
    )
        .prop_map(|(default, websites, stores)| ScopedTrees {
            default,
            websites,
            stores,
        })
}

fn has_empty_branch(tree: &ConfigTree) -> bool {
    tree.sections().any(|(_, groups)| {
        groups.is_empty() || groups.values().any(|fields: &FieldMap| fields.is_empty())
    })
}

/// Pruning against the default scope twice changes nothing the second time
#[test]
fn test_prune_inherited_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(config_tree(), config_tree()), |(scope, default)| {
            let once = prune_inherited(scope, &default);
            let twice = prune_inherited(once.clone(), &default);
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}

/// No surviving leaf equals the default at the same path, and no empty branch survives
#[test]
fn test_prune_inherited_leaves_only_overrides_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(config_tree(), config_tree()), |(scope, default)| {
            let before = scope.clone();
            let pruned = prune_inherited(scope, &default);

            prop_assert!(!has_empty_branch(&pruned));
            for (section, group, field, value) in pruned.leaves() {
                prop_assert_ne!(default.get(section, group, field), Some(value));
                prop_assert_eq!(before.get(section, group, field), Some(value));
            }
            for (section, group, field, value) in before.leaves() {
                if default.get(section, group, field) != Some(value) {
                    prop_assert!(pruned.get(section, group, field).is_some());
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Removing factory defaults twice changes nothing the second time
#[test]
fn test_remove_factory_defaults_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(result_tree(), result_tree()), |(result, baseline)| {
            let factory = FactoryDefaults::new(baseline);
            let once = remove_factory_defaults(result, &factory);
            let twice = remove_factory_defaults(once.clone(), &factory);

            prop_assert!(!has_empty_branch(&once.default));
            for tree in once.websites.values().chain(once.stores.values()) {
                prop_assert!(tree.has_values());
                prop_assert!(!has_empty_branch(tree));
            }
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}

/// Merging is associative: folding in one pass equals folding a pre-merged prefix
#[test]
fn test_merge_associative_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(result_tree(), result_tree(), result_tree()), |(a, b, c)| {
            let flat = merge(vec![a.clone(), b.clone(), c.clone()]);
            let left = merge(vec![merge(vec![a.clone(), b.clone()]), c.clone()]);
            let right = merge(vec![a, merge(vec![b, c])]);
            prop_assert_eq!(&flat, &left);
            prop_assert_eq!(&flat, &right);
            Ok(())
        })
        .unwrap();
}

/// Fragments with disjoint sections merge to the same tree in either order
#[test]
fn test_merge_disjoint_commutative_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(config_tree(), config_tree()), |(left, right)| {
            let rename = |tree: ConfigTree, prefix: &str| -> ConfigTree {
                tree.sections()
                    .map(|(section, groups)| (format!("{}_{}", prefix, section), groups.clone()))
                    .collect()
            };
            let a = ScopedTrees {
                default: rename(left, "a"),
                ..ScopedTrees::default()
            };
            let b = ScopedTrees {
                default: rename(right, "b"),
                ..ScopedTrees::default()
            };

            let ab = merge(vec![a.clone(), b.clone()]);
            let ba = merge(vec![b.clone(), a.clone()]);
            prop_assert_eq!(&ab, &ba);
            prop_assert_eq!(ab.leaf_count(), a.leaf_count() + b.leaf_count());
            Ok(())
        })
        .unwrap();
}
