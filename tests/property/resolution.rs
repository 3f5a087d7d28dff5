//! Property-based tests for pattern resolution

use confex::resolve::resolve;
use confex::tree::GroupMap;
use confex::{ConfigTree, PathPattern};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

fn config_tree() -> impl Strategy<Value = ConfigTree> {
    let fields = prop::collection::btree_map("f[123]", "[a-z]{1,3}".prop_map(Value::String), 0..3);
    let groups = prop::collection::btree_map("g[123]", fields, 0..3);
    prop::collection::btree_map("s[12]", groups, 0..3)
        .prop_map(|sections: BTreeMap<String, GroupMap>| sections.into_iter().collect())
}

/// `section`, `section/*` and `section/*/*` all select the whole section
#[test]
fn test_double_wildcard_is_whole_section_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(config_tree(), "s[12]"), |(tree, section)| {
            let full = resolve(&tree, &PathPattern::parse(&format!("{}/*/*", section)).unwrap());
            let short = resolve(&tree, &PathPattern::parse(&section).unwrap());
            let padded = resolve(&tree, &PathPattern::parse(&format!("{}/*", section)).unwrap());

            prop_assert_eq!(full.section(&section), tree.section(&section));
            prop_assert_eq!(&full, &short);
            prop_assert_eq!(&full, &padded);
            Ok(())
        })
        .unwrap();
}

/// `section/*/field` yields exactly the leaves named `field` in that section
#[test]
fn test_field_across_groups_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(config_tree(), "s[12]", "f[123]"), |(tree, section, field)| {
            let pattern = PathPattern::parse(&format!("{}/*/{}", section, field)).unwrap();
            let resolved = resolve(&tree, &pattern);

            let expected: Vec<_> = tree
                .leaves()
                .filter(|(s, _, f, _)| *s == section && *f == field)
                .collect();
            let actual: Vec<_> = resolved.leaves().collect();
            prop_assert_eq!(actual, expected);
            Ok(())
        })
        .unwrap();
}
