//! Pruning passes
//!
//! Two independent diffs, applied in sequence:
//! - inheritance: drop a scope's values equal to the live default scope
//! - baseline: drop values equal to the factory default for the same scope
//!
//! Both compare values strictly (type and content), so `"1"` and `1` differ.

mod baseline;
mod inheritance;

pub use baseline::remove_factory_defaults;
pub use inheritance::prune_inherited;

use crate::tree::ConfigTree;

/// Remove every leaf of `tree` whose value at the same path in `baseline` is identical.
fn diff_against(mut tree: ConfigTree, baseline: &ConfigTree) -> ConfigTree {
    tree.retain_leaves(|section, group, field, value| {
        baseline.get(section, group, field) != Some(value)
    });
    tree
}
