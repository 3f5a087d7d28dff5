//! Inheritance pruning: is a value a real override or just what `default` provides?

use super::diff_against;
use crate::tree::ConfigTree;

/// Drop the values of a non-default scope that equal the default scope's value.
///
/// Groups and sections left empty are removed, including the empty section
/// produced by a `section/*/field` lookup with no match.
pub fn prune_inherited(scope_values: ConfigTree, default_values: &ConfigTree) -> ConfigTree {
    diff_against(scope_values, default_values)
}
