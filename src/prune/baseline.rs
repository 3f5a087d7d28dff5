//! Baseline pruning: drop values an administrator never changed from ship defaults.

use super::diff_against;
use crate::scope::ScopeType;
use crate::snapshot::FactoryDefaults;
use crate::tree::ResultTree;
use tracing::debug;

/// Remove values identical to the factory default of the same scope.
///
/// The default scope is compared with the factory default tree. Each website
/// or store instance is compared with its own factory entry; instances the
/// factory data does not declare are left untouched.
pub fn remove_factory_defaults(mut result: ResultTree, factory: &FactoryDefaults) -> ResultTree {
    let before = result.leaf_count();

    if let Some(baseline) = factory.baseline(ScopeType::Default, ScopeType::Default.as_str()) {
        result.default = diff_against(std::mem::take(&mut result.default), baseline);
    }

    for scope in [ScopeType::Websites, ScopeType::Stores] {
        let Some(instances) = result.instances_mut(scope) else {
            continue;
        };
        for (code, tree) in instances.iter_mut() {
            match factory.baseline(scope, code) {
                Some(baseline) => *tree = diff_against(std::mem::take(tree), baseline),
                None => debug!(scope = %scope, instance = %code, "No factory baseline for scope instance"),
            }
        }
    }

    result.collapse_empty();
    debug!(
        removed = before - result.leaf_count(),
        remaining = result.leaf_count(),
        "Removed factory default values"
    );
    result
}
