//! Scope query engine
//!
//! Runs one export query over an already loaded [`Snapshot`]. For each path:
//! the pattern is parsed, resolved against every requested scope instance,
//! pruned against the default scope, and merged into a sparse result. Multiple
//! paths are folded with [`ResultAggregator`]; any invalid pattern aborts the
//! whole query before resolution starts.

use crate::aggregate::ResultAggregator;
use crate::error::QueryError;
use crate::pattern::PathPattern;
use crate::prune::{self, prune_inherited};
use crate::resolve::resolve;
use crate::scope::{is_exportable_instance, ScopeSet, ScopeType};
use crate::snapshot::{FactoryDefaults, Snapshot};
use crate::tree::{ConfigTree, ResultTree};
use tracing::{debug, debug_span, trace};

/// Query engine over a read-only snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ScopeQueryEngine<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> ScopeQueryEngine<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// Overridden values for one path across the requested scope types.
    pub fn values(&self, path: &str, scopes: &ScopeSet) -> Result<ResultTree, QueryError> {
        let pattern = PathPattern::parse(path)?;
        Ok(self.values_for_pattern(&pattern, scopes))
    }

    /// Overridden values for an already parsed pattern.
    ///
    /// The default scope is always resolved because it is the inheritance
    /// baseline for websites and stores, but it only appears in the result
    /// when requested.
    pub fn values_for_pattern(&self, pattern: &PathPattern, scopes: &ScopeSet) -> ResultTree {
        let _span = debug_span!("resolve_path", path = %pattern).entered();

        let default_values = resolve(self.snapshot.default_tree(), pattern);
        let mut result = ResultTree::new();
        if scopes.contains(ScopeType::Default) {
            result.default = default_values.clone();
        }

        for scope in scopes.iter().filter(|s| *s != ScopeType::Default) {
            let values = self.instance_values(scope, pattern, &default_values);
            if let Some(target) = result.instances_mut(scope) {
                target.extend(values);
            }
        }

        result.collapse_empty();
        debug!(values = result.leaf_count(), "Resolved path");
        result
    }

    /// Fold several paths into one result; fails on the first invalid pattern
    /// without resolving anything.
    pub fn values_for_paths<I, S>(&self, paths: I, scopes: &ScopeSet) -> Result<ResultTree, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = paths
            .into_iter()
            .map(|path| PathPattern::parse(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.values_for_patterns(&patterns, scopes))
    }

    /// Fold already parsed patterns into one result.
    pub fn values_for_patterns(&self, patterns: &[PathPattern], scopes: &ScopeSet) -> ResultTree {
        let mut aggregator = ResultAggregator::new();
        for pattern in patterns {
            aggregator.add(self.values_for_pattern(pattern, scopes));
        }
        debug!(paths = aggregator.fragments(), "Aggregated path results");
        aggregator.finish()
    }

    /// Drop values equal to the factory defaults of their scope.
    pub fn remove_factory_defaults(&self, result: ResultTree, factory: &FactoryDefaults) -> ResultTree {
        prune::remove_factory_defaults(result, factory)
    }

    fn instance_values(
        &self,
        scope: ScopeType,
        pattern: &PathPattern,
        default_values: &ConfigTree,
    ) -> Vec<(String, ConfigTree)> {
        let Some(instances) = self.snapshot.instances(scope) else {
            return Vec::new();
        };

        instances
            .iter()
            .filter(|(code, _)| {
                let exportable = is_exportable_instance(code);
                if !exportable {
                    trace!(scope = %scope, instance = %code, "Skipping reserved scope instance");
                }
                exportable
            })
            .filter_map(|(code, tree)| {
                let values = prune_inherited(resolve(tree, pattern), default_values);
                values.has_values().then(|| (code.clone(), values))
            })
            .collect()
    }
}
