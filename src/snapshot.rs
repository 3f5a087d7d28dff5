//! Read-once configuration snapshots.
//!
//! Both types are built once per export run by a
//! [`SnapshotSource`](crate::source::SnapshotSource) and then only borrowed.

use crate::scope::ScopeType;
use crate::tree::{ConfigTree, ScopedTrees};
use std::collections::BTreeMap;

/// Current configuration of every scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(ScopedTrees);

impl Snapshot {
    pub fn new(trees: ScopedTrees) -> Self {
        Self(trees)
    }

    pub fn trees(&self) -> &ScopedTrees {
        &self.0
    }

    pub fn default_tree(&self) -> &ConfigTree {
        &self.0.default
    }

    /// Raw instances of `scope`, reserved names included.
    pub fn instances(&self, scope: ScopeType) -> Option<&BTreeMap<String, ConfigTree>> {
        self.0.instances(scope)
    }
}

/// Configuration as shipped, before any administrative change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryDefaults(ScopedTrees);

impl FactoryDefaults {
    pub fn new(trees: ScopedTrees) -> Self {
        Self(trees)
    }

    pub fn trees(&self) -> &ScopedTrees {
        &self.0
    }

    /// Baseline tree for one scope instance, if the factory data declares one.
    pub fn baseline(&self, scope: ScopeType, instance: &str) -> Option<&ConfigTree> {
        self.0.tree(scope, instance)
    }
}
