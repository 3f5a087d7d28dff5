//! Configuration trees
//!
//! A [`ConfigTree`] is the fixed-depth `section -> group -> field -> value`
//! mapping of one scope instance. [`ScopedTrees`] keys those trees by scope
//! type and instance and is shared by snapshots, factory defaults and export
//! results.

use crate::scope::ScopeType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Fields of one group.
pub type FieldMap = BTreeMap<String, Value>;

/// Groups of one section.
pub type GroupMap = BTreeMap<String, FieldMap>;

/// One scope instance's configuration: section -> group -> field -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree(BTreeMap<String, GroupMap>);

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the tree holds no section at all.
    ///
    /// A section present with no groups is not empty; see [`ConfigTree::has_values`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when at least one leaf value is present.
    pub fn has_values(&self) -> bool {
        self.leaf_count() > 0
    }

    pub fn leaf_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|groups| groups.values())
            .map(|fields| fields.len())
            .sum()
    }

    pub fn section(&self, section: &str) -> Option<&GroupMap> {
        self.0.get(section)
    }

    pub fn get(&self, section: &str, group: &str, field: &str) -> Option<&Value> {
        self.0.get(section)?.get(group)?.get(field)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&String, &GroupMap)> {
        self.0.iter()
    }

    /// Every leaf as `(section, group, field, value)`.
    pub fn leaves(&self) -> impl Iterator<Item = (&str, &str, &str, &Value)> {
        self.0.iter().flat_map(|(section, groups)| {
            groups.iter().flat_map(move |(group, fields)| {
                fields
                    .iter()
                    .map(move |(field, value)| (section.as_str(), group.as_str(), field.as_str(), value))
            })
        })
    }

    pub fn insert(
        &mut self,
        section: impl Into<String>,
        group: impl Into<String>,
        field: impl Into<String>,
        value: Value,
    ) -> Option<Value> {
        self.0
            .entry(section.into())
            .or_default()
            .entry(group.into())
            .or_default()
            .insert(field.into(), value)
    }

    /// Insert a whole section, replacing any existing one.
    pub fn insert_section(&mut self, section: impl Into<String>, groups: GroupMap) {
        self.0.insert(section.into(), groups);
    }

    /// Keep only the leaves for which `keep` returns true, then collapse empty branches.
    pub fn retain_leaves<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str, &str, &Value) -> bool,
    {
        for (section, groups) in self.0.iter_mut() {
            for (group, fields) in groups.iter_mut() {
                fields.retain(|field, value| keep(section, group, field, value));
            }
        }
        self.collapse_empty();
    }

    /// Drop groups without fields, then sections without groups.
    pub fn collapse_empty(&mut self) {
        for groups in self.0.values_mut() {
            groups.retain(|_, fields| !fields.is_empty());
        }
        self.0.retain(|_, groups| !groups.is_empty());
    }

    /// Deep union with `other`; on a shared leaf the value from `other` wins.
    pub fn merge_from(&mut self, other: ConfigTree) {
        for (section, groups) in other.0 {
            let target = self.0.entry(section).or_default();
            for (group, fields) in groups {
                target.entry(group).or_default().extend(fields);
            }
        }
    }

    /// Build a tree from a raw JSON mapping.
    ///
    /// Sections and groups must be objects; anything else at those levels is
    /// skipped with a warning. Field values are taken as-is.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let sections = value
            .as_object()
            .ok_or_else(|| format!("expected a mapping of sections, found {}", kind(value)))?;

        let mut tree = ConfigTree::new();
        for (section, groups) in sections {
            let Some(groups) = groups.as_object() else {
                warn!(section = %section, "Skipping non-mapping configuration section");
                continue;
            };
            let mut group_map = GroupMap::new();
            for (group, fields) in groups {
                let Some(fields) = fields.as_object() else {
                    warn!(section = %section, group = %group, "Skipping non-mapping configuration group");
                    continue;
                };
                group_map.insert(group.clone(), fields_to_map(fields));
            }
            tree.insert_section(section.clone(), group_map);
        }
        Ok(tree)
    }
}

impl FromIterator<(String, GroupMap)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, GroupMap)>>(iter: I) -> Self {
        ConfigTree(iter.into_iter().collect())
    }
}

fn fields_to_map(fields: &Map<String, Value>) -> FieldMap {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// Config trees keyed by scope type and instance.
///
/// The default scope has a single, unnamed tree. Serialization omits empty
/// scope types, so `{"default": {...}, "websites": {"base": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopedTrees {
    #[serde(skip_serializing_if = "ConfigTree::is_empty")]
    pub default: ConfigTree,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub websites: BTreeMap<String, ConfigTree>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub stores: BTreeMap<String, ConfigTree>,
}

/// Sparse export result: only overridden, non-redundant values.
pub type ResultTree = ScopedTrees;

impl ScopedTrees {
    pub fn new() -> Self {
        Self::default()
    }

    /// Named instances of a non-default scope type; `None` for `default`.
    pub fn instances(&self, scope: ScopeType) -> Option<&BTreeMap<String, ConfigTree>> {
        match scope {
            ScopeType::Default => None,
            ScopeType::Websites => Some(&self.websites),
            ScopeType::Stores => Some(&self.stores),
        }
    }

    pub fn instances_mut(&mut self, scope: ScopeType) -> Option<&mut BTreeMap<String, ConfigTree>> {
        match scope {
            ScopeType::Default => None,
            ScopeType::Websites => Some(&mut self.websites),
            ScopeType::Stores => Some(&mut self.stores),
        }
    }

    /// Tree for `scope`; `instance` is ignored for the default scope.
    pub fn tree(&self, scope: ScopeType, instance: &str) -> Option<&ConfigTree> {
        match scope {
            ScopeType::Default => Some(&self.default),
            _ => self.instances(scope)?.get(instance),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }

    pub fn leaf_count(&self) -> usize {
        self.default.leaf_count()
            + self
                .websites
                .values()
                .chain(self.stores.values())
                .map(ConfigTree::leaf_count)
                .sum::<usize>()
    }

    /// Collapse empty branches in every tree and drop instances left without values.
    pub fn collapse_empty(&mut self) {
        self.default.collapse_empty();
        for instances in [&mut self.websites, &mut self.stores] {
            for tree in instances.values_mut() {
                tree.collapse_empty();
            }
            instances.retain(|_, tree| !tree.is_empty());
        }
    }

    /// Build scoped trees from a raw `{default, websites, stores}` mapping.
    ///
    /// Unknown top-level keys are rejected. Instances keep their raw names;
    /// reserved names are filtered later, during resolution.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let scopes = value
            .as_object()
            .ok_or_else(|| format!("expected a mapping of scope types, found {}", kind(value)))?;

        let mut trees = ScopedTrees::new();
        for (key, scope_value) in scopes {
            let scope: ScopeType = key
                .parse()
                .map_err(|_| format!("unknown scope type '{}'", key))?;
            match scope {
                ScopeType::Default => {
                    trees.default = ConfigTree::from_value(scope_value)
                        .map_err(|e| format!("scope 'default': {}", e))?;
                }
                _ => {
                    let instances = scope_value.as_object().ok_or_else(|| {
                        format!("scope '{}': expected a mapping of instances", scope)
                    })?;
                    let target = trees
                        .instances_mut(scope)
                        .ok_or_else(|| format!("scope '{}' has no instances", scope))?;
                    for (code, instance_value) in instances {
                        let tree = ConfigTree::from_value(instance_value)
                            .map_err(|e| format!("scope '{}/{}': {}", scope, code, e))?;
                        target.insert(code.clone(), tree);
                    }
                }
            }
        }
        Ok(trees)
    }
}
