//! Scope value resolution
//!
//! Extracts the part of one scope instance's [`ConfigTree`] selected by a
//! [`PathPattern`]. The four wildcard combinations are handled by dedicated
//! functions, checked in this order:
//!
//! 1. `section/*/*`: the whole section
//! 2. `section/group/*`: one whole group
//! 3. `section/*/field`: one field across every group that has it
//! 4. `section/group/field`: a single leaf

use crate::pattern::{PathPattern, Segment};
use crate::tree::{ConfigTree, FieldMap, GroupMap};

/// Resolve `pattern` against one scope instance's tree.
///
/// Returns an empty tree when the section is absent. For `section/*/field`
/// with no matching group the section is present but empty; callers treat
/// that as no result.
pub fn resolve(tree: &ConfigTree, pattern: &PathPattern) -> ConfigTree {
    let Some(groups) = tree.section(pattern.section()) else {
        return ConfigTree::new();
    };

    let selected = match (pattern.group(), pattern.field()) {
        (Segment::Wildcard, Segment::Wildcard) => Some(groups.clone()),
        (Segment::Literal(group), Segment::Wildcard) => whole_group(groups, group),
        (Segment::Wildcard, Segment::Literal(field)) => Some(field_across_groups(groups, field)),
        (Segment::Literal(group), Segment::Literal(field)) => single_leaf(groups, group, field),
    };

    match selected {
        Some(groups) => std::iter::once((pattern.section().to_string(), groups)).collect(),
        None => ConfigTree::new(),
    }
}

fn whole_group(groups: &GroupMap, group: &str) -> Option<GroupMap> {
    let fields = groups.get(group)?;
    Some(GroupMap::from([(group.to_string(), fields.clone())]))
}

fn field_across_groups(groups: &GroupMap, field: &str) -> GroupMap {
    groups
        .iter()
        .filter_map(|(group, fields)| {
            let value = fields.get(field)?;
            Some((group.clone(), FieldMap::from([(field.to_string(), value.clone())])))
        })
        .collect()
}

fn single_leaf(groups: &GroupMap, group: &str, field: &str) -> Option<GroupMap> {
    let value = groups.get(group)?.get(field)?;
    let fields = FieldMap::from([(field.to_string(), value.clone())]);
    Some(GroupMap::from([(group.to_string(), fields)]))
}
