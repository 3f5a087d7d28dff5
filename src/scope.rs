//! Scope types and requested scope selections.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Instance names that appear under `websites`/`stores` in a snapshot but are
/// administrative artifacts rather than tenant scopes.
pub const RESERVED_INSTANCES: &[&str] = &["admin", "default"];

/// Keyword accepted in place of a scope list to select every scope type.
pub const ALL_SCOPES_KEYWORD: &str = "all";

/// One level of the configuration hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Default,
    Websites,
    Stores,
}

impl ScopeType {
    /// All scope types in document order.
    pub const ALL: [ScopeType; 3] = [ScopeType::Default, ScopeType::Websites, ScopeType::Stores];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeType::Default => "default",
            ScopeType::Websites => "websites",
            ScopeType::Stores => "stores",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(ScopeType::Default),
            "websites" => Ok(ScopeType::Websites),
            "stores" => Ok(ScopeType::Stores),
            _ => Err(QueryError::InvalidScope(s.trim().to_string())),
        }
    }
}

/// Whether a `websites`/`stores` instance key names a real tenant scope.
///
/// Reserved names and purely numeric keys (scope ids rather than codes) are skipped.
pub fn is_exportable_instance(code: &str) -> bool {
    if RESERVED_INSTANCES.contains(&code) {
        return false;
    }
    !(!code.is_empty() && code.chars().all(|c| c.is_ascii_digit()))
}

/// The set of scope types requested for an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<ScopeType>);

impl ScopeSet {
    pub fn all() -> Self {
        ScopeType::ALL.into_iter().collect()
    }

    /// Parse a comma-separated scope list, or the `all` keyword.
    ///
    /// Matching is case-insensitive; empty entries are ignored. Any unknown
    /// name rejects the whole list.
    pub fn parse_list(input: &str) -> Result<Self, QueryError> {
        let input = input.trim();
        if input.eq_ignore_ascii_case(ALL_SCOPES_KEYWORD) {
            return Ok(Self::all());
        }

        let scopes = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ScopeType::from_str)
            .collect::<Result<ScopeSet, _>>()?;

        if scopes.is_empty() {
            return Err(QueryError::InvalidScope(input.to_string()));
        }
        Ok(scopes)
    }

    pub fn contains(&self, scope: ScopeType) -> bool {
        self.0.contains(&scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ScopeType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ScopeType> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = ScopeType>>(iter: I) -> Self {
        ScopeSet(iter.into_iter().collect())
    }
}
