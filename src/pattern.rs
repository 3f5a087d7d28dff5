//! Path patterns: `section/group/field` with wildcard group and field segments.

use crate::error::QueryError;
use std::fmt;

/// Marker that selects every key at its level.
pub const WILDCARD: &str = "*";

/// Number of levels in a configuration path.
pub const PATH_DEPTH: usize = 3;

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Wildcard,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == WILDCARD {
            Segment::Wildcard
        } else {
            Segment::Literal(raw.to_string())
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }

    pub fn literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(s) => Some(s),
            Segment::Wildcard => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => f.write_str(s),
            Segment::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// A parsed `section/group/field` pattern.
///
/// The section is always a literal; group and field may be wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    section: String,
    group: Segment,
    field: Segment,
}

impl PathPattern {
    /// Parse a slash-delimited path.
    ///
    /// Segments are trimmed and an empty segment becomes a wildcard. Missing
    /// trailing segments are padded with wildcards, so `general` selects the
    /// whole section and `general/locale` the whole group.
    pub fn parse(path: &str) -> Result<Self, QueryError> {
        let invalid = |reason: &str| QueryError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut raw: Vec<&str> = path.split('/').collect();
        // One trailing slash is tolerated: `general/locale/code/`.
        if raw.len() > 1 && raw.last().is_some_and(|s| s.trim().is_empty()) {
            raw.pop();
        }

        let mut segments: Vec<Segment> = raw.into_iter().map(Segment::parse).collect();
        if segments.len() > PATH_DEPTH {
            return Err(invalid("expected at most 3 segments (section/group/field)"));
        }
        segments.resize(PATH_DEPTH, Segment::Wildcard);

        let mut segments = segments.into_iter();
        let section = match segments.next() {
            Some(Segment::Literal(section)) => section,
            _ => return Err(invalid("path can't start with a wildcard")),
        };
        let group = segments.next().unwrap_or(Segment::Wildcard);
        let field = segments.next().unwrap_or(Segment::Wildcard);

        Ok(Self {
            section,
            group,
            field,
        })
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn group(&self) -> &Segment {
        &self.group
    }

    pub fn field(&self) -> &Segment {
        &self.field
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.section, self.group, self.field)
    }
}
