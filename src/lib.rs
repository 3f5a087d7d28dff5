//! Confex: Scoped Configuration Export
//!
//! Extracts the values a store owner actually changed from a layered
//! configuration snapshot (default, website and store scopes), drops what is
//! only inherited or equal to the factory defaults, and writes the remainder
//! into a portable config document.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod prune;
pub mod resolve;
pub mod scope;
pub mod snapshot;
pub mod source;
pub mod tree;

pub use aggregate::{merge, ResultAggregator};
pub use document::ConfigDocument;
pub use engine::ScopeQueryEngine;
pub use error::{ExportError, QueryError};
pub use pattern::PathPattern;
pub use prune::{prune_inherited, remove_factory_defaults};
pub use scope::{ScopeSet, ScopeType};
pub use snapshot::{FactoryDefaults, Snapshot};
pub use source::{FileSnapshotSource, InMemorySource, SnapshotSource};
pub use tree::{ConfigTree, ResultTree, ScopedTrees};
