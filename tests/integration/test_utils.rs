//! Shared fixtures for integration tests.

use confex::{ScopedTrees, Snapshot};
use serde_json::Value;
use std::path::Path;

pub fn snapshot_from(value: Value) -> Snapshot {
    Snapshot::new(ScopedTrees::from_value(&value).unwrap())
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
