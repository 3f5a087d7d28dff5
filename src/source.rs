//! Snapshot sources
//!
//! Loading the live configuration snapshot and the factory defaults happens
//! once per run, behind the [`SnapshotSource`] trait. [`FileSnapshotSource`]
//! reads JSON or TOML dumps; [`InMemorySource`] serves prebuilt trees.

use crate::error::ExportError;
use crate::snapshot::{FactoryDefaults, Snapshot};
use crate::tree::ScopedTrees;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root key wrapping a configuration snapshot dump.
pub const SNAPSHOT_ROOT_KEY: &str = "system";

/// Root key wrapping a factory defaults dump.
pub const FACTORY_ROOT_KEY: &str = "data";

/// Provides the two read-once inputs of an export run.
pub trait SnapshotSource {
    fn load_snapshot(&self) -> Result<Snapshot, ExportError>;

    fn load_factory_defaults(&self) -> Result<FactoryDefaults, ExportError>;
}

/// Reads snapshot dumps from `.json` or `.toml` files.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    snapshot_path: PathBuf,
    root_key: String,
    factory_defaults_path: Option<PathBuf>,
    factory_root_key: String,
}

impl FileSnapshotSource {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            root_key: SNAPSHOT_ROOT_KEY.to_string(),
            factory_defaults_path: None,
            factory_root_key: FACTORY_ROOT_KEY.to_string(),
        }
    }

    pub fn with_factory_defaults(mut self, path: impl Into<PathBuf>) -> Self {
        self.factory_defaults_path = Some(path.into());
        self
    }

    pub fn with_root_keys(mut self, snapshot: impl Into<String>, factory: impl Into<String>) -> Self {
        self.root_key = snapshot.into();
        self.factory_root_key = factory.into();
        self
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    fn load_trees(path: &Path, root_key: &str) -> Result<ScopedTrees, ExportError> {
        let raw = read_dump(path)?;
        let value = unwrap_root(raw, root_key);
        let trees =
            ScopedTrees::from_value(&value).map_err(|message| ExportError::snapshot(path, message))?;
        debug!(path = %path.display(), values = trees.leaf_count(), "Loaded scoped configuration");
        Ok(trees)
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn load_snapshot(&self) -> Result<Snapshot, ExportError> {
        Self::load_trees(&self.snapshot_path, &self.root_key).map(Snapshot::new)
    }

    /// A missing factory defaults file is not an error: nothing is pruned.
    fn load_factory_defaults(&self) -> Result<FactoryDefaults, ExportError> {
        let Some(path) = self.factory_defaults_path.as_deref() else {
            return Ok(FactoryDefaults::default());
        };
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Factory defaults file not found, factory default values will not be removed"
            );
            return Ok(FactoryDefaults::default());
        }
        Self::load_trees(path, &self.factory_root_key).map(FactoryDefaults::new)
    }
}

/// Serves trees that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: ScopedTrees,
    factory_defaults: ScopedTrees,
}

impl InMemorySource {
    pub fn new(snapshot: ScopedTrees, factory_defaults: ScopedTrees) -> Self {
        Self {
            snapshot,
            factory_defaults,
        }
    }
}

impl SnapshotSource for InMemorySource {
    fn load_snapshot(&self) -> Result<Snapshot, ExportError> {
        Ok(Snapshot::new(self.snapshot.clone()))
    }

    fn load_factory_defaults(&self) -> Result<FactoryDefaults, ExportError> {
        Ok(FactoryDefaults::new(self.factory_defaults.clone()))
    }
}

/// Supported dump formats, by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Toml,
}

impl DumpFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(DumpFormat::Json),
            "toml" => Some(DumpFormat::Toml),
            _ => None,
        }
    }
}

fn read_dump(path: &Path) -> Result<Value, ExportError> {
    let format = DumpFormat::from_path(path).ok_or_else(|| {
        ExportError::snapshot(path, "unsupported file extension (expected .json or .toml)")
    })?;
    if !path.exists() {
        return Err(ExportError::snapshot(path, "file not found"));
    }
    let contents = fs::read_to_string(path)?;

    match format {
        DumpFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| ExportError::snapshot(path, format!("JSON parse error: {}", e))),
        DumpFormat::Toml => toml::from_str::<toml::Value>(&contents)
            .map(toml_to_json)
            .map_err(|e| ExportError::snapshot(path, format!("TOML parse error: {}", e))),
    }
}

/// Descend into `{root_key: ...}` when the dump is wrapped in its root key.
fn unwrap_root(value: Value, root_key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(root_key) => {
            map.remove(root_key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
