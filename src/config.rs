//! Configuration System
//!
//! Tool settings for an export run: where the configuration snapshot and the
//! factory defaults are read from, where the config document lives, and how
//! logging behaves. Layered with the `config` crate: built-in defaults, the
//! user config file, the workspace config file, then `CONFEX__*` environment
//! variables. Relative paths resolve against the workspace root.

use crate::logging::LoggingConfig;
use crate::source::{DumpFormat, FileSnapshotSource, FACTORY_ROOT_KEY, SNAPSHOT_ROOT_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Snapshot and factory defaults inputs
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Config document output
    #[serde(default)]
    pub document: DocumentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the read-once inputs come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Configuration snapshot dump (.json or .toml)
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,

    /// Key wrapping the snapshot dump, if present
    #[serde(default = "default_snapshot_root_key")]
    pub root_key: String,

    /// Factory defaults dump (.json or .toml); a missing file disables baseline pruning
    #[serde(default = "default_factory_defaults_path")]
    pub factory_defaults_path: PathBuf,

    /// Key wrapping the factory defaults dump, if present
    #[serde(default = "default_factory_root_key")]
    pub factory_root_key: String,
}

/// Config document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
}

pub(crate) const DEFAULT_SNAPSHOT_PATH: &str = "var/config/snapshot.json";
pub(crate) const DEFAULT_FACTORY_DEFAULTS_PATH: &str = "var/config/factory_defaults.json";
pub(crate) const DEFAULT_DOCUMENT_PATH: &str = "var/config/config.xml";

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

fn default_snapshot_root_key() -> String {
    SNAPSHOT_ROOT_KEY.to_string()
}

fn default_factory_defaults_path() -> PathBuf {
    PathBuf::from(DEFAULT_FACTORY_DEFAULTS_PATH)
}

fn default_factory_root_key() -> String {
    FACTORY_ROOT_KEY.to_string()
}

fn default_document_path() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT_PATH)
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            root_key: default_snapshot_root_key(),
            factory_defaults_path: default_factory_defaults_path(),
            factory_root_key: default_factory_root_key(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Snapshot(String),
    Document(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Snapshot(msg) => write!(f, "Snapshot: {}", msg),
            ValidationError::Document(msg) => write!(f, "Document: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SnapshotConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (label, path) in [
            ("snapshot path", &self.path),
            ("factory defaults path", &self.factory_defaults_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(format!("{} cannot be empty", label));
            }
            if DumpFormat::from_path(path).is_none() {
                return Err(format!(
                    "{} {} must end in .json or .toml",
                    label,
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

impl ExportConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.snapshot.validate() {
            errors.push(ValidationError::Snapshot(e));
        }
        if self.document.path.as_os_str().is_empty() {
            errors.push(ValidationError::Document("path cannot be empty".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// File-backed snapshot source with paths resolved against `workspace_root`.
    pub fn snapshot_source(&self, workspace_root: &Path) -> FileSnapshotSource {
        FileSnapshotSource::new(resolve_path(workspace_root, &self.snapshot.path))
            .with_factory_defaults(resolve_path(
                workspace_root,
                &self.snapshot.factory_defaults_path,
            ))
            .with_root_keys(
                self.snapshot.root_key.clone(),
                self.snapshot.factory_root_key.clone(),
            )
    }

    /// Config document path resolved against `workspace_root`.
    pub fn document_path(&self, workspace_root: &Path) -> PathBuf {
        resolve_path(workspace_root, &self.document.path)
    }
}

fn resolve_path(workspace_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace_root.join(path)
    }
}
