//! CLI route: run context and the export pipeline.
//!
//! Input problems the operator can fix by retyping (no usable paths, an
//! unknown scope) end the run with a message instead of an error, so the
//! process still exits cleanly.

use crate::cli::output::{format_export_summary, NO_PATHS_MESSAGE};
use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, ExportConfig};
use crate::document::ConfigDocument;
use crate::engine::ScopeQueryEngine;
use crate::error::{ExportError, QueryError};
use crate::pattern::PathPattern;
use crate::scope::ScopeSet;
use crate::source::SnapshotSource;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to export and how to finish.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    pub scopes: String,
    pub paths: String,
    pub keep_factory_defaults: bool,
    pub dry_run: bool,
}

impl From<&Cli> for ExportRequest {
    fn from(cli: &Cli) -> Self {
        Self {
            scopes: cli.scopes.clone(),
            paths: cli.paths.clone(),
            keep_factory_defaults: cli.keep_factory_defaults,
            dry_run: cli.dry_run,
        }
    }
}

/// CLI run context: workspace root plus the merged tool configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ExportConfig,
}

impl RunContext {
    /// Load and validate configuration for `workspace_root`.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ExportError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.validate().map_err(|errors| {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            ExportError::ConfigError(joined)
        })?;
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: ExportConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Fold per-run path flags into the loaded configuration.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(path) = &cli.snapshot {
            self.config.snapshot.path = path.clone();
        }
        if let Some(path) = &cli.factory_defaults {
            self.config.snapshot.factory_defaults_path = path.clone();
        }
        if let Some(path) = &cli.document {
            self.config.document.path = path.clone();
        }
    }

    /// Run one export against the configured file sources.
    pub fn execute(&self, request: &ExportRequest) -> Result<String, ExportError> {
        let source = self.config.snapshot_source(&self.workspace_root);
        self.execute_with(&source, request)
    }

    /// Run one export against any snapshot source.
    pub fn execute_with<S: SnapshotSource>(
        &self,
        source: &S,
        request: &ExportRequest,
    ) -> Result<String, ExportError> {
        let paths = split_paths(&request.paths);
        if paths.is_empty() {
            warn!("No valid paths provided");
            return Ok(NO_PATHS_MESSAGE.to_string());
        }

        let scopes = match ScopeSet::parse_list(&request.scopes) {
            Ok(scopes) => scopes,
            Err(e @ QueryError::InvalidScope(_)) => {
                warn!(scopes = %request.scopes, "Rejected scope argument");
                return Ok(e.to_string());
            }
            Err(e) => return Err(e.into()),
        };

        let patterns = paths
            .iter()
            .map(|path| PathPattern::parse(path))
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = source.load_snapshot()?;
        let engine = ScopeQueryEngine::new(&snapshot);
        let mut result = engine.values_for_patterns(&patterns, &scopes);
        info!(paths = patterns.len(), values = result.leaf_count(), "Resolved overridden values");

        if request.keep_factory_defaults {
            debug!("Keeping values equal to factory defaults");
        } else {
            let factory = source.load_factory_defaults()?;
            result = engine.remove_factory_defaults(result, &factory);
        }

        let document_path = self.config.document_path(&self.workspace_root);
        let mut document = ConfigDocument::read_existing(&document_path)?;
        let written = document.apply(&result)?;

        if request.dry_run {
            info!(values = written, "Dry run; document not written");
            return document.render();
        }

        document.write_back(&document_path)?;
        info!(values = written, document = %document_path.display(), "Export written");
        Ok(format_export_summary(written, &document_path))
    }
}

/// Split the comma-separated path argument, dropping blank entries.
fn split_paths(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
