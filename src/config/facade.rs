//! Config loading facade: the single entry point for building an ExportConfig.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::ExportConfig;
use crate::error::ExportError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads layered configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest last): defaults, user config file, workspace
    /// config file, `CONFEX__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ExportConfig, ExportError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ExportConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file, on top of the defaults only.
    pub fn load_from_file(path: &Path) -> Result<ExportConfig, ExportError> {
        if !path.exists() {
            return Err(ExportError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config: ExportConfig = builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }
}
