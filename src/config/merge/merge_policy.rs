//! Merge rules: defaults, override order, conflict handling.

use crate::config::{DEFAULT_DOCUMENT_PATH, DEFAULT_FACTORY_DEFAULTS_PATH, DEFAULT_SNAPSHOT_PATH};
use crate::source::{FACTORY_ROOT_KEY, SNAPSHOT_ROOT_KEY};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("snapshot.path", DEFAULT_SNAPSHOT_PATH)?
        .set_default("snapshot.root_key", SNAPSHOT_ROOT_KEY)?
        .set_default("snapshot.factory_defaults_path", DEFAULT_FACTORY_DEFAULTS_PATH)?
        .set_default("snapshot.factory_root_key", FACTORY_ROOT_KEY)?
        .set_default("document.path", DEFAULT_DOCUMENT_PATH)
}
