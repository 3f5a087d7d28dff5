//! Environment source: CONFEX__SECTION__KEY overrides, e.g. CONFEX__DOCUMENT__PATH.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CONFEX";

/// Separator between prefix, sections and keys.
pub const ENV_SEPARATOR: &str = "__";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR),
    )
}
