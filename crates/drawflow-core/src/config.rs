//! Configuration management for Drawflow services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`DRAWFLOW__` prefix, `__` separator)
//! 2. Config file (`drawflow.toml`, prefix overridable)
//! 3. Defaults

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Default config file prefix (resolves to `drawflow.toml`).
pub const DEFAULT_FILE_PREFIX: &str = "drawflow";

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "DRAWFLOW";

/// Load one `[section]` of the layered configuration into `T`.
///
/// A missing file or a missing section yields `T::default()`. A section that
/// is present but malformed is an error.
pub fn load_section<T>(file_prefix: &str, env_prefix: &str, section: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<T>(section) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => {
            tracing::debug!(section, "Config section not found, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}
