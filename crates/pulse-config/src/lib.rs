//! Configuration management.

mod settings;

pub use settings::{
    default_symbols, AppConfig, AppSettings, CacheBackendKind, CacheSettings, LoggingConfig,
    NewsSettings, ServerSettings, SiteSettings, SourceSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix for overrides, e.g. `PULSE__SERVER__PORT`.
pub const ENV_PREFIX: &str = "PULSE";

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()?;

    config.try_deserialize()
}
