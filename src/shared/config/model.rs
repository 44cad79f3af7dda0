use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rollup: RollupConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub console_level: String,
    pub file_level: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RollupConfig {
    /// Max distinct groups a rollup may hold in memory (unset = unbounded)
    pub group_limit: Option<usize>,
}

/// Loads settings from built-in defaults, then the optional config file named
/// by `SNEL_STREAM_CONFIG` (default `config`), then `SNEL_STREAM__*` variables.
pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("SNEL_STREAM_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.console_level", "warn")?
        .set_default("logging.file_level", "debug")?
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(
            config::Environment::with_prefix("SNEL_STREAM")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
