use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct TestConfig {
    pub logging: LoggingConfig,
    pub rollup: RollupConfig,
}

#[derive(Serialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub console_level: String,
    pub file_level: String,
}

#[derive(Serialize)]
pub struct RollupConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_limit: Option<usize>,
}

pub fn scenario_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join("snel_stream_it").join(name)
}

/// Writes `config.test.toml` for one scenario and returns its path.
pub fn write_config_for(name: &str, group_limit: Option<usize>) -> String {
    let base_dir = scenario_dir(name);
    let config_path = base_dir.join("config.test.toml");

    let config = TestConfig {
        logging: LoggingConfig {
            log_dir: base_dir.join("logs").display().to_string(),
            console_level: "error".into(),
            file_level: "debug".into(),
        },
        rollup: RollupConfig { group_limit },
    };

    fs::create_dir_all(&base_dir).unwrap();
    let toml = toml::to_string_pretty(&config).unwrap();
    fs::write(&config_path, toml).unwrap();

    config_path.display().to_string()
}
