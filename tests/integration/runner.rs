use crate::integration::config::{scenario_dir, write_config_for};
use crate::integration::scenarios::TestScenario;
use std::process::Command;
use tracing::{debug, error, info};

pub fn run_scenario(scenario: &TestScenario) {
    info!("▶ Running scenario: {}", scenario.name);
    let _ = std::fs::remove_dir_all(scenario_dir(&scenario.name));

    let config_path = write_config_for(&scenario.name, scenario.group_limit);
    debug!("Using config path: {}", config_path);

    let output = Command::new(env!("CARGO_BIN_EXE_snel_stream"))
        .arg("--expr")
        .arg(&scenario.expression)
        .args(&scenario.args)
        .env("SNEL_STREAM_CONFIG", &config_path)
        .output()
        .expect("Failed to run snel_stream");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    debug!("stdout:\n{}", stdout);
    debug!("stderr:\n{}", stderr);

    if output.status.success() != scenario.success {
        error!("❌ {} exited with {}", scenario.name, output.status);
        panic!(
            "Scenario '{}' expected success={} but got {}\nstdout:\n{}\nstderr:\n{}",
            scenario.name, scenario.success, output.status, stdout, stderr
        );
    }

    let actual = if scenario.success { &stdout } else { &stderr };
    let failed: Vec<_> = scenario
        .matchers
        .iter()
        .filter(|m| !m.matches(actual))
        .collect();

    if failed.is_empty() {
        info!("✅ {} passed", scenario.name);
    } else {
        error!("❌ {} failed", scenario.name);
        panic!(
            "Scenario '{}' failed matchers {:?}\nActual:\n{}",
            scenario.name, failed, actual
        );
    }

    let _ = std::fs::remove_dir_all(scenario_dir(&scenario.name));
}
