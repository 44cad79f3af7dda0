use crate::integration::matcher::Matcher;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    pub expression: String,
    /// Extra CLI flags, e.g. `--explain`
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub group_limit: Option<usize>,
    /// Whether the CLI is expected to exit successfully
    #[serde(default = "default_success")]
    pub success: bool,
    /// Checked against stdout on success, stderr on failure
    pub matchers: Vec<Matcher>,
}

fn default_success() -> bool {
    true
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
