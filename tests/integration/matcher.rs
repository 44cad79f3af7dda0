use regex::Regex;
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    Include,
    NotInclude,
    Eq,
    IncludeAll,
    Regex,
    /// Number of non-empty output lines.
    LineCount,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MatcherValue {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct Matcher {
    pub kind: MatcherKind,
    pub value: MatcherValue,
}

impl Matcher {
    pub fn matches(&self, actual: &str) -> bool {
        debug!("Matching against actual output:\n{}", actual);
        match (&self.kind, &self.value) {
            (MatcherKind::Include, MatcherValue::Single(s)) => actual.contains(s),
            (MatcherKind::NotInclude, MatcherValue::Single(s)) => !actual.contains(s),
            (MatcherKind::Eq, MatcherValue::Single(s)) => actual.trim() == s.trim(),
            (MatcherKind::IncludeAll, MatcherValue::Multiple(fragments)) => {
                fragments.iter().all(|frag| {
                    let contains = actual.contains(frag);
                    debug!("Checking pattern '{}': {}", frag, contains);
                    contains
                })
            }
            (MatcherKind::Regex, MatcherValue::Single(pattern)) => match Regex::new(pattern) {
                Ok(re) => re.is_match(actual),
                Err(e) => {
                    error!("Invalid regex '{}': {}", pattern, e);
                    false
                }
            },
            (MatcherKind::LineCount, MatcherValue::Single(count)) => match count.parse::<usize>() {
                Ok(expected) => {
                    actual.lines().filter(|l| !l.trim().is_empty()).count() == expected
                }
                Err(e) => {
                    error!("Invalid line count '{}': {}", count, e);
                    false
                }
            },
            _ => {
                error!("Invalid matcher kind/value combination");
                false
            }
        }
    }
}
