//! Fixture suite: named inputs with the mean they are expected to produce
//!
//! Fixtures are read-only `(classifier, groups, expected)` triples. The suite
//! runs each fixture through the pipeline in order and compares the result
//! within a tolerance.

mod builtin;

pub use builtin::builtin;

use crate::error::{MapSatError, Result};
use crate::pipeline::run_classifier;
use crate::report;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default comparison tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// One reference case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Classifier name
    pub name: String,
    /// Element groups fed to the classifier
    pub groups: Vec<Vec<String>>,
    /// Expected mean of per-group satisfying counts
    pub expected: f64,
}

/// Result of running one fixture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureOutcome {
    /// 1-based position in the suite
    pub index: usize,
    pub name: String,
    pub expected: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub passed: bool,
}

/// Outcomes of a whole suite
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuiteReport {
    pub outcomes: Vec<FixtureOutcome>,
}

impl SuiteReport {
    /// 1-based indices of failed fixtures
    pub fn failed(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.index)
            .collect()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}

/// `|a - b| <= tolerance`
pub fn almost_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Input format of a fixture or groups file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Detect the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(
    contents: &str,
    format: FileFormat,
) -> std::result::Result<T, String> {
    match format {
        FileFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
    }
}

fn read_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let load_error = |reason: String| MapSatError::FixtureLoad {
        path: path.to_path_buf(),
        reason,
    };
    let contents = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    parse(&contents, FileFormat::from_path(path)).map_err(load_error)
}

/// Parse a fixture list from a string
pub fn parse_fixtures(contents: &str, format: FileFormat) -> Result<Vec<Fixture>> {
    parse(contents, format).map_err(|reason| MapSatError::FixtureLoad {
        path: "<inline>".into(),
        reason,
    })
}

/// Load a fixture list from a `.json`, `.yaml` or `.yml` file
pub fn load(path: &Path) -> Result<Vec<Fixture>> {
    read_file(path)
}

/// Load element groups (a list of string lists) from a file
pub fn load_groups(path: &Path) -> Result<Vec<Vec<String>>> {
    read_file(path)
}

/// Run every fixture in order.
///
/// A fixture that errors (unknown classifier, empty groups) is recorded as
/// failed; the suite carries on with the next one.
pub async fn run_suite(fixtures: &[Fixture], tolerance: f64) -> SuiteReport {
    let mut outcomes = Vec::with_capacity(fixtures.len());

    for (position, fixture) in fixtures.iter().enumerate() {
        let index = position + 1;
        report::run_started(index, &fixture.name, &fixture.groups);

        let outcome = match run_classifier(&fixture.groups, &fixture.name).await {
            Ok(actual) => {
                report::run_finished(actual);
                FixtureOutcome {
                    index,
                    name: fixture.name.clone(),
                    expected: fixture.expected,
                    actual: Some(actual),
                    error: None,
                    passed: almost_equal(actual, fixture.expected, tolerance),
                }
            }
            Err(err) => {
                warn!(fixture = index, error = %err, "fixture could not be run");
                FixtureOutcome {
                    index,
                    name: fixture.name.clone(),
                    expected: fixture.expected,
                    actual: None,
                    error: Some(err.to_string()),
                    passed: false,
                }
            }
        };
        outcomes.push(outcome);
    }

    let report = SuiteReport { outcomes };
    report::suite_finished(&report);
    report
}
