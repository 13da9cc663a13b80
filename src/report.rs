//! Run reporting
//!
//! Purely observational: logs what was run and what came out, never feeds
//! anything back into the pipeline.

use crate::fixtures::SuiteReport;
use tracing::{error, info};

pub fn run_started(index: usize, classifier: &str, groups: &[Vec<String>]) {
    info!("Test {} ({})", index, classifier);
    info!("Input {:?}", groups);
}

pub fn run_finished(result: f64) {
    info!("Output {:.3}", result);
}

pub fn suite_finished(report: &SuiteReport) {
    if report.all_passed() {
        info!("All {} fixtures passed", report.outcomes.len());
    } else {
        error!("Failed fixtures: {:?}", report.failed());
    }
}
