//! # mapsat
//!
//! A concurrent "map, then reduce" pipeline that classifies groups of strings
//! with named predicates and averages the per-group counts.
//!
//! ## Modules
//!
//! - `pipeline` - map, filter, reduce and the per-group fan-out driver
//! - `classifier` - the built-in string classifiers and the dispatch table
//! - `fixtures` - reference cases and the suite runner
//! - `config` - TOML and environment configuration
//! - `report` - logging of runs and suite results
//! - `error` - the crate error type
//!
//! ## Example
//!
//! ```no_run
//! # async fn demo() -> mapsat::Result<()> {
//! let groups = vec![
//!     vec!["ana".to_string(), "parc".to_string()],
//!     vec!["minim".to_string()],
//! ];
//! let mean = mapsat::run_classifier(&groups, "palindrome").await?;
//! assert_eq!(mean, 1.0);
//! # Ok(())
//! # }
//! ```
pub mod classifier;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod pipeline;
pub mod report;

pub use classifier::{Classifier, ClassifierTable, Predicate, TableBuilder};
pub use config::MapSatConfig;
pub use error::{MapSatError, Result};
pub use pipeline::{run_classifier, run_classifier_fraction, run_with_table, summarize};
