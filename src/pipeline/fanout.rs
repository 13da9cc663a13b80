//! Fan-out driver
//!
//! Runs one map/reduce pipeline per group, all groups concurrently, and fans
//! the per-group outcomes into a shared channel. A coordinator task owns the
//! last sender together with the join set of group tasks; it waits until the
//! join set is empty and only then drops the sender, so the shared channel
//! closes exactly once, after every group's send.

use super::map::map_sat_labelled;
use super::reduce::{reduce, reduce_sum};
use super::semigroup::{GroupOutcome, GroupTally};
use super::stream::{runtime_handle, ResultStream};
use crate::classifier::{ClassifierTable, Predicate, TableBuilder};
use crate::error::{MapSatError, Result};
use std::sync::Arc;
use stillwater::monoid::Sum;
use stillwater::{Monoid, Semigroup};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Number of elements of `group` satisfying `predicate`
pub async fn group_sum(group: Arc<[String]>, predicate: Predicate) -> Result<usize> {
    group_sum_labelled("group", group, predicate).await
}

async fn group_sum_labelled(label: &str, group: Arc<[String]>, predicate: Predicate) -> Result<usize> {
    let indicators = map_sat_labelled(label, group, move |word: &String| predicate(word))?;
    reduce_sum(indicators).await
}

/// Check that a run can start: at least one group and a known classifier
pub fn validate(groups: &[Vec<String>], classifier: &str, build: &TableBuilder) -> Result<()> {
    if groups.is_empty() {
        return Err(MapSatError::EmptyGroups);
    }
    build(Arc::from(Vec::new())).lookup(classifier)?;
    Ok(())
}

/// Launch one pipeline per group and return the stream of group outcomes.
///
/// Validation happens before anything is spawned. The returned stream yields
/// exactly one [`GroupOutcome`] per group, in completion order; if a group
/// fails, draining the stream still terminates and settling it reports the
/// first failure.
pub fn fan_out(
    groups: &[Vec<String>],
    classifier: &str,
    build: TableBuilder,
) -> Result<ResultStream<GroupOutcome>> {
    validate(groups, classifier, &build)?;
    let runtime = runtime_handle("fan-out")?;

    let total = groups.len();
    let (tx, rx) = mpsc::channel(total);
    let mut tasks = JoinSet::new();

    for (index, words) in groups.iter().enumerate() {
        let group: Arc<[String]> = Arc::from(words.as_slice());
        let tx = tx.clone();
        let build = Arc::clone(&build);
        let classifier = classifier.to_string();

        tasks.spawn_on(async move {
            let wrap = |source: MapSatError| MapSatError::GroupFailed {
                group: index,
                source: Box::new(source),
            };

            let predicate = build(Arc::clone(&group)).lookup(&classifier).map_err(wrap)?;
            let size = group.len();
            let label = format!("group {index}");
            let satisfied = group_sum_labelled(&label, group, predicate)
                .await
                .map_err(wrap)?;

            debug!(group = index, satisfied, size, "group pipeline finished");
            tx.send(GroupOutcome {
                index,
                satisfied,
                size,
            })
            .await
            .map_err(|_| {
                wrap(MapSatError::ChannelClosed {
                    stage: "fan-out".to_string(),
                })
            })
        }, &runtime);
    }

    let coordinator = runtime.spawn(async move {
        let mut first_failure = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|err| Err(MapSatError::from_join("fan-out", err)));
            if let Err(err) = outcome {
                warn!(error = %err, "group pipeline failed");
                first_failure.get_or_insert(err);
            }
            debug!(remaining = tasks.len(), "group task joined");
        }

        // Every group task has finished; this is the last sender.
        drop(tx);
        first_failure.map_or(Ok(()), Err)
    });

    Ok(ResultStream::new("fan-out", rx, coordinator, total))
}

/// Mean number of elements per group satisfying `classifier`.
///
/// The metric is the sum of raw per-group counts divided by the number of
/// groups, not a per-group fraction.
pub async fn run_classifier(groups: &[Vec<String>], classifier: &str) -> Result<f64> {
    run_with_table(groups, classifier, ClassifierTable::builtin()).await
}

/// [`run_classifier`] with a caller-supplied dispatch table
pub async fn run_with_table(
    groups: &[Vec<String>],
    classifier: &str,
    build: TableBuilder,
) -> Result<f64> {
    let outcomes = fan_out(groups, classifier, build)?;
    let Sum(total) = reduce(outcomes, Sum::empty(), |acc, outcome| {
        acc.combine(Sum(outcome.satisfied))
    })
    .await?;
    Ok(total as f64 / groups.len() as f64)
}

/// Per-group breakdown of a run
pub async fn summarize(
    groups: &[Vec<String>],
    classifier: &str,
    build: TableBuilder,
) -> Result<GroupTally> {
    let outcomes = fan_out(groups, classifier, build)?;
    reduce(outcomes, GroupTally::empty(), |acc, outcome| {
        acc.combine(GroupTally::single(outcome))
    })
    .await
}

/// Mean fraction of elements per group satisfying `classifier`, in `[0, 1]`
pub async fn run_classifier_fraction(groups: &[Vec<String>], classifier: &str) -> Result<f64> {
    let tally = summarize(groups, classifier, ClassifierTable::builtin()).await?;
    tally.mean_fraction().ok_or(MapSatError::EmptyGroups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|g| g.iter().map(|w| w.to_string()).collect())
            .collect()
    }

    fn palindrome_groups() -> Vec<Vec<String>> {
        groups(&[
            &["a1551a", "parc", "ana", "minim", "1pcl3"],
            &["calabalac", "tivit", "leu", "zece10", "ploaie", "9ana9"],
            &["lalalal", "tema", "papa", "ger"],
        ])
    }

    #[tokio::test]
    async fn test_group_sum_counts_satisfying_elements() {
        let group: Arc<[String]> = palindrome_groups().remove(0).into();
        let table = ClassifierTable::for_group(Arc::clone(&group));
        let count = group_sum(group, table.lookup("palindrome").unwrap()).await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_run_classifier_averages_raw_counts() {
        let mean = run_classifier(&palindrome_groups(), "palindrome").await.unwrap();
        assert!((mean - 7.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_groups_rejected_before_launch() {
        let err = run_classifier(&[], "palindrome").await.unwrap_err();
        assert!(matches!(err, MapSatError::EmptyGroups));
    }

    #[tokio::test]
    async fn test_unknown_classifier_rejected_before_launch() {
        let err = fan_out(&palindrome_groups(), "is_prime", ClassifierTable::builtin()).unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_fan_out_yields_one_outcome_per_group() {
        let mut stream = fan_out(&palindrome_groups(), "palindrome", ClassifierTable::builtin()).unwrap();
        assert_eq!(stream.expected(), 3);

        let mut seen = Vec::new();
        while let Some(outcome) = stream.recv().await.unwrap() {
            seen.push((outcome.index, outcome.satisfied, outcome.size));
        }
        stream.finish().await.unwrap();

        seen.sort();
        assert_eq!(seen, vec![(0, 3, 5), (1, 3, 6), (2, 1, 4)]);
    }

    #[tokio::test]
    async fn test_summary_and_fraction() {
        let tally = summarize(&palindrome_groups(), "palindrome", ClassifierTable::builtin())
            .await
            .unwrap();
        assert_eq!(tally.total_satisfied(), 7);
        assert_eq!(tally.groups(), 3);

        let fraction = run_classifier_fraction(&palindrome_groups(), "palindrome")
            .await
            .unwrap();
        assert!((fraction - (3.0 / 5.0 + 3.0 / 6.0 + 1.0 / 4.0) / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_group_contributes_zero() {
        let input = groups(&[&[], &["ana"]]);
        let mean = run_classifier(&input, "palindrome").await.unwrap();
        assert!((mean - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_custom_table_without_touching_pipeline() {
        let build: TableBuilder = Arc::new(|group: Arc<[String]>| {
            let mut table = ClassifierTable::for_group(group);
            table
                .register("starts_with_p", |w| w.starts_with('p'))
                .expect("fresh name");
            table
        });
        let mean = run_with_table(&palindrome_groups(), "starts_with_p", build)
            .await
            .unwrap();
        // parc, ploaie, papa
        assert!((mean - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failing_classifier_fails_the_run_without_hanging() {
        let build: TableBuilder = Arc::new(|_group: Arc<[String]>| {
            let mut table = ClassifierTable::new();
            table
                .register("explodes_on_leu", |w| {
                    if w == "leu" {
                        panic!("cannot classify leu");
                    }
                    true
                })
                .expect("fresh name");
            table
        });

        let err = run_with_table(&palindrome_groups(), "explodes_on_leu", build)
            .await
            .unwrap_err();
        match err {
            MapSatError::GroupFailed { group, source } => {
                assert_eq!(group, 1);
                assert!(matches!(*source, MapSatError::TransformFailed { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_groups_on_multi_thread_runtime() {
        let input: Vec<Vec<String>> = (0..64)
            .map(|i| (0..i).map(|n| n.to_string()).collect())
            .collect();
        let tally = summarize(&input, "three_set_bits", ClassifierTable::builtin())
            .await
            .unwrap();
        assert_eq!(tally.groups(), 64);

        let expected: usize = input
            .iter()
            .map(|g| g.iter().filter(|w| crate::classifier::predicates::has_three_set_bits(w)).count())
            .sum();
        assert_eq!(tally.total_satisfied(), expected);
    }

    #[test]
    fn test_fan_out_outside_runtime_is_an_error() {
        let err = fan_out(&palindrome_groups(), "palindrome", ClassifierTable::builtin()).unwrap_err();
        assert!(matches!(err, MapSatError::NoRuntime { ref stage } if stage == "fan-out"));
        assert!(!err.is_validation());
    }
}
