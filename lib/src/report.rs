//! SHACL validation reports: lookup, normalization and comparison against an expected report.
//!
//! A validator's report and a hand-written expected report can describe the same outcome
//! with different blank node sharing and with or without human-readable messages. Before
//! comparing, the actual report loses its `sh:resultMessage` values when the expected report
//! carries none, and shared structural blank nodes are split.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info};

use crate::canonical::{diff, lower_lists, GraphDiff};
use crate::config::Config;
use crate::consts::{CONFORMS, RESULT, RESULT_MESSAGE, TYPE, VALIDATION_REPORT};
use crate::dataset::Dataset;
use crate::errors::Result;
use crate::split::{split_shared_blank_nodes, SplitOutcome, StructuralPredicates};
use crate::term::{Object, Quad, Subject};

/// The `sh:ValidationReport` node of a dataset.
#[derive(Debug, Clone)]
pub struct ValidationReport<'a> {
    dataset: &'a Dataset,
    node: Subject,
}

impl<'a> ValidationReport<'a> {
    /// The first node typed `sh:ValidationReport`, if any.
    pub fn find(dataset: &'a Dataset) -> Option<Self> {
        let class = Object::from(VALIDATION_REPORT);
        let node = dataset.subjects_for(&TYPE, &class).next().cloned();
        node.map(|node| ValidationReport { dataset, node })
    }

    pub fn node(&self) -> &Subject {
        &self.node
    }

    /// `sh:conforms` is true only for the literal value `true`.
    pub fn conforms(&self) -> bool {
        self.dataset
            .objects_for(&self.node, &CONFORMS)
            .filter_map(Object::as_literal)
            .any(|l| l.value() == "true")
    }

    /// The `sh:result` nodes in canonical order.
    pub fn results(&self) -> Vec<Subject> {
        self.dataset
            .objects_for(&self.node, &RESULT)
            .filter_map(Object::to_subject)
            .collect()
    }

    pub fn has_result_messages(&self) -> bool {
        self.results()
            .iter()
            .any(|r| self.dataset.objects_for(r, &RESULT_MESSAGE).next().is_some())
    }

    /// The statements describing this report.
    pub fn to_dataset(&self) -> Dataset {
        resource(self.dataset, &self.node)
    }
}

/// Every statement about `node`, plus the statements about blank nodes reachable from it.
pub fn resource(dataset: &Dataset, node: &Subject) -> Dataset {
    let mut out = Dataset::new();
    let mut seen = BTreeSet::new();
    let mut pending = vec![node.clone()];
    while let Some(subject) = pending.pop() {
        if !seen.insert(subject.clone()) {
            continue;
        }
        for quad in dataset.quads_for_subject(&subject) {
            quad.object.for_each_blank_node(&mut |b| {
                pending.push(Subject::BlankNode(b.clone()));
            });
            out.insert(quad.clone());
        }
    }
    out
}

/// Removes `sh:resultMessage` from every result of the report rooted at `node`. Returns the
/// number of statements removed.
pub fn strip_result_messages(dataset: &mut Dataset, node: &Subject) -> usize {
    let results: Vec<Subject> = dataset
        .objects_for(node, &RESULT)
        .filter_map(Object::to_subject)
        .collect();
    let doomed: Vec<Quad> = results
        .iter()
        .flat_map(|r| dataset.quads_for_subject(r))
        .filter(|q| q.predicate == RESULT_MESSAGE)
        .cloned()
        .collect();
    for quad in &doomed {
        dataset.remove(quad);
    }
    doomed.len()
}

/// Brings an actual report into the shape of the expected one.
pub fn normalize(
    actual: &mut Dataset,
    expected: &ValidationReport<'_>,
    config: &Config,
) -> Result<SplitOutcome> {
    if config.strip_result_messages && !expected.has_result_messages() {
        if let Some(node) = ValidationReport::find(actual).map(|r| r.node) {
            let removed = strip_result_messages(actual, &node);
            debug!("removed {} result messages", removed);
        }
    }
    let mut lowered = lower_lists(actual);
    let outcome = split_shared_blank_nodes(&mut lowered, &config.structural_predicates)?;
    *actual = lowered;
    Ok(outcome)
}

/// Result of comparing an actual validation outcome with an expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Match,
    ConformanceMismatch { expected: bool, actual: bool },
    Differs(GraphDiff),
    /// Only one side contains a `sh:ValidationReport` node; names the side lacking it.
    MissingReport(&'static str),
}

impl ReportOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ReportOutcome::Match)
    }
}

impl fmt::Display for ReportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportOutcome::Match => write!(f, "reports match"),
            ReportOutcome::ConformanceMismatch { expected, actual } => write!(
                f,
                "conformance mismatch: expected sh:conforms {}, got {}",
                expected, actual
            ),
            ReportOutcome::Differs(d) => write!(f, "reports differ\n{}", d),
            ReportOutcome::MissingReport(side) => {
                write!(f, "no sh:ValidationReport found in {} dataset", side)
            }
        }
    }
}

/// Compares two plain graphs after splitting shared structure on both sides.
pub fn compare_graphs(
    expected: &Dataset,
    actual: &Dataset,
    predicates: &StructuralPredicates,
) -> Result<GraphDiff> {
    let mut expected = lower_lists(expected);
    let mut actual = lower_lists(actual);
    split_shared_blank_nodes(&mut expected, predicates)?;
    split_shared_blank_nodes(&mut actual, predicates)?;
    diff(&expected, &actual)
}

/// Compares an actual validation result with the expected one.
///
/// When the expected report conforms only conformance is checked. Otherwise the actual
/// report is normalized and compared with the expected report's description. Datasets
/// without any report node are compared as plain graphs.
pub fn compare(actual: &Dataset, expected: &Dataset, config: &Config) -> Result<ReportOutcome> {
    let (expected_report, actual_report) =
        match (ValidationReport::find(expected), ValidationReport::find(actual)) {
            (Some(e), Some(a)) => (e, a),
            (None, None) => {
                info!("no validation report found, comparing as plain graphs");
                let d = compare_graphs(expected, actual, &config.structural_predicates)?;
                return Ok(if d.is_empty() {
                    ReportOutcome::Match
                } else {
                    ReportOutcome::Differs(d)
                });
            }
            (None, Some(_)) => return Ok(ReportOutcome::MissingReport("expected")),
            (Some(_), None) => return Ok(ReportOutcome::MissingReport("actual")),
        };

    let expected_conforms = expected_report.conforms();
    let actual_conforms = actual_report.conforms();
    if expected_conforms != actual_conforms {
        return Ok(ReportOutcome::ConformanceMismatch {
            expected: expected_conforms,
            actual: actual_conforms,
        });
    }
    if expected_conforms {
        return Ok(ReportOutcome::Match);
    }

    let mut normalized = actual_report.to_dataset();
    let outcome = normalize(&mut normalized, &expected_report, config)?;
    debug!(
        "normalized actual report: {} edges split in {} rounds",
        outcome.split_edges, outcome.rounds
    );
    let d = diff(&expected_report.to_dataset(), &normalized)?;
    Ok(if d.is_empty() {
        ReportOutcome::Match
    } else {
        ReportOutcome::Differs(d)
    })
}
