//! Label-independent canonical forms of datasets.
//!
//! Two datasets that differ only in blank node labels (and in whether RDF lists are written
//! as `List` terms or as `rdf:first`/`rdf:rest` chains) produce the same canonical string.
//!
//! The labelling itself is RDF dataset canonicalization as implemented by oxigraph. Its
//! issued identifiers are renamed to `c0`, `c1`, ... in issue order, zero-padded to a common
//! width so that the text order of the labels matches their numeric order.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use oxigraph::model as ox;
use oxigraph::model::dataset::CanonicalizationAlgorithm;

use crate::convert::to_oxigraph_quad;
use crate::dataset::Dataset;
use crate::errors::Result;
use crate::namespace::Prefixes;
use crate::serializer;
use crate::split::{split_shared_blank_nodes, StructuralPredicates};
use crate::term::{BlankNode, BlankNodeAllocator, GraphName, Object, Quad, Subject};

/// Rewrites every `List` term into explicit `rdf:first`/`rdf:rest` chains, minting list
/// node labels that do not collide with existing ones.
pub fn lower_lists(dataset: &Dataset) -> Dataset {
    if !dataset.has_lists() {
        return dataset.clone();
    }
    let existing = dataset.blank_nodes();
    let mut alloc = BlankNodeAllocator::with_prefix("l").avoiding(existing.iter());
    dataset.lower_lists(&mut alloc)
}

/// Relabels blank nodes so that isomorphic datasets become equal. Lists are lowered first.
///
/// Fails only when a term cannot be exported to oxigraph (an invalid IRI, language tag or
/// blank node label).
pub fn relabel_blank_nodes(dataset: &Dataset) -> Result<Dataset> {
    let lowered = lower_lists(dataset);
    if lowered.blank_nodes().is_empty() {
        return Ok(lowered);
    }

    let mut exported = ox::Dataset::new();
    for quad in &lowered {
        exported.insert(&to_oxigraph_quad(quad)?);
    }
    let mut issued: Vec<(String, String)> = exported
        .canonicalize_blank_nodes(CanonicalizationAlgorithm::Unstable)
        .iter()
        .map(|(from, to)| (to.as_str().to_string(), from.as_str().to_string()))
        .collect();
    // issued identifiers are one prefix followed by a counter
    issued.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let width = issued.len().saturating_sub(1).to_string().len();
    let labels: BTreeMap<BlankNode, BlankNode> = issued
        .into_iter()
        .enumerate()
        .map(|(i, (_, from))| {
            (
                BlankNode::new(from),
                BlankNode::new(format!("c{:0width$}", i, width = width)),
            )
        })
        .collect();
    debug!("relabelled {} blank nodes", labels.len());

    Ok(lowered
        .iter()
        .map(|quad| Quad {
            subject: match &quad.subject {
                Subject::BlankNode(b) => Subject::BlankNode(rename(b, &labels)),
                other => other.clone(),
            },
            predicate: quad.predicate.clone(),
            object: match &quad.object {
                Object::BlankNode(b) => Object::BlankNode(rename(b, &labels)),
                other => other.clone(),
            },
            graph_name: match &quad.graph_name {
                GraphName::BlankNode(b) => GraphName::BlankNode(rename(b, &labels)),
                other => other.clone(),
            },
        })
        .collect())
}

fn rename(node: &BlankNode, labels: &BTreeMap<BlankNode, BlankNode>) -> BlankNode {
    labels.get(node).cloned().unwrap_or_else(|| node.clone())
}

/// Lowers lists, splits shared structure along `predicates` and relabels blank nodes.
pub fn canonicalize(dataset: &Dataset, predicates: &StructuralPredicates) -> Result<Dataset> {
    let mut lowered = lower_lists(dataset);
    split_shared_blank_nodes(&mut lowered, predicates)?;
    relabel_blank_nodes(&lowered)
}

/// The comparison form of a dataset: lists lowered, blank nodes relabelled, serialized
/// without prefixes.
pub fn to_canonical_string(dataset: &Dataset) -> Result<String> {
    let canonical = relabel_blank_nodes(dataset)?;
    serializer::to_string(&canonical, &Prefixes::new())
}

/// Statements present on only one side of a comparison, as N-Quads lines of the canonical
/// forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDiff {
    /// Only in the expected dataset.
    pub missing: Vec<String>,
    /// Only in the actual dataset.
    pub unexpected: Vec<String>,
}

impl GraphDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl fmt::Display for GraphDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- expected")?;
        writeln!(f, "+++ actual")?;
        for line in &self.missing {
            writeln!(f, "-{}", line)?;
        }
        for line in &self.unexpected {
            writeln!(f, "+{}", line)?;
        }
        Ok(())
    }
}

/// Compares two datasets up to blank node labels and list representation.
pub fn diff(expected: &Dataset, actual: &Dataset) -> Result<GraphDiff> {
    let expected = relabel_blank_nodes(expected)?;
    let actual = relabel_blank_nodes(actual)?;
    Ok(GraphDiff {
        missing: expected
            .iter()
            .filter(|q| !actual.contains(q))
            .map(Quad::to_string)
            .collect(),
        unexpected: actual
            .iter()
            .filter(|q| !expected.contains(q))
            .map(Quad::to_string)
            .collect(),
    })
}
