//! Splits blank nodes that are shared through structural predicates.
//!
//! Two graphs describing the same validation outcome can disagree on whether a path
//! expression or result list is one shared node or several copies. After splitting, no blank
//! node has more than one incoming edge through a structural predicate: every extra edge
//! points at a fresh node carrying a copy of the original node's outgoing statements.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::SHACL_STRUCTURAL_PREDICATES;
use crate::dataset::Dataset;
use crate::errors::{Error, Result};
use crate::term::{BlankNode, BlankNodeAllocator, NamedNode, Quad, Subject};

/// The predicates along which shared structure is split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuralPredicates(BTreeSet<String>);

impl StructuralPredicates {
    pub fn new<I, S>(iris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StructuralPredicates(iris.into_iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// SHACL result paths, property path operators and RDF list links.
    pub fn shacl() -> Self {
        Self::new(SHACL_STRUCTURAL_PREDICATES.iter().map(NamedNode::as_str))
    }

    pub fn contains(&self, predicate: &NamedNode) -> bool {
        self.0.contains(predicate.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StructuralPredicates {
    fn default() -> Self {
        Self::shacl()
    }
}

/// What a call to [`split_shared_blank_nodes`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Rounds that found at least one shared node.
    pub rounds: usize,
    /// Incoming edges redirected to a fresh copy.
    pub split_edges: usize,
}

/// Blank nodes with two or more incoming structural edges, with those edges in canonical
/// order.
pub fn shared_blank_nodes(
    dataset: &Dataset,
    predicates: &StructuralPredicates,
) -> BTreeMap<BlankNode, Vec<Quad>> {
    let mut incoming: BTreeMap<BlankNode, Vec<Quad>> = BTreeMap::new();
    for quad in dataset.iter().filter(|q| predicates.contains(&q.predicate)) {
        if let Some(b) = quad.object.as_blank_node() {
            incoming.entry(b.clone()).or_default().push(quad.clone());
        }
    }
    incoming.retain(|_, edges| edges.len() > 1);
    incoming
}

/// Splits shared blank nodes in place until no blank node has more than one incoming
/// structural edge.
///
/// The first incoming edge of a shared node (in canonical order) is kept. Each other edge
/// `(s, p, b)` is replaced by `(s, p, b')` for a fresh `b'` that receives a copy of every
/// outgoing statement of `b`. Shared nodes nested below `b` become shared by the copies and
/// are handled in the next round.
///
/// For acyclic structure every round resolves one level of nesting, so the number of rounds
/// never exceeds the number of blank nodes in the input. A cycle through structural
/// predicates unrolls forever instead; exceeding that bound returns [`Error::Diverged`].
///
/// Cyclic input through structural predicates is therefore rejected, not partially split:
/// callers get [`Error::Diverged`] and the dataset is left as it was after the last round.
pub fn split_shared_blank_nodes(
    dataset: &mut Dataset,
    predicates: &StructuralPredicates,
) -> Result<SplitOutcome> {
    let existing = dataset.blank_nodes();
    let bound = existing.len() + 1;
    let mut alloc = BlankNodeAllocator::with_prefix("split").avoiding(existing.iter());
    let mut outcome = SplitOutcome::default();

    loop {
        let shared = shared_blank_nodes(dataset, predicates);
        if shared.is_empty() {
            break;
        }
        if outcome.rounds >= bound {
            return Err(Error::Diverged {
                rounds: outcome.rounds,
            });
        }
        outcome.rounds += 1;
        debug!(
            "split round {}: {} shared blank nodes",
            outcome.rounds,
            shared.len()
        );

        for (node, incoming) in shared {
            let subject = Subject::BlankNode(node);
            let outgoing: Vec<Quad> = dataset.quads_for_subject(&subject).cloned().collect();
            for edge in incoming.into_iter().skip(1) {
                let copy = alloc.fresh();
                dataset.remove(&edge);
                dataset.insert(Quad {
                    object: copy.clone().into(),
                    ..edge
                });
                for out in &outgoing {
                    dataset.insert(Quad {
                        subject: copy.clone().into(),
                        ..out.clone()
                    });
                }
                outcome.split_edges += 1;
            }
        }
    }

    if outcome.split_edges > 0 {
        debug!(
            "split {} edges in {} rounds",
            outcome.split_edges, outcome.rounds
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIRST, NIL, RESULT_PATH, REST};
    use crate::term::Object;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new(format!("http://example.org/{}", local))
    }

    fn incoming_structural(d: &Dataset, b: &BlankNode, preds: &StructuralPredicates) -> usize {
        d.iter()
            .filter(|q| preds.contains(&q.predicate) && q.object.as_blank_node() == Some(b))
            .count()
    }

    #[test]
    fn splits_node_shared_by_two_results() {
        let preds = StructuralPredicates::shacl();
        let path = BlankNode::new("x");
        let mut d = Dataset::from_quads([
            Quad::triple(ex("r1"), RESULT_PATH, path.clone()),
            Quad::triple(ex("r2"), RESULT_PATH, path.clone()),
            Quad::triple(path.clone(), ex("inversePathOf"), ex("p")),
        ]);

        let outcome = split_shared_blank_nodes(&mut d, &preds).unwrap();
        assert_eq!(outcome.split_edges, 1);
        assert_eq!(d.len(), 4);

        // r1 keeps the original node, r2 points at a copy with the same outgoing edge
        assert!(d.contains(&Quad::triple(ex("r1"), RESULT_PATH, path.clone())));
        let r2 = Subject::from(ex("r2"));
        let copy = d
            .objects_for(&r2, &RESULT_PATH)
            .next()
            .and_then(Object::as_blank_node)
            .cloned()
            .unwrap();
        assert_ne!(copy, path);
        assert!(d.contains(&Quad::triple(copy, ex("inversePathOf"), ex("p"))));
    }

    #[test]
    fn nested_sharing_is_resolved_in_later_rounds() {
        let preds = StructuralPredicates::shacl();
        let outer = BlankNode::new("outer");
        let inner = BlankNode::new("inner");
        let mut d = Dataset::from_quads([
            Quad::triple(ex("r1"), RESULT_PATH, outer.clone()),
            Quad::triple(ex("r2"), RESULT_PATH, outer.clone()),
            Quad::triple(outer.clone(), FIRST, inner.clone()),
            Quad::triple(outer.clone(), REST, NIL),
            Quad::triple(inner.clone(), ex("label"), ex("v")),
        ]);

        let outcome = split_shared_blank_nodes(&mut d, &preds).unwrap();
        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.split_edges, 2);
        for b in d.blank_nodes() {
            assert!(incoming_structural(&d, &b, &preds) <= 1);
        }
        // two outer nodes, two inner nodes
        assert_eq!(d.blank_nodes().len(), 4);
    }

    #[test]
    fn unrestricted_predicates_are_not_split() {
        let preds = StructuralPredicates::shacl();
        let b = BlankNode::new("b");
        let mut d = Dataset::from_quads([
            Quad::triple(ex("a"), ex("knows"), b.clone()),
            Quad::triple(ex("c"), ex("knows"), b.clone()),
        ]);
        let before = d.clone();
        let outcome = split_shared_blank_nodes(&mut d, &preds).unwrap();
        assert_eq!(outcome, SplitOutcome::default());
        assert_eq!(d, before);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let preds = StructuralPredicates::new([ex("link").as_str()]);
        let b = BlankNode::new("b");
        let mut d = Dataset::from_quads([
            Quad::triple(ex("a"), ex("link"), b.clone()),
            Quad::triple(ex("c"), ex("link"), b.clone()),
            Quad::triple(b, ex("value"), ex("v")),
        ]);
        split_shared_blank_nodes(&mut d, &preds).unwrap();
        let once = d.clone();
        let outcome = split_shared_blank_nodes(&mut d, &preds).unwrap();
        assert_eq!(outcome.split_edges, 0);
        assert_eq!(d, once);
    }

    #[test]
    fn structural_cycle_reports_divergence() {
        let preds = StructuralPredicates::shacl();
        let b = BlankNode::new("loop");
        let mut d = Dataset::from_quads([
            Quad::triple(ex("a"), REST, b.clone()),
            Quad::triple(b.clone(), REST, b.clone()),
        ]);
        match split_shared_blank_nodes(&mut d, &preds) {
            Err(Error::Diverged { rounds }) => assert_eq!(rounds, 2),
            other => panic!("expected divergence, got {:?}", other),
        }
    }
}
