//! A set of quads under structural equality.
//!
//! Membership, insertion and union all use the same relation (the total order on
//! [`Quad`]), and iteration always follows that order, so two datasets holding the same
//! statements behave identically no matter how they were built.

use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::consts::{FIRST, NIL, REST};
use crate::term::{BlankNode, BlankNodeAllocator, GraphName, NamedNode, Object, Quad, Subject};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dataset {
    quads: BTreeSet<Quad>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// The empty dataset.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_quads(quads: impl IntoIterator<Item = Quad>) -> Self {
        quads.into_iter().collect()
    }

    /// Adds a quad. Returns false (and changes nothing) if it was already present.
    pub fn insert(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    /// Consuming form of [`Dataset::insert`].
    pub fn with(mut self, quad: Quad) -> Self {
        self.quads.insert(quad);
        self
    }

    pub fn remove(&mut self, quad: &Quad) -> bool {
        self.quads.remove(quad)
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Iterates quads in canonical order.
    pub fn iter(&self) -> btree_set::Iter<'_, Quad> {
        self.quads.iter()
    }

    /// Set union of two datasets.
    pub fn union(&self, other: &Dataset) -> Dataset {
        Dataset {
            quads: self.quads.union(&other.quads).cloned().collect(),
        }
    }

    /// Left fold of [`Dataset::union`] over the empty dataset.
    pub fn concat_all<I>(datasets: I) -> Dataset
    where
        I: IntoIterator<Item = Dataset>,
    {
        datasets
            .into_iter()
            .fold(Dataset::empty(), |mut acc, next| {
                acc.extend(next);
                acc
            })
    }

    /// Materializes the quads in canonical order.
    pub fn to_sorted_vec(&self) -> Vec<Quad> {
        self.quads.iter().cloned().collect()
    }

    pub fn quads_for_subject<'a>(&'a self, subject: &'a Subject) -> impl Iterator<Item = &'a Quad> + 'a {
        self.quads.iter().filter(move |q| &q.subject == subject)
    }

    pub fn quads_for_predicate<'a>(
        &'a self,
        predicate: &'a NamedNode,
    ) -> impl Iterator<Item = &'a Quad> + 'a {
        self.quads.iter().filter(move |q| &q.predicate == predicate)
    }

    pub fn quads_for_object<'a>(&'a self, object: &'a Object) -> impl Iterator<Item = &'a Quad> + 'a {
        self.quads.iter().filter(move |q| &q.object == object)
    }

    /// Objects of `(subject, predicate, ?)` in canonical order.
    pub fn objects_for<'a>(
        &'a self,
        subject: &'a Subject,
        predicate: &'a NamedNode,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.quads_for_subject(subject)
            .filter(move |q| &q.predicate == predicate)
            .map(|q| &q.object)
    }

    /// Subjects of `(?, predicate, object)` in canonical order.
    pub fn subjects_for<'a>(
        &'a self,
        predicate: &'a NamedNode,
        object: &'a Object,
    ) -> impl Iterator<Item = &'a Subject> + 'a {
        self.quads_for_object(object)
            .filter(move |q| &q.predicate == predicate)
            .map(|q| &q.subject)
    }

    /// Every blank node in any position, including inside lists.
    pub fn blank_nodes(&self) -> BTreeSet<BlankNode> {
        let mut out = BTreeSet::new();
        for quad in &self.quads {
            if let Subject::BlankNode(b) = &quad.subject {
                out.insert(b.clone());
            }
            quad.object.for_each_blank_node(&mut |b| {
                out.insert(b.clone());
            });
            if let GraphName::BlankNode(b) = &quad.graph_name {
                out.insert(b.clone());
            }
        }
        out
    }

    /// Number of `(graph, subject)` groups, i.e. the subject blocks a serializer emits.
    pub fn subject_groups(&self) -> usize {
        let mut count = 0;
        let mut last: Option<(&GraphName, &Subject)> = None;
        for quad in &self.quads {
            let key = (&quad.graph_name, &quad.subject);
            if last != Some(key) {
                count += 1;
                last = Some(key);
            }
        }
        count
    }

    /// Rewrites every `List` object into an `rdf:first`/`rdf:rest` chain of fresh blank
    /// nodes terminated by `rdf:nil`. An empty list becomes `rdf:nil` itself.
    pub fn lower_lists(&self, alloc: &mut BlankNodeAllocator) -> Dataset {
        let mut out = Dataset::new();
        for quad in &self.quads {
            let mut extra = Vec::new();
            let object = lower_object(&quad.object, &quad.graph_name, alloc, &mut extra);
            out.insert(Quad {
                subject: quad.subject.clone(),
                predicate: quad.predicate.clone(),
                object,
                graph_name: quad.graph_name.clone(),
            });
            out.extend(extra);
        }
        out
    }

    pub fn has_lists(&self) -> bool {
        self.quads.iter().any(|q| matches!(q.object, Object::List(_)))
    }
}

fn lower_object(
    object: &Object,
    graph: &GraphName,
    alloc: &mut BlankNodeAllocator,
    out: &mut Vec<Quad>,
) -> Object {
    let items = match object {
        Object::List(items) => items,
        other => return other.clone(),
    };
    let nodes: Vec<BlankNode> = items.iter().map(|_| alloc.fresh()).collect();
    for (i, item) in items.iter().enumerate() {
        let value = lower_object(item, graph, alloc, out);
        out.push(Quad::new(nodes[i].clone(), FIRST, value, graph.clone()));
        let rest: Object = match nodes.get(i + 1) {
            Some(next) => next.clone().into(),
            None => NIL.into(),
        };
        out.push(Quad::new(nodes[i].clone(), REST, rest, graph.clone()));
    }
    match nodes.into_iter().next() {
        Some(head) => head.into(),
        None => NIL.into(),
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Dataset {
            quads: iter.into_iter().collect(),
        }
    }
}

impl Extend<Quad> for Dataset {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        self.quads.extend(iter);
    }
}

impl IntoIterator for Dataset {
    type Item = Quad;
    type IntoIter = btree_set::IntoIter<Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Quad;
    type IntoIter = btree_set::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}
