//! Namespaces and prefix tables.
//!
//! A namespace is a base IRI that local names are appended to. The prefix table used for
//! output is an explicit value handed to the serializer for one invocation.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::consts::{DCTERMS_NS, FABIO_NS, FRBR_NS, RDFS_NS, RDF_NS, SCIETY_NS, SH_NS, XSD_NS};
use crate::term::NamedNode;

lazy_static! {
    // Conservative subset of the Turtle PN_LOCAL production.
    static ref LOCAL_NAME: Regex =
        Regex::new(r"^(?:[A-Za-z0-9_](?:[A-Za-z0-9_.\-]*[A-Za-z0-9_\-])?)?$").unwrap();
    static ref PREFIX_NAME: Regex = Regex::new(r"^(?:[A-Za-z](?:[A-Za-z0-9_.\-]*[A-Za-z0-9_\-])?)?$").unwrap();
}

/// Joins a namespace base and a local name into a named node.
pub fn iri(base: &str, local: &str) -> NamedNode {
    NamedNode::new(format!("{}{}", base, local))
}

/// A short name bound to a base IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    base: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            base: base.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn iri(&self, local: &str) -> NamedNode {
        iri(&self.base, local)
    }
}

/// Mapping from short name to namespace base, iterated in short-name order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefixes(BTreeMap<String, String>);

impl Prefixes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vocabularies used for article and review metadata.
    pub fn scholarly() -> Self {
        Self::new()
            .with("dcterms", DCTERMS_NS)
            .with("fabio", FABIO_NS)
            .with("frbr", FRBR_NS)
            .with("rdf", RDF_NS)
            .with("rdfs", RDFS_NS)
            .with("sciety", SCIETY_NS)
            .with("sh", SH_NS)
            .with("xsd", XSD_NS)
    }

    pub fn with(mut self, prefix: impl Into<String>, base: impl Into<String>) -> Self {
        self.insert(prefix, base);
        self
    }

    pub fn insert(&mut self, prefix: impl Into<String>, base: impl Into<String>) -> Option<String> {
        self.0.insert(prefix.into(), base.into())
    }

    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.0.remove(prefix)
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    pub fn namespace(&self, prefix: &str) -> Option<Namespace> {
        self.get(prefix).map(|base| Namespace::new(prefix, base))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, b)| (p.as_str(), b.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries whose short name can be written in a `@prefix` declaration.
    pub fn declarable(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(p, _)| PREFIX_NAME.is_match(p))
    }

    /// Splits an IRI into `(prefix, local)` using the longest matching base whose remainder
    /// is a valid local name.
    pub fn shorten<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        self.declarable()
            .filter_map(|(prefix, base)| {
                iri.strip_prefix(base)
                    .filter(|local| LOCAL_NAME.is_match(local))
                    .map(|local| (prefix, base.len(), local))
            })
            .max_by_key(|(_, len, _)| *len)
            .map(|(prefix, _, local)| (prefix, local))
    }

    /// Expands `prefix:local` into a named node.
    pub fn expand(&self, curie: &str) -> Option<NamedNode> {
        let (prefix, local) = curie.split_once(':')?;
        self.get(prefix).map(|base| iri(base, local))
    }
}

impl<P: Into<String>, B: Into<String>> FromIterator<(P, B)> for Prefixes {
    fn from_iter<T: IntoIterator<Item = (P, B)>>(iter: T) -> Self {
        Prefixes(
            iter.into_iter()
                .map(|(p, b)| (p.into(), b.into()))
                .collect(),
        )
    }
}
