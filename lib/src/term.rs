//! The RDF term algebra and the statements built from it.
//!
//! Terms are immutable values. Equality is structural and every type here carries a total
//! order used for deterministic iteration and output. Across kinds the order is
//! `DefaultGraph < NamedNode < BlankNode < Literal < List`; the positional enums
//! ([`Subject`], [`Object`], [`GraphName`]) declare their variants in that same order so
//! their derived orderings agree with [`Term`].

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use url::Url;

use crate::consts::{ANY_URI, DATE, STRING};

const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDF_LANG_STRING_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
const XSD_STRING_IRI: &str = "http://www.w3.org/2001/XMLSchema#string";

/// An IRI reference. Identity is the exact IRI string; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedNode {
    iri: Cow<'static, str>,
}

impl NamedNode {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: Cow::Owned(iri.into()),
        }
    }

    /// Builds a named node from a static string, usable in `const` items.
    pub const fn new_static(iri: &'static str) -> Self {
        Self {
            iri: Cow::Borrowed(iri),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.iri
    }

    pub fn is_rdf_type(&self) -> bool {
        self.as_str() == RDF_TYPE_IRI
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// A blank node. Labels are only meaningful within the dataset that produced them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlankNode {
    label: String,
}

impl BlankNode {
    /// Creates a blank node with the given label; a leading `_:` is stripped.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        match label.strip_prefix("_:") {
            Some(stripped) => Self {
                label: stripped.to_string(),
            },
            None => Self { label },
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.label)
    }
}

/// A literal value. Plain strings are `Typed` with `xsd:string`; a literal never carries
/// both a language tag and an explicit datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    LanguageTagged { value: String, language: String },
    Typed { value: String, datatype: NamedNode },
}

impl Literal {
    /// A plain string literal (`xsd:string`).
    pub fn string(value: impl Into<String>) -> Self {
        Literal::Typed {
            value: value.into(),
            datatype: STRING,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: NamedNode) -> Self {
        Literal::Typed {
            value: value.into(),
            datatype,
        }
    }

    /// A language-tagged string. The tag is kept exactly as given.
    pub fn language_tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Literal::LanguageTagged {
            value: value.into(),
            language: language.into(),
        }
    }

    /// An `xsd:date` literal formatted as `YYYY-MM-DD`.
    pub fn date(date: NaiveDate) -> Self {
        Literal::typed(date.format("%Y-%m-%d").to_string(), DATE)
    }

    /// An `xsd:anyURI` literal, for URLs that are values rather than resources.
    pub fn any_uri(url: &Url) -> Self {
        Literal::typed(url.as_str(), ANY_URI)
    }

    pub fn value(&self) -> &str {
        match self {
            Literal::LanguageTagged { value, .. } | Literal::Typed { value, .. } => value,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Literal::LanguageTagged { language, .. } => Some(language),
            Literal::Typed { .. } => None,
        }
    }

    /// The datatype IRI; `rdf:langString` for language-tagged literals.
    pub fn datatype_iri(&self) -> &str {
        match self {
            Literal::LanguageTagged { .. } => RDF_LANG_STRING_IRI,
            Literal::Typed { datatype, .. } => datatype.as_str(),
        }
    }

    /// True for `xsd:string` literals, whose datatype is implicit in text formats.
    pub fn is_plain(&self) -> bool {
        self.datatype_iri() == XSD_STRING_IRI
    }
}

// Literals compare by datatype first, then lexical value, then language tag.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.datatype_iri()
            .cmp(other.datatype_iri())
            .then_with(|| self.value().cmp(other.value()))
            .then_with(|| self.language().cmp(&other.language()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(self.value()))?;
        match self {
            Literal::LanguageTagged { language, .. } => write!(f, "@{}", language),
            Literal::Typed { datatype, .. } => write!(f, "^^{}", datatype),
        }
    }
}

/// Escapes a lexical value for use inside a double-quoted literal.
pub(crate) fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Any RDF term, including the default graph marker and the `List` convenience value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    DefaultGraph,
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    List(Vec<Object>),
}

/// The subject position: a named or blank node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl Subject {
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Subject::BlankNode(b) => Some(b),
            Subject::NamedNode(_) => None,
        }
    }
}

/// The object position. `List` is lowered to an `rdf:first`/`rdf:rest` chain on output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Object {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    List(Vec<Object>),
}

impl Object {
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Object::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// The object as a subject, when it is a node that can carry outgoing statements.
    pub fn to_subject(&self) -> Option<Subject> {
        match self {
            Object::NamedNode(n) => Some(Subject::NamedNode(n.clone())),
            Object::BlankNode(b) => Some(Subject::BlankNode(b.clone())),
            Object::Literal(_) | Object::List(_) => None,
        }
    }

    /// Visits every blank node in the object, descending into lists.
    pub fn for_each_blank_node<'a>(&'a self, f: &mut impl FnMut(&'a BlankNode)) {
        match self {
            Object::BlankNode(b) => f(b),
            Object::List(items) => {
                for item in items {
                    item.for_each_blank_node(f);
                }
            }
            Object::NamedNode(_) | Object::Literal(_) => {}
        }
    }
}

/// The graph position of a quad.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum GraphName {
    #[default]
    DefaultGraph,
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl GraphName {
    pub fn is_default_graph(&self) -> bool {
        matches!(self, GraphName::DefaultGraph)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::NamedNode(n) => n.fmt(f),
            Subject::BlankNode(b) => b.fmt(f),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::NamedNode(n) => n.fmt(f),
            Object::BlankNode(b) => b.fmt(f),
            Object::Literal(l) => l.fmt(f),
            Object::List(items) => {
                write!(f, "(")?;
                for item in items {
                    write!(f, " {}", item)?;
                }
                write!(f, " )")
            }
        }
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphName::DefaultGraph => write!(f, "DEFAULT"),
            GraphName::NamedNode(n) => n.fmt(f),
            GraphName::BlankNode(b) => b.fmt(f),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::DefaultGraph => write!(f, "DEFAULT"),
            Term::NamedNode(n) => n.fmt(f),
            Term::BlankNode(b) => b.fmt(f),
            Term::Literal(l) => l.fmt(f),
            Term::List(items) => Object::List(items.clone()).fmt(f),
        }
    }
}

impl From<NamedNode> for Subject {
    fn from(n: NamedNode) -> Self {
        Subject::NamedNode(n)
    }
}

impl From<BlankNode> for Subject {
    fn from(b: BlankNode) -> Self {
        Subject::BlankNode(b)
    }
}

impl From<NamedNode> for Object {
    fn from(n: NamedNode) -> Self {
        Object::NamedNode(n)
    }
}

impl From<BlankNode> for Object {
    fn from(b: BlankNode) -> Self {
        Object::BlankNode(b)
    }
}

impl From<Literal> for Object {
    fn from(l: Literal) -> Self {
        Object::Literal(l)
    }
}

impl From<Subject> for Object {
    fn from(s: Subject) -> Self {
        match s {
            Subject::NamedNode(n) => Object::NamedNode(n),
            Subject::BlankNode(b) => Object::BlankNode(b),
        }
    }
}

impl From<NamedNode> for GraphName {
    fn from(n: NamedNode) -> Self {
        GraphName::NamedNode(n)
    }
}

impl From<BlankNode> for GraphName {
    fn from(b: BlankNode) -> Self {
        GraphName::BlankNode(b)
    }
}

impl From<NamedNode> for Term {
    fn from(n: NamedNode) -> Self {
        Term::NamedNode(n)
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Term::BlankNode(b)
    }
}

impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Term::Literal(l)
    }
}

impl From<Subject> for Term {
    fn from(s: Subject) -> Self {
        match s {
            Subject::NamedNode(n) => Term::NamedNode(n),
            Subject::BlankNode(b) => Term::BlankNode(b),
        }
    }
}

impl From<Object> for Term {
    fn from(o: Object) -> Self {
        match o {
            Object::NamedNode(n) => Term::NamedNode(n),
            Object::BlankNode(b) => Term::BlankNode(b),
            Object::Literal(l) => Term::Literal(l),
            Object::List(items) => Term::List(items),
        }
    }
}

impl From<GraphName> for Term {
    fn from(g: GraphName) -> Self {
        match g {
            GraphName::DefaultGraph => Term::DefaultGraph,
            GraphName::NamedNode(n) => Term::NamedNode(n),
            GraphName::BlankNode(b) => Term::BlankNode(b),
        }
    }
}

/// A statement. A triple is a quad in the default graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: Subject,
    pub predicate: NamedNode,
    pub object: Object,
    pub graph_name: GraphName,
}

impl Quad {
    pub fn new(
        subject: impl Into<Subject>,
        predicate: NamedNode,
        object: impl Into<Object>,
        graph_name: impl Into<GraphName>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }

    /// A quad in the default graph.
    pub fn triple(subject: impl Into<Subject>, predicate: NamedNode, object: impl Into<Object>) -> Self {
        Self::new(subject, predicate, object, GraphName::DefaultGraph)
    }
}

/// Orders predicates with `rdf:type` first and everything else by IRI.
pub fn cmp_predicates(a: &NamedNode, b: &NamedNode) -> Ordering {
    match (a.is_rdf_type(), b.is_rdf_type()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

// Quads order by (graph, subject, predicate, object) so that each resource forms one
// contiguous run per graph.
impl Ord for Quad {
    fn cmp(&self, other: &Self) -> Ordering {
        self.graph_name
            .cmp(&other.graph_name)
            .then_with(|| self.subject.cmp(&other.subject))
            .then_with(|| cmp_predicates(&self.predicate, &other.predicate))
            .then_with(|| self.object.cmp(&other.object))
    }
}

impl PartialOrd for Quad {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Quad {
    /// N-Quads style line without the trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if !self.graph_name.is_default_graph() {
            write!(f, " {}", self.graph_name)?;
        }
        write!(f, " .")
    }
}

/// Mints blank node labels that are unique within one graph-construction session.
#[derive(Debug, Clone)]
pub struct BlankNodeAllocator {
    prefix: String,
    next: u64,
    taken: HashSet<String>,
}

impl Default for BlankNodeAllocator {
    fn default() -> Self {
        Self::with_prefix("b")
    }
}

impl BlankNodeAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
            taken: HashSet::new(),
        }
    }

    /// Reserves existing labels so freshly minted nodes never collide with them.
    pub fn avoiding<'a>(mut self, labels: impl IntoIterator<Item = &'a BlankNode>) -> Self {
        self.taken
            .extend(labels.into_iter().map(|b| b.label().to_string()));
        self
    }

    pub fn fresh(&mut self) -> BlankNode {
        loop {
            let label = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if self.taken.insert(label.clone()) {
                return BlankNode { label };
            }
        }
    }
}
