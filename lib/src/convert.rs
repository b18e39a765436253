//! Conversion between the core term model and oxigraph's.
//!
//! Parsing and external validation go through oxigraph; everything else in this crate works
//! on [`crate::dataset::Dataset`]. Lists have no oxigraph counterpart and are lowered to
//! `rdf:first`/`rdf:rest` chains on the way out.

use log::warn;
use oxigraph::model as ox;

use crate::canonical::lower_lists;
use crate::dataset::Dataset;
use crate::errors::{Error, Result};
use crate::term::{BlankNode, GraphName, Literal, NamedNode, Object, Quad, Subject};

pub fn from_oxigraph_named_node(node: &ox::NamedNode) -> NamedNode {
    NamedNode::new(node.as_str())
}

pub fn from_oxigraph_literal(literal: &ox::Literal) -> Literal {
    match literal.language() {
        Some(language) => Literal::language_tagged(literal.value(), language),
        None => Literal::typed(
            literal.value(),
            NamedNode::new(literal.datatype().as_str()),
        ),
    }
}

pub fn from_oxigraph_quad(quad: &ox::Quad) -> Result<Quad> {
    let subject: Subject = match &quad.subject {
        ox::NamedOrBlankNode::NamedNode(n) => from_oxigraph_named_node(n).into(),
        ox::NamedOrBlankNode::BlankNode(b) => BlankNode::new(b.as_str()).into(),
    };
    #[allow(unreachable_patterns)]
    let object: Object = match &quad.object {
        ox::Term::NamedNode(n) => from_oxigraph_named_node(n).into(),
        ox::Term::BlankNode(b) => BlankNode::new(b.as_str()).into(),
        ox::Term::Literal(l) => from_oxigraph_literal(l).into(),
        other => {
            warn!("rejecting quad with unsupported object term {}", other);
            return Err(Error::InvalidTerm(format!(
                "unsupported object term {}",
                other
            )));
        }
    };
    let graph_name = match &quad.graph_name {
        ox::GraphName::NamedNode(n) => GraphName::NamedNode(from_oxigraph_named_node(n)),
        ox::GraphName::BlankNode(b) => GraphName::BlankNode(BlankNode::new(b.as_str())),
        ox::GraphName::DefaultGraph => GraphName::DefaultGraph,
    };
    Ok(Quad {
        subject,
        predicate: from_oxigraph_named_node(&quad.predicate),
        object,
        graph_name,
    })
}

pub fn from_oxigraph_dataset(dataset: &ox::Dataset) -> Result<Dataset> {
    dataset
        .iter()
        .map(|q| from_oxigraph_quad(&q.into_owned()))
        .collect()
}

fn to_oxigraph_named_node(node: &NamedNode) -> Result<ox::NamedNode> {
    ox::NamedNode::new(node.as_str())
        .map_err(|e| Error::InvalidTerm(format!("{}: {}", node, e)))
}

fn to_oxigraph_blank_node(node: &BlankNode) -> Result<ox::BlankNode> {
    ox::BlankNode::new(node.label()).map_err(|e| Error::InvalidTerm(format!("{}: {}", node, e)))
}

fn to_oxigraph_literal(literal: &Literal) -> Result<ox::Literal> {
    match literal {
        Literal::LanguageTagged { value, language } => {
            ox::Literal::new_language_tagged_literal(value.as_str(), language.as_str())
                .map_err(|e| Error::InvalidTerm(format!("{}: {}", literal, e)))
        }
        Literal::Typed { value, datatype } => Ok(ox::Literal::new_typed_literal(
            value.as_str(),
            to_oxigraph_named_node(datatype)?,
        )),
    }
}

/// Converts one quad. `List` objects are rejected; lower them first.
pub fn to_oxigraph_quad(quad: &Quad) -> Result<ox::Quad> {
    let subject: ox::NamedOrBlankNode = match &quad.subject {
        Subject::NamedNode(n) => to_oxigraph_named_node(n)?.into(),
        Subject::BlankNode(b) => to_oxigraph_blank_node(b)?.into(),
    };
    let object: ox::Term = match &quad.object {
        Object::NamedNode(n) => to_oxigraph_named_node(n)?.into(),
        Object::BlankNode(b) => to_oxigraph_blank_node(b)?.into(),
        Object::Literal(l) => to_oxigraph_literal(l)?.into(),
        Object::List(_) => {
            return Err(Error::InvalidTerm(format!(
                "list object in {} must be lowered before export",
                quad
            )))
        }
    };
    let graph_name = match &quad.graph_name {
        GraphName::DefaultGraph => ox::GraphName::DefaultGraph,
        GraphName::NamedNode(n) => to_oxigraph_named_node(n)?.into(),
        GraphName::BlankNode(b) => to_oxigraph_blank_node(b)?.into(),
    };
    Ok(ox::Quad::new(
        subject,
        to_oxigraph_named_node(&quad.predicate)?,
        object,
        graph_name,
    ))
}

/// Converts a dataset, lowering lists first.
pub fn to_oxigraph_dataset(dataset: &Dataset) -> Result<ox::Dataset> {
    let mut out = ox::Dataset::new();
    for quad in &lower_lists(dataset) {
        out.insert(&to_oxigraph_quad(quad)?);
    }
    Ok(out)
}
