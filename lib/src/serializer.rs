//! Streaming Turtle/TriG writer.
//!
//! Quads are consumed in canonical order and grouped by `(graph, subject)`. Each group is
//! written as one block as soon as the next group starts, so memory use is bounded by the
//! largest single-subject block rather than the whole dataset:
//!
//! ```text
//! @prefix ex: <http://example.org/> .
//!
//! ex:a
//!   a ex:Paper ;
//!   ex:title "On Things" .
//! ```
//!
//! Statements in a named graph are wrapped in a `<graph> { ... }` block.

use std::io::Write;

use log::debug;

use crate::dataset::Dataset;
use crate::errors::Result;
use crate::namespace::Prefixes;
use crate::term::{escape_literal, GraphName, Literal, NamedNode, Object, Quad, Subject};

const INDENT: &str = "  ";

struct Group {
    graph: GraphName,
    subject: Subject,
    predicates: Vec<(NamedNode, Vec<Object>)>,
}

pub struct TurtleSerializer<'p, W: Write> {
    writer: W,
    prefixes: &'p Prefixes,
    header_written: bool,
    blocks_written: usize,
    open_graph: Option<GraphName>,
    group: Option<Group>,
}

impl<'p, W: Write> TurtleSerializer<'p, W> {
    pub fn new(writer: W, prefixes: &'p Prefixes) -> Self {
        Self {
            writer,
            prefixes,
            header_written: false,
            blocks_written: 0,
            open_graph: None,
            group: None,
        }
    }

    /// Adds one quad. Quads must arrive in canonical order for each subject to form a
    /// single block; [`TurtleSerializer::serialize_dataset`] guarantees that.
    pub fn serialize_quad(&mut self, quad: &Quad) -> Result<()> {
        self.write_header()?;
        if let Some(group) = self.group.as_mut() {
            if group.graph == quad.graph_name && group.subject == quad.subject {
                match group.predicates.last_mut() {
                    Some((p, objects)) if *p == quad.predicate => {
                        objects.push(quad.object.clone())
                    }
                    _ => group
                        .predicates
                        .push((quad.predicate.clone(), vec![quad.object.clone()])),
                }
                return Ok(());
            }
        }
        self.flush_group()?;
        self.group = Some(Group {
            graph: quad.graph_name.clone(),
            subject: quad.subject.clone(),
            predicates: vec![(quad.predicate.clone(), vec![quad.object.clone()])],
        });
        Ok(())
    }

    pub fn serialize_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        for quad in dataset {
            self.serialize_quad(quad)?;
        }
        Ok(())
    }

    /// Writes any pending block, flushes the sink and hands it back.
    pub fn finish(mut self) -> Result<W> {
        self.write_header()?;
        self.flush_group()?;
        if self.open_graph.take().is_some() {
            self.writer.write_all(b"}\n")?;
        }
        self.writer.flush()?;
        debug!("wrote {} subject blocks", self.blocks_written);
        Ok(self.writer)
    }

    fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;
        let mut any = false;
        for (prefix, base) in self.prefixes.declarable() {
            writeln!(self.writer, "@prefix {}: <{}> .", prefix, base)?;
            any = true;
        }
        if any {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn flush_group(&mut self) -> Result<()> {
        let group = match self.group.take() {
            Some(group) => group,
            None => return Ok(()),
        };

        if self.open_graph.as_ref() != Some(&group.graph) {
            if self.open_graph.take().is_some() {
                self.writer.write_all(b"}\n\n")?;
                self.blocks_written = 0;
            }
            if !group.graph.is_default_graph() {
                if self.blocks_written > 0 {
                    self.writer.write_all(b"\n")?;
                    self.blocks_written = 0;
                }
                let name = self.graph_name(&group.graph);
                writeln!(self.writer, "{} {{", name)?;
                self.open_graph = Some(group.graph.clone());
            }
        }

        let mut block = String::new();
        if self.blocks_written > 0 {
            block.push('\n');
        }
        block.push_str(&self.subject(&group.subject));
        let last = group.predicates.len().saturating_sub(1);
        for (i, (predicate, objects)) in group.predicates.iter().enumerate() {
            block.push('\n');
            block.push_str(INDENT);
            block.push_str(&self.predicate(predicate));
            block.push(' ');
            let objects: Vec<String> = objects.iter().map(|o| self.object(o)).collect();
            block.push_str(&objects.join(", "));
            block.push_str(if i == last { " ." } else { " ;" });
        }
        block.push('\n');
        self.writer.write_all(block.as_bytes())?;
        self.blocks_written += 1;
        Ok(())
    }

    fn named_node(&self, node: &NamedNode) -> String {
        match self.prefixes.shorten(node.as_str()) {
            Some((prefix, local)) => format!("{}:{}", prefix, local),
            None => format!("<{}>", node.as_str()),
        }
    }

    fn subject(&self, subject: &Subject) -> String {
        match subject {
            Subject::NamedNode(n) => self.named_node(n),
            Subject::BlankNode(b) => b.to_string(),
        }
    }

    fn predicate(&self, predicate: &NamedNode) -> String {
        if predicate.is_rdf_type() {
            "a".to_string()
        } else {
            self.named_node(predicate)
        }
    }

    fn graph_name(&self, graph: &GraphName) -> String {
        match graph {
            GraphName::NamedNode(n) => self.named_node(n),
            GraphName::BlankNode(b) => b.to_string(),
            GraphName::DefaultGraph => String::new(),
        }
    }

    fn literal(&self, literal: &Literal) -> String {
        let value = escape_literal(literal.value());
        match literal {
            Literal::LanguageTagged { language, .. } => format!("\"{}\"@{}", value, language),
            Literal::Typed { .. } if literal.is_plain() => format!("\"{}\"", value),
            Literal::Typed { datatype, .. } => {
                format!("\"{}\"^^{}", value, self.named_node(datatype))
            }
        }
    }

    fn object(&self, object: &Object) -> String {
        match object {
            Object::NamedNode(n) => self.named_node(n),
            Object::BlankNode(b) => b.to_string(),
            Object::Literal(l) => self.literal(l),
            // Turtle collection syntax is the inline form of the rdf:first/rdf:rest chain
            Object::List(items) if items.is_empty() => "()".to_string(),
            Object::List(items) => {
                let items: Vec<String> = items.iter().map(|o| self.object(o)).collect();
                format!("( {} )", items.join(" "))
            }
        }
    }
}

/// Serializes a dataset into `writer` and returns the flushed writer.
pub fn to_writer<W: Write>(dataset: &Dataset, prefixes: &Prefixes, writer: W) -> Result<W> {
    let mut serializer = TurtleSerializer::new(writer, prefixes);
    serializer.serialize_dataset(dataset)?;
    serializer.finish()
}

/// Serializes a dataset into a string.
pub fn to_string(dataset: &Dataset, prefixes: &Prefixes) -> Result<String> {
    let bytes = to_writer(dataset, prefixes, Vec::new())?;
    // the writer only ever receives UTF-8 text
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
