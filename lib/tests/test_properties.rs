//! Property-based tests for the term order, dataset algebra, blank node splitting and the
//! serializer.

use std::cmp::Ordering;

use proptest::collection::vec;
use proptest::prelude::*;
use reviewgraph::canonical::to_canonical_string;
use reviewgraph::consts::{FIRST, RESULT_PATH, REST, TYPE};
use reviewgraph::serializer::to_string;
use reviewgraph::split::shared_blank_nodes;
use reviewgraph::util::read_str;
use reviewgraph::{
    split_shared_blank_nodes, BlankNode, Dataset, GraphName, Literal, NamedNode, Object,
    Prefixes, Quad, StructuralPredicates, Subject,
};

use oxigraph::io::RdfFormat;

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

fn ex(local: &str) -> NamedNode {
    NamedNode::new(format!("http://example.org/{}", local))
}

fn named_node() -> impl Strategy<Value = NamedNode> {
    prop_oneof![Just(TYPE), "[a-c]".prop_map(|l| ex(&l))]
}

fn blank_node() -> impl Strategy<Value = BlankNode> {
    "[x-z]".prop_map(BlankNode::new)
}

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        "[ab]{0,2}".prop_map(Literal::string),
        ("[ab]", "(en|de)").prop_map(|(v, l)| Literal::language_tagged(v, l)),
        "[0-9]{1,2}".prop_map(|v| Literal::typed(v, NamedNode::new(XSD_INTEGER))),
    ]
}

fn subject() -> impl Strategy<Value = Subject> {
    prop_oneof![
        named_node().prop_map(Subject::from),
        blank_node().prop_map(Subject::from),
    ]
}

fn object() -> impl Strategy<Value = Object> {
    prop_oneof![
        named_node().prop_map(Object::from),
        blank_node().prop_map(Object::from),
        literal().prop_map(Object::from),
        vec(literal().prop_map(Object::from), 0..3).prop_map(Object::List),
    ]
}

fn graph_name() -> impl Strategy<Value = GraphName> {
    prop_oneof![
        3 => Just(GraphName::DefaultGraph),
        1 => "[gh]".prop_map(|l| GraphName::from(ex(&l))),
    ]
}

fn quad() -> impl Strategy<Value = Quad> {
    (subject(), named_node(), object(), graph_name()).prop_map(|(s, p, o, g)| Quad {
        subject: s,
        predicate: p,
        object: o,
        graph_name: g,
    })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    vec(quad(), 0..8).prop_map(Dataset::from_quads)
}

/// Acyclic structure: blank node `i` only links to blank nodes with a larger index, and
/// named resources may link to any of them.
fn structural_dataset() -> impl Strategy<Value = Dataset> {
    let predicates = [RESULT_PATH, FIRST, REST, ex("other")];
    vec((0usize..4, 0usize..4, 0usize..4, any::<bool>()), 0..10).prop_map(move |edges| {
        edges
            .into_iter()
            .map(|(from, to, p, leaf)| {
                let subject: Subject = if from < to {
                    BlankNode::new(format!("n{}", from)).into()
                } else {
                    ex(&format!("r{}", from)).into()
                };
                let object: Object = if leaf {
                    Literal::string(format!("v{}", to)).into()
                } else {
                    BlankNode::new(format!("n{}", to)).into()
                };
                Quad::triple(subject, predicates[p].clone(), object)
            })
            .collect()
    })
}

proptest! {
    /// Equality is reflexive and symmetric, and agrees with the order.
    #[test]
    fn prop_equality_matches_order(a in quad(), b in quad()) {
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }

    /// Exactly one of a < b, a = b, a > b holds, and the order is antisymmetric.
    #[test]
    fn prop_order_is_total(a in object(), b in object()) {
        let ab = a.cmp(&b);
        prop_assert_eq!(ab, b.cmp(&a).reverse());
        let holds = [a < b, a == b, a > b].iter().filter(|x| **x).count();
        prop_assert_eq!(holds, 1);
    }

    /// The order is transitive.
    #[test]
    fn prop_order_is_transitive(a in quad(), b in quad(), c in quad()) {
        let mut sorted = [a, b, c];
        sorted.sort();
        prop_assert!(sorted[0] <= sorted[1] && sorted[1] <= sorted[2]);
        prop_assert!(sorted[0] <= sorted[2]);
    }

    /// rdf:type sorts before any other predicate of the same subject.
    #[test]
    fn prop_type_predicate_first(s in subject(), p in named_node(), o in object(), t in object()) {
        let typed = Quad::triple(s.clone(), TYPE, t);
        let other = Quad::triple(s, p.clone(), o);
        if !p.is_rdf_type() {
            prop_assert!(typed < other);
        }
    }

    #[test]
    fn prop_union_is_idempotent(g in dataset()) {
        prop_assert_eq!(g.union(&g), g);
    }

    #[test]
    fn prop_union_is_commutative(a in dataset(), b in dataset()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn prop_union_is_associative(a in dataset(), b in dataset(), c in dataset()) {
        prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
    }

    #[test]
    fn prop_concat_all_is_folded_union(a in dataset(), b in dataset(), c in dataset()) {
        let folded = Dataset::empty().union(&a).union(&b).union(&c);
        prop_assert_eq!(Dataset::concat_all(vec![a, b, c]), folded);
    }

    #[test]
    fn prop_insert_is_idempotent(g in dataset(), q in quad()) {
        let once = g.clone().with(q.clone());
        let twice = g.with(q.clone()).with(q);
        prop_assert_eq!(once, twice);
    }

    /// Iteration order does not depend on insertion order.
    #[test]
    fn prop_sorted_sequence_is_reproducible(quads in vec(quad(), 0..8)) {
        let forward = Dataset::from_quads(quads.clone());
        let backward = Dataset::from_quads(quads.into_iter().rev());
        prop_assert_eq!(forward.to_sorted_vec(), backward.to_sorted_vec());
    }

    /// After splitting no blank node is shared, and splitting again changes nothing.
    #[test]
    fn prop_split_reaches_fixpoint(mut g in structural_dataset()) {
        let predicates = StructuralPredicates::shacl();
        split_shared_blank_nodes(&mut g, &predicates).unwrap();
        prop_assert!(shared_blank_nodes(&g, &predicates).is_empty());

        let once = g.clone();
        let again = split_shared_blank_nodes(&mut g, &predicates).unwrap();
        prop_assert_eq!(again.split_edges, 0);
        prop_assert_eq!(g, once);
    }

    /// The serializer writes one block per (graph, subject) group.
    #[test]
    fn prop_one_block_per_subject(g in dataset()) {
        let prefixes = Prefixes::new().with("ex", "http://example.org/");
        let text = to_string(&g, &prefixes).unwrap();
        let blocks = text
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with(' ') && !l.starts_with("@prefix"))
            .filter(|l| *l != "}" && !l.ends_with(" {"))
            .count();
        prop_assert_eq!(blocks, g.subject_groups());
    }

    /// Parsing the canonical form back and canonicalizing again is byte-identical.
    #[test]
    fn prop_canonical_form_round_trips(g in dataset()) {
        let canonical = to_canonical_string(&g).unwrap();
        let parsed = read_str(&canonical, RdfFormat::TriG).unwrap();
        prop_assert_eq!(to_canonical_string(&parsed).unwrap(), canonical);
    }
}
