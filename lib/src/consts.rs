//! Defines constant NamedNodes for commonly used RDF terms and predicates,
//! primarily from RDF, XSD, SHACL, DCTERMS, FaBiO and FRBR vocabularies.

use crate::term::NamedNode;

// namespace bases
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const FABIO_NS: &str = "http://purl.org/spar/fabio/";
pub const FRBR_NS: &str = "http://purl.org/vocab/frbr/core#";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const SCIETY_NS: &str = "http://localhost:8080/";
pub const SH_NS: &str = "http://www.w3.org/ns/shacl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

// rdf
pub const TYPE: NamedNode =
    NamedNode::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const FIRST: NamedNode =
    NamedNode::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
pub const REST: NamedNode =
    NamedNode::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
pub const NIL: NamedNode = NamedNode::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
pub const LANG_STRING: NamedNode =
    NamedNode::new_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
// rdfs
pub const LABEL: NamedNode = NamedNode::new_static("http://www.w3.org/2000/01/rdf-schema#label");

// xsd
pub const STRING: NamedNode = NamedNode::new_static("http://www.w3.org/2001/XMLSchema#string");
pub const DATE: NamedNode = NamedNode::new_static("http://www.w3.org/2001/XMLSchema#date");
pub const ANY_URI: NamedNode = NamedNode::new_static("http://www.w3.org/2001/XMLSchema#anyURI");
pub const BOOLEAN: NamedNode = NamedNode::new_static("http://www.w3.org/2001/XMLSchema#boolean");

// shacl validation reports
pub const VALIDATION_REPORT: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#ValidationReport");
pub const CONFORMS: NamedNode = NamedNode::new_static("http://www.w3.org/ns/shacl#conforms");
pub const RESULT: NamedNode = NamedNode::new_static("http://www.w3.org/ns/shacl#result");
pub const RESULT_MESSAGE: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#resultMessage");
// shacl property paths
pub const RESULT_PATH: NamedNode = NamedNode::new_static("http://www.w3.org/ns/shacl#resultPath");
pub const ALTERNATIVE_PATH: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#alternativePath");
pub const ZERO_OR_MORE_PATH: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#zeroOrMorePath");
pub const ONE_OR_MORE_PATH: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#oneOrMorePath");
pub const ZERO_OR_ONE_PATH: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#zeroOrOnePath");
pub const INVERSE_PATH: NamedNode =
    NamedNode::new_static("http://www.w3.org/ns/shacl#inversePath");

/// Predicates through which SHACL results and property paths link to shared structure.
pub const SHACL_STRUCTURAL_PREDICATES: [NamedNode; 8] = [
    RESULT_PATH,
    FIRST,
    REST,
    ALTERNATIVE_PATH,
    ZERO_OR_MORE_PATH,
    ONE_OR_MORE_PATH,
    ZERO_OR_ONE_PATH,
    INVERSE_PATH,
];

// dcterms
pub const TITLE: NamedNode = NamedNode::new_static("http://purl.org/dc/terms/title");
pub const PUBLISHER: NamedNode = NamedNode::new_static("http://purl.org/dc/terms/publisher");
pub const DATE_PUBLISHED: NamedNode = NamedNode::new_static("http://purl.org/dc/terms/date");
pub const CREATOR: NamedNode = NamedNode::new_static("http://purl.org/dc/terms/creator");
pub const FORMAT: NamedNode = NamedNode::new_static("http://purl.org/dc/terms/format");
pub const IDENTIFIER: NamedNode = NamedNode::new_static("http://purl.org/dc/terms/identifier");
// fabio
pub const RESEARCH_PAPER: NamedNode =
    NamedNode::new_static("http://purl.org/spar/fabio/ResearchPaper");
pub const ARTICLE: NamedNode = NamedNode::new_static("http://purl.org/spar/fabio/Article");
pub const WEB_PAGE: NamedNode = NamedNode::new_static("http://purl.org/spar/fabio/WebPage");
pub const DIGITAL_MANIFESTATION: NamedNode =
    NamedNode::new_static("http://purl.org/spar/fabio/DigitalManifestation");
pub const HAS_MANIFESTATION: NamedNode =
    NamedNode::new_static("http://purl.org/spar/fabio/hasManifestation");
pub const HAS_URL: NamedNode = NamedNode::new_static("http://purl.org/spar/fabio/hasURL");
// frbr
pub const REALIZATION_OF: NamedNode =
    NamedNode::new_static("http://purl.org/vocab/frbr/core#realizationOf");
