//! OWL 2 ontology loading, rule-based reasoning and materialization.
//!
//! This crate loads TBox and ABox documents from RDF files, merges them,
//! computes instance-level entailments with a forward-chaining OWL 2 RL
//! style backend and writes inferred-only and asserted-and-inferred
//! documents in Turtle and RDF/XML.
//!
//! # Example
//! ```
//! use oxinfer::{Axiom, Ontology};
//! use oxrdf::NamedNode;
//!
//! let mut ontology = Ontology::new(Some(
//!     NamedNode::new("http://example.org/animals").unwrap()
//! ));
//!
//! // Ontologies can be built programmatically or parsed from RDF
//! ```

mod axiom;
mod entity;
mod error;
mod expression;
mod loader;
mod ontology;
mod parser;
pub mod pipeline;
mod reasoner;
mod serializer;
pub mod vocab;

pub use axiom::{Axiom, InferenceKind};
pub use entity::{AnnotationProperty, DataProperty, Individual, ObjectProperty, OwlClass};
pub use error::{
    MaterializeError, OntologyParseError, ParseError, ReasoningError, WriteError,
};
pub use expression::{ClassExpression, DataRange, ObjectPropertyExpression};
pub use loader::Loader;
pub use ontology::{Annotation, Ontology, merge};
pub use parser::{OntologyParser, ParserConfig, parse_ontology, parse_ontology_with_config};
pub use pipeline::{MaterializeOptions, OutputPaths, RunReport, materialize};
pub use reasoner::{Reasoner, ReasonerConfig, RuleReasoner};
pub use serializer::{OntologySerializer, SerializerConfig, serialize_ontology};
