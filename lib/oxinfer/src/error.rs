//! Error types for loading, reasoning and writing.

use oxrdf::NamedNode;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// An error raised while turning an RDF graph or file into an ontology.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The RDF syntax of an input file could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Rdf {
        path: PathBuf,
        #[source]
        source: oxrdfio::RdfParseError,
    },
    /// The input file extension maps to no supported RDF format.
    #[error("unsupported file extension for {path}")]
    UnsupportedExtension { path: PathBuf },
    /// A declared import has no registered local file.
    #[error("unresolved owl:imports {iri} while loading {path}")]
    UnresolvedImport { iri: NamedNode, path: PathBuf },
    /// The RDF graph could not be interpreted as OWL.
    #[error("invalid OWL in {path}: {source}")]
    Owl {
        path: PathBuf,
        #[source]
        source: OntologyParseError,
    },
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An error raised while interpreting an RDF graph as an OWL ontology.
#[derive(Debug, thiserror::Error)]
pub enum OntologyParseError {
    /// An RDF collection is malformed or exceeds the configured bound.
    #[error("invalid rdf:List starting at {node}: {reason}")]
    InvalidList { node: String, reason: String },
    /// An owl:Restriction node is missing a required property.
    #[error("invalid owl:Restriction at {node}: {reason}")]
    InvalidRestriction { node: String, reason: String },
    /// A cardinality value is not a non-negative integer.
    #[error("invalid cardinality value {value:?} at {node}")]
    InvalidCardinality { node: String, value: String },
    /// An owl:NegativePropertyAssertion reification is incomplete.
    #[error("invalid owl:NegativePropertyAssertion at {node}: {reason}")]
    InvalidNegativeAssertion { node: String, reason: String },
    /// A term appears in a position its kind does not allow.
    #[error("unexpected {found} as {position}")]
    UnexpectedTerm { position: String, found: String },
}

/// An error raised by a reasoner while classifying or materializing.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    /// The fixpoint computation did not converge within the iteration bound.
    #[error("reasoning did not converge within {0} iterations")]
    IterationLimit(usize),
    /// The configured wall-clock budget was exhausted.
    #[error("reasoning timed out after {0:?}")]
    Timeout(Duration),
}

/// An error raised while serializing an ontology document to a file.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// A top-level error of the materialization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    /// No candidate path for a required input exists.
    #[error("{label} not found. Tried: {}", format_tried(tried))]
    InputNotFound { label: String, tried: Vec<PathBuf> },
    /// A prefix registered for output serialization is not a valid IRI.
    #[error("invalid prefix {name}: {source}")]
    InvalidPrefix {
        name: String,
        #[source]
        source: oxiri::IriParseError,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Reasoning(#[from] ReasoningError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

fn format_tried(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_lists_all_candidates() {
        let error = MaterializeError::InputNotFound {
            label: "TBox".into(),
            tried: vec![
                PathBuf::from("documentation/ontology/ontology.ttl"),
                PathBuf::from("documentation/ontology/ontology.rdf"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "TBox not found. Tried: documentation/ontology/ontology.ttl, documentation/ontology/ontology.rdf"
        );
    }

    #[test]
    fn iteration_limit_names_the_bound() {
        let error = ReasoningError::IterationLimit(100_000);
        assert!(error.to_string().contains("100000 iterations"));
    }
}
