//! End-to-end materialization: resolve inputs, load, merge, reason, compose
//! and write the four output documents.

use crate::axiom::{Axiom, InferenceKind};
use crate::entity::AnnotationProperty;
use crate::error::{MaterializeError, ReasoningError, WriteError};
use crate::loader::Loader;
use crate::ontology::{Ontology, merge};
use crate::reasoner::{Reasoner, ReasonerConfig, RuleReasoner};
use crate::serializer::OntologySerializer;
use oxrdf::vocab::rdfs;
use oxrdf::{Literal, NamedNode};
use oxrdfio::{RdfFormat, RdfSerializer};
use rustc_hash::FxHashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Identity assigned to composed documents that carry no ontology IRI of
/// their own. Stable across runs.
pub const DEFAULT_ONTOLOGY_IRI: &str = "https://sappho-digital.com/ontology/materialized";

/// Label attached to the inferred-only document.
pub const INFERRED_LABEL: &str = "Sappho Digital Graph – Inferred Triples";

/// Label attached to the asserted-and-inferred document.
pub const ASSERTED_INFERRED_LABEL: &str = "Sappho Digital Graph – Asserted and Inferred Triples";

/// Namespace bindings applied to every serialized output, identical across
/// both syntaxes.
pub const PREFIXES: [(&str, &str); 9] = [
    ("ecrm", "http://erlangen-crm.org/current/"),
    ("intro", "https://w3id.org/lso/intro/currentbeta#"),
    ("lrmoo", "http://iflastandards.info/ns/lrm/lrmoo/"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
];

const INTRO_IRI: &str = "https://w3id.org/lso/intro/currentbeta#";
const LRMOO_IRI: &str = "http://iflastandards.info/ns/lrm/lrmoo/";
const ECRM_IRI: &str = "http://erlangen-crm.org/current/";

/// Returns the first candidate that exists as a regular file.
pub fn resolve_input(label: &str, candidates: &[PathBuf]) -> Result<PathBuf, MaterializeError> {
    for candidate in candidates {
        if candidate.is_file() {
            debug!(label, path = %candidate.display(), "input resolved");
            return Ok(candidate.clone());
        }
    }
    Err(MaterializeError::InputNotFound {
        label: label.to_owned(),
        tried: candidates.to_vec(),
    })
}

/// The offline import cache: canonical vocabulary IRIs mapped to local
/// copies under `imports_dir`.
pub fn offline_import_map(imports_dir: &Path) -> Vec<(NamedNode, PathBuf)> {
    vec![
        (
            NamedNode::new_unchecked(INTRO_IRI),
            imports_dir.join("INTRO.owl"),
        ),
        (
            NamedNode::new_unchecked(LRMOO_IRI),
            imports_dir.join("LRMoo.owl"),
        ),
        (
            NamedNode::new_unchecked(ECRM_IRI),
            imports_dir.join("ECRM.owl"),
        ),
    ]
}

/// The four files a run writes.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub inferred_turtle: PathBuf,
    pub inferred_rdfxml: PathBuf,
    pub asserted_inferred_turtle: PathBuf,
    pub asserted_inferred_rdfxml: PathBuf,
}

impl OutputPaths {
    /// Derives the four paths from a directory and a file-name stem.
    pub fn for_stem(output_dir: &Path, stem: &str) -> Self {
        Self {
            inferred_turtle: output_dir.join(format!("{stem}_inferred.ttl")),
            inferred_rdfxml: output_dir.join(format!("{stem}_inferred.rdf")),
            asserted_inferred_turtle: output_dir.join(format!("{stem}_asserted-and-inferred.ttl")),
            asserted_inferred_rdfxml: output_dir.join(format!("{stem}_asserted-and-inferred.rdf")),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::for_stem(Path::new("data/rdf"), "sappho-reception")
    }
}

/// Everything a materialization run needs. `Default` mirrors the fixed
/// project layout.
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    pub tbox_candidates: Vec<PathBuf>,
    pub abox_candidates: Vec<PathBuf>,
    pub import_map: Vec<(NamedNode, PathBuf)>,
    pub outputs: OutputPaths,
    pub prefixes: Vec<(String, String)>,
    pub default_iri: NamedNode,
    pub inferred_label: String,
    pub asserted_inferred_label: String,
    pub reasoner: ReasonerConfig,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            tbox_candidates: vec![
                PathBuf::from("documentation/ontology/ontology.ttl"),
                PathBuf::from("documentation/ontology/ontology.rdf"),
            ],
            abox_candidates: vec![
                PathBuf::from("data/rdf/sappho-reception.ttl"),
                PathBuf::from("data/rdf/sappho-reception.rdf"),
            ],
            import_map: offline_import_map(Path::new("imports")),
            outputs: OutputPaths::default(),
            prefixes: PREFIXES
                .iter()
                .map(|(name, iri)| ((*name).to_owned(), (*iri).to_owned()))
                .collect(),
            default_iri: NamedNode::new_unchecked(DEFAULT_ONTOLOGY_IRI),
            inferred_label: INFERRED_LABEL.to_owned(),
            asserted_inferred_label: ASSERTED_INFERRED_LABEL.to_owned(),
            reasoner: ReasonerConfig::default(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    pub tbox_path: PathBuf,
    pub abox_path: PathBuf,
    pub tbox_axioms: usize,
    pub abox_axioms: usize,
    pub merged_axioms: usize,
    pub inferred_axioms: usize,
    pub consistent: bool,
    pub written: Vec<PathBuf>,
}

/// The two composed output documents.
#[derive(Debug)]
pub struct ComposedDocuments {
    pub inferred_only: Ontology,
    pub asserted_and_inferred: Ontology,
}

/// Asks the reasoner for new instance-level entailments. Schema entailments
/// are excluded by the generator kinds.
pub fn materialize_inferences(
    reasoner: &mut dyn Reasoner,
) -> Result<FxHashSet<Axiom>, ReasoningError> {
    reasoner.inferred_axioms(&InferenceKind::ALL)
}

/// Builds the inferred-only and asserted-and-inferred documents, assigning
/// the default identity and a descriptive label to each.
pub fn compose(
    merged: &Ontology,
    inferred: &FxHashSet<Axiom>,
    default_iri: &NamedNode,
    inferred_label: &str,
    asserted_inferred_label: &str,
) -> ComposedDocuments {
    let label_property = AnnotationProperty::new(rdfs::LABEL.into_owned());

    let mut inferred_only = Ontology::new(None);
    for axiom in inferred {
        inferred_only.insert(axiom.clone());
    }
    inferred_only.assign_iri_if_absent(default_iri);
    inferred_only.add_annotation(
        label_property.clone(),
        Literal::new_language_tagged_literal_unchecked(inferred_label, "en"),
    );

    let mut asserted_and_inferred = Ontology::new(None);
    for axiom in merged.iter() {
        asserted_and_inferred.insert(axiom.clone());
    }
    for axiom in inferred {
        asserted_and_inferred.insert(axiom.clone());
    }
    asserted_and_inferred.assign_iri_if_absent(default_iri);
    asserted_and_inferred.add_annotation(
        label_property,
        Literal::new_language_tagged_literal_unchecked(asserted_inferred_label, "en"),
    );

    ComposedDocuments {
        inferred_only,
        asserted_and_inferred,
    }
}

/// Writes one document in one syntax, creating missing parent directories.
pub fn save(
    document: &Ontology,
    format: RdfFormat,
    path: &Path,
    prefixes: &[(String, String)],
) -> Result<(), MaterializeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| WriteError {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut serializer = RdfSerializer::from_format(format);
    for (name, iri) in prefixes {
        serializer =
            serializer
                .with_prefix(name, iri)
                .map_err(|source| MaterializeError::InvalidPrefix {
                    name: name.clone(),
                    source,
                })?;
    }

    let file = File::create(path).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = serializer.for_writer(BufWriter::new(file));

    let graph = OntologySerializer::new().serialize(document);
    for triple in graph.iter() {
        writer.serialize_triple(triple).map_err(|source| WriteError {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let buffer = writer.finish().map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    close_file_writer(buffer).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn close_file_writer(writer: BufWriter<File>) -> std::io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(std::io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}

/// Runs the whole pipeline with the given options.
pub fn materialize(options: &MaterializeOptions) -> Result<RunReport, MaterializeError> {
    let tbox_path = resolve_input("TBox", &options.tbox_candidates)?;
    let abox_path = resolve_input("ABox", &options.abox_candidates)?;

    // Each document loads in its own context so imports and blank nodes
    // never leak between them.
    let started = Instant::now();
    let mut tbox_loader = Loader::new();
    tbox_loader.register_imports(options.import_map.iter().cloned());
    let tbox = tbox_loader.load(&tbox_path)?;
    info!(
        path = %tbox_path.display(),
        axioms = tbox.len(),
        elapsed = ?started.elapsed(),
        "TBox loaded"
    );

    let started = Instant::now();
    let mut abox_loader = Loader::new();
    abox_loader.register_imports(options.import_map.iter().cloned());
    let abox = abox_loader.load(&abox_path)?;
    info!(
        path = %abox_path.display(),
        axioms = abox.len(),
        elapsed = ?started.elapsed(),
        "ABox loaded"
    );

    let tbox_axioms = tbox.len();
    let abox_axioms = abox.len();
    let merged = merge([tbox, abox]);
    info!(axioms = merged.len(), "documents merged");

    let started = Instant::now();
    let mut reasoner = RuleReasoner::with_config(&merged, options.reasoner.clone());
    let consistent = reasoner.is_consistent()?;
    if !consistent {
        warn!(
            clash = reasoner.clash().unwrap_or("unknown"),
            "ontology is inconsistent; materializing anyway"
        );
    }
    reasoner.precompute(&InferenceKind::ALL)?;
    let inferred = materialize_inferences(&mut reasoner)?;
    info!(
        inferred = inferred.len(),
        elapsed = ?started.elapsed(),
        "reasoning complete"
    );
    drop(reasoner);

    let documents = compose(
        &merged,
        &inferred,
        &options.default_iri,
        &options.inferred_label,
        &options.asserted_inferred_label,
    );
    info!(
        inferred_only = documents.inferred_only.len(),
        asserted_and_inferred = documents.asserted_and_inferred.len(),
        "documents composed"
    );

    let outputs = [
        (
            &documents.asserted_and_inferred,
            RdfFormat::Turtle,
            &options.outputs.asserted_inferred_turtle,
        ),
        (
            &documents.asserted_and_inferred,
            RdfFormat::RdfXml,
            &options.outputs.asserted_inferred_rdfxml,
        ),
        (
            &documents.inferred_only,
            RdfFormat::Turtle,
            &options.outputs.inferred_turtle,
        ),
        (
            &documents.inferred_only,
            RdfFormat::RdfXml,
            &options.outputs.inferred_rdfxml,
        ),
    ];
    let mut written = Vec::with_capacity(outputs.len());
    for (document, format, path) in outputs {
        let started = Instant::now();
        save(document, format, path, &options.prefixes)?;
        info!(path = %path.display(), elapsed = ?started.elapsed(), "output written");
        written.push(path.clone());
    }

    Ok(RunReport {
        tbox_path,
        abox_path,
        tbox_axioms,
        abox_axioms,
        merged_axioms: merged.len(),
        inferred_axioms: inferred.len(),
        consistent,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Individual, OwlClass};
    use oxrdf::Term;

    #[test]
    fn resolution_skips_absent_candidates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("ontology.rdf");
        fs::write(&present, "").unwrap();

        let candidates = vec![dir.path().join("ontology.ttl"), present.clone()];
        assert_eq!(resolve_input("TBox", &candidates).unwrap(), present);
    }

    #[test]
    fn missing_input_reports_every_candidate() {
        let candidates = vec![
            PathBuf::from("nowhere/a.ttl"),
            PathBuf::from("nowhere/b.rdf"),
        ];
        let error = resolve_input("TBox", &candidates).unwrap_err();
        assert_eq!(
            error.to_string(),
            "TBox not found. Tried: nowhere/a.ttl, nowhere/b.rdf"
        );
    }

    #[test]
    fn import_map_targets_the_cache_directory() {
        let map = offline_import_map(Path::new("imports"));
        assert_eq!(map.len(), 3);
        assert!(
            map.iter()
                .any(|(iri, path)| iri.as_str() == ECRM_IRI
                    && path == &PathBuf::from("imports/ECRM.owl"))
        );
    }

    #[test]
    fn output_paths_follow_the_stem() {
        let outputs = OutputPaths::for_stem(Path::new("out"), "graph");
        assert_eq!(outputs.inferred_turtle, PathBuf::from("out/graph_inferred.ttl"));
        assert_eq!(
            outputs.asserted_inferred_rdfxml,
            PathBuf::from("out/graph_asserted-and-inferred.rdf")
        );
    }

    #[test]
    fn compose_assigns_identity_and_labels() {
        let mut merged = Ontology::new(None);
        let class = OwlClass::new(NamedNode::new_unchecked("http://example.org/Poet"));
        let alice = Individual::Named(NamedNode::new_unchecked("http://example.org/alice"));
        merged.insert(Axiom::class_assertion(class, alice.clone()));

        let mut inferred = FxHashSet::default();
        inferred.insert(Axiom::class_assertion(
            OwlClass::new(NamedNode::new_unchecked("http://example.org/Agent")),
            alice,
        ));

        let default_iri = NamedNode::new_unchecked(DEFAULT_ONTOLOGY_IRI);
        let documents = compose(
            &merged,
            &inferred,
            &default_iri,
            INFERRED_LABEL,
            ASSERTED_INFERRED_LABEL,
        );

        assert_eq!(documents.inferred_only.iri(), Some(&default_iri));
        assert_eq!(documents.asserted_and_inferred.iri(), Some(&default_iri));
        assert_eq!(documents.inferred_only.len(), 1);
        assert_eq!(documents.asserted_and_inferred.len(), 2);

        let label = &documents.inferred_only.annotations()[0];
        assert_eq!(
            label.value,
            Term::from(Literal::new_language_tagged_literal_unchecked(
                INFERRED_LABEL,
                "en"
            ))
        );
    }

    #[test]
    fn default_options_use_the_project_layout() {
        let options = MaterializeOptions::default();
        assert_eq!(
            options.tbox_candidates[0],
            PathBuf::from("documentation/ontology/ontology.ttl")
        );
        assert_eq!(options.prefixes.len(), 9);
        assert_eq!(options.default_iri.as_str(), DEFAULT_ONTOLOGY_IRI);
    }
}
