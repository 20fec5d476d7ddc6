//! End-to-end pipeline runs against real files in temporary directories.

use oxinfer::pipeline::{self, MaterializeOptions, OutputPaths};
use oxinfer::{Axiom, Individual, Loader, MaterializeError, OwlClass, ParseError};
use oxrdf::NamedNode;
use std::fs;
use std::path::Path;

const TBOX: &str = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/> .

<http://example.org/tbox> a owl:Ontology .
ex:Person a owl:Class ; rdfs:subClassOf ex:Agent .
ex:Agent a owl:Class .
"#;

const ABOX: &str = r#"
@prefix ex: <http://example.org/> .

ex:alice a ex:Person .
"#;

fn class_assertion(class: &str, individual: &str) -> Axiom {
    Axiom::class_assertion(
        OwlClass::new(NamedNode::new_unchecked(format!("http://example.org/{class}"))),
        Individual::Named(NamedNode::new_unchecked(format!(
            "http://example.org/{individual}"
        ))),
    )
}

fn options_for(dir: &Path) -> MaterializeOptions {
    MaterializeOptions {
        tbox_candidates: vec![dir.join("tbox.ttl")],
        abox_candidates: vec![dir.join("abox.ttl")],
        import_map: pipeline::offline_import_map(&dir.join("imports")),
        outputs: OutputPaths::for_stem(&dir.join("out"), "graph"),
        ..MaterializeOptions::default()
    }
}

#[test]
fn full_run_writes_four_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tbox.ttl"), TBOX).unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();

    let options = options_for(dir.path());
    let report = pipeline::materialize(&options).unwrap();

    assert!(report.consistent);
    assert_eq!(report.written.len(), 4);
    for path in &report.written {
        assert!(path.is_file(), "missing output {}", path.display());
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
    assert!(report.inferred_axioms >= 1);
}

#[test]
fn inferred_document_contains_only_new_entailments() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tbox.ttl"), TBOX).unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();

    let options = options_for(dir.path());
    pipeline::materialize(&options).unwrap();

    let inferred = Loader::new()
        .load(&options.outputs.inferred_turtle)
        .unwrap();
    assert_eq!(
        inferred.iri().map(NamedNode::as_str),
        Some(pipeline::DEFAULT_ONTOLOGY_IRI)
    );
    assert!(inferred.contains(&class_assertion("Agent", "alice")));
    // The asserted type stays out of the inferred-only document.
    assert!(!inferred.contains(&class_assertion("Person", "alice")));
    // No schema axioms are materialized.
    assert!(
        inferred
            .iter()
            .all(|axiom| axiom.inference_kind().is_some())
    );
}

#[test]
fn asserted_and_inferred_document_is_a_superset() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tbox.ttl"), TBOX).unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();

    let options = options_for(dir.path());
    pipeline::materialize(&options).unwrap();

    let combined = Loader::new()
        .load(&options.outputs.asserted_inferred_turtle)
        .unwrap();
    assert!(combined.contains(&class_assertion("Person", "alice")));
    assert!(combined.contains(&class_assertion("Agent", "alice")));
}

#[test]
fn missing_tbox_lists_all_candidates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();

    let options = options_for(dir.path());
    let error = pipeline::materialize(&options).unwrap_err();
    assert!(matches!(error, MaterializeError::InputNotFound { .. }));
    let message = error.to_string();
    assert!(message.starts_with("TBox not found. Tried: "));
    assert!(message.contains("tbox.ttl"));
}

#[test]
fn inconsistent_ontology_still_materializes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tbox.ttl"),
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/> .

ex:Person a owl:Class ; owl:disjointWith ex:Place .
ex:Place a owl:Class .
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("abox.ttl"),
        r#"
@prefix ex: <http://example.org/> .

ex:lesbos a ex:Person, ex:Place .
"#,
    )
    .unwrap();

    let options = options_for(dir.path());
    let report = pipeline::materialize(&options).unwrap();
    assert!(!report.consistent);
    assert_eq!(report.written.len(), 4);
    for path in &report.written {
        assert!(path.is_file());
    }
}

#[test]
fn absent_import_cache_is_tolerated_when_unused() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tbox.ttl"), TBOX).unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();
    // No imports/ directory exists; nothing declares an import either.

    let report = pipeline::materialize(&options_for(dir.path())).unwrap();
    assert!(report.consistent);
}

#[test]
fn declared_import_resolves_from_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("imports")).unwrap();
    fs::write(
        dir.path().join("imports").join("ECRM.owl"),
        r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Ontology rdf:about="http://erlangen-crm.org/current/"/>
</rdf:RDF>
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("tbox.ttl"),
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/> .

<http://example.org/tbox> a owl:Ontology ;
    owl:imports <http://erlangen-crm.org/current/> .
ex:Person a owl:Class ; rdfs:subClassOf ex:Agent .
"#,
    )
    .unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();

    let report = pipeline::materialize(&options_for(dir.path())).unwrap();
    assert!(report.consistent);
}

#[test]
fn declared_import_without_cache_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tbox.ttl"),
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/> .

<http://example.org/tbox> a owl:Ontology ;
    owl:imports <http://erlangen-crm.org/current/> .
ex:Person a owl:Class .
"#,
    )
    .unwrap();
    fs::write(dir.path().join("abox.ttl"), ABOX).unwrap();

    let error = pipeline::materialize(&options_for(dir.path())).unwrap_err();
    assert!(matches!(
        error,
        MaterializeError::Parse(ParseError::UnresolvedImport { .. })
    ));
    assert!(error.to_string().contains("http://erlangen-crm.org/current/"));
}
