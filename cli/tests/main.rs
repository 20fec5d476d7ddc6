//! Integration tests for the oxinfer binary.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

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

fn oxinfer() -> Command {
    Command::cargo_bin("oxinfer").unwrap()
}

#[test]
fn run_writes_four_files_and_a_manifest() {
    let dir = TempDir::new().unwrap();
    dir.child("tbox.ttl").write_str(TBOX).unwrap();
    dir.child("abox.ttl").write_str(ABOX).unwrap();

    oxinfer()
        .current_dir(dir.path())
        .args([
            "--tbox",
            "tbox.ttl",
            "--abox",
            "abox.ttl",
            "--output-dir",
            "out",
            "--output-stem",
            "graph",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Wrote:")
                .and(predicate::str::contains("graph_inferred.ttl"))
                .and(predicate::str::contains("graph_inferred.rdf"))
                .and(predicate::str::contains("graph_asserted-and-inferred.ttl"))
                .and(predicate::str::contains("graph_asserted-and-inferred.rdf")),
        );

    dir.child("out/graph_inferred.ttl")
        .assert(predicate::path::is_file());
    dir.child("out/graph_asserted-and-inferred.rdf")
        .assert(predicate::path::is_file());
}

#[test]
fn missing_tbox_aborts_with_the_tried_paths() {
    let dir = TempDir::new().unwrap();
    dir.child("abox.ttl").write_str(ABOX).unwrap();

    oxinfer()
        .current_dir(dir.path())
        .args(["--tbox", "nowhere.ttl", "--abox", "abox.ttl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TBox not found. Tried: nowhere.ttl"));
}

#[test]
fn default_candidate_paths_follow_the_project_layout() {
    let dir = TempDir::new().unwrap();

    oxinfer()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("documentation/ontology/ontology.ttl")
                .and(predicate::str::contains("documentation/ontology/ontology.rdf")),
        );
}

#[test]
fn help_names_the_flags() {
    oxinfer()
        .arg("--help")
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--tbox")
                .and(predicate::str::contains("--imports-dir"))
                .and(predicate::str::contains("--output-stem")),
        );
}
