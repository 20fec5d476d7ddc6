#![allow(clippy::print_stdout)]

use clap::Parser;
use oxinfer::ReasonerConfig;
use oxinfer::pipeline::{self, MaterializeOptions, OutputPaths};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Materializes OWL entailments of an ontology and its instance data.
///
/// Loads a schema document (TBox) and an instance-data document (ABox),
/// merges them, computes instance-level entailments with a rule reasoner and
/// writes inferred-only and asserted-and-inferred documents, each in Turtle
/// and RDF/XML.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Candidate path of the schema document. May be repeated; the first
    /// existing file wins.
    #[arg(long)]
    tbox: Vec<PathBuf>,
    /// Candidate path of the instance-data document. May be repeated; the
    /// first existing file wins.
    #[arg(long)]
    abox: Vec<PathBuf>,
    /// Directory holding the offline import cache files.
    #[arg(long, default_value = "imports")]
    imports_dir: PathBuf,
    /// Directory receiving the four output files.
    #[arg(long, default_value = "data/rdf")]
    output_dir: PathBuf,
    /// File-name stem of the output files.
    #[arg(long, default_value = "sappho-reception")]
    output_stem: String,
    /// Upper bound on reasoner fixpoint iterations.
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Wall-clock budget for reasoning, in seconds.
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut options = MaterializeOptions {
        import_map: pipeline::offline_import_map(&args.imports_dir),
        outputs: OutputPaths::for_stem(&args.output_dir, &args.output_stem),
        ..MaterializeOptions::default()
    };
    if !args.tbox.is_empty() {
        options.tbox_candidates = args.tbox;
    }
    if !args.abox.is_empty() {
        options.abox_candidates = args.abox;
    }
    let mut reasoner = ReasonerConfig::default();
    if let Some(max_iterations) = args.max_iterations {
        reasoner.max_iterations = max_iterations;
    }
    reasoner.timeout = args.timeout.map(Duration::from_secs);
    options.reasoner = reasoner;

    let report = pipeline::materialize(&options)?;
    tracing::info!(
        merged = report.merged_axioms,
        inferred = report.inferred_axioms,
        consistent = report.consistent,
        "materialization finished"
    );
    println!("Wrote:");
    for path in &report.written {
        println!("- {}", path.display());
    }
    Ok(())
}
