//! File loading with offline import redirection.
//!
//! One [`Loader`] is one loading context. TBox and ABox documents are loaded
//! through separate instances so that colliding ontology headers in the two
//! files cannot interfere before the explicit merge step.

use crate::error::ParseError;
use crate::ontology::Ontology;
use crate::parser::{OntologyParser, ParserConfig};
use oxrdf::{Graph, NamedNode, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads OWL documents from files, resolving declared imports through a
/// redirect table instead of the network.
#[derive(Debug, Default)]
pub struct Loader {
    redirects: FxHashMap<NamedNode, PathBuf>,
    parser_config: ParserConfig,
    resolved: Vec<NamedNode>,
}

impl Loader {
    /// Creates a new loading context with no registered redirects.
    pub fn new() -> Self {
        Self::with_parser_config(ParserConfig::new())
    }

    /// Creates a new loading context with a custom OWL parser configuration.
    pub fn with_parser_config(parser_config: ParserConfig) -> Self {
        Self {
            redirects: FxHashMap::default(),
            parser_config,
            resolved: Vec::new(),
        }
    }

    /// Registers offline redirects for import IRIs.
    ///
    /// Entries whose local file does not exist are skipped so that a partial
    /// import cache still serves the imports it does hold.
    pub fn register_imports<I>(&mut self, targets: I)
    where
        I: IntoIterator<Item = (NamedNode, PathBuf)>,
    {
        for (iri, path) in targets {
            if path.is_file() {
                self.redirects.insert(iri, path);
            } else {
                debug!(%iri, path = %path.display(), "skipping absent import cache file");
            }
        }
    }

    /// Returns the import IRIs resolved by loads in this context, in
    /// resolution order.
    pub fn resolved_imports(&self) -> &[NamedNode] {
        &self.resolved
    }

    /// Loads and parses one OWL document.
    ///
    /// The syntax is chosen from the file extension. Declared imports are
    /// resolved through the redirect table and parsed transitively to
    /// validate the closure; their axioms do not join the returned document.
    pub fn load(&mut self, path: &Path) -> Result<Ontology, ParseError> {
        let format = format_from_path(path)?;
        let graph = self.read_graph(path, format)?;
        let ontology = self.parse_graph(&graph, path)?;
        debug!(
            path = %path.display(),
            axioms = ontology.len(),
            imports = ontology.imports().len(),
            "loaded document"
        );

        let mut pending: Vec<NamedNode> = ontology.imports().to_vec();
        let mut visited = FxHashSet::default();
        while let Some(import) = pending.pop() {
            if !visited.insert(import.clone()) {
                continue;
            }
            let Some(target) = self.redirects.get(&import).cloned() else {
                return Err(ParseError::UnresolvedImport {
                    iri: import,
                    path: path.to_path_buf(),
                });
            };
            let format = format_from_path(&target)?;
            let graph = self.read_graph(&target, format)?;
            let imported = self.parse_graph(&graph, &target)?;
            debug!(%import, path = %target.display(), "resolved import");
            self.resolved.push(import);
            pending.extend(imported.imports().iter().cloned());
        }

        Ok(ontology)
    }

    fn read_graph(&self, path: &Path, format: RdfFormat) -> Result<Graph, ParseError> {
        let file = File::open(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parser = RdfParser::from_format(format);
        let parser = match file_base_iri(path) {
            // An unusable base only disables relative IRI resolution.
            Some(base) => match parser.with_base_iri(base.clone()) {
                Ok(parser) => parser,
                Err(error) => {
                    debug!(%base, %error, "ignoring invalid base IRI");
                    RdfParser::from_format(format)
                }
            },
            None => parser,
        };

        let mut graph = Graph::new();
        for quad in parser.for_reader(BufReader::new(file)) {
            let quad = quad.map_err(|source| ParseError::Rdf {
                path: path.to_path_buf(),
                source,
            })?;
            graph.insert(&Triple {
                subject: quad.subject,
                predicate: quad.predicate,
                object: quad.object,
            });
        }
        Ok(graph)
    }

    fn parse_graph(&self, graph: &Graph, path: &Path) -> Result<Ontology, ParseError> {
        OntologyParser::with_config(graph, self.parser_config.clone())
            .parse()
            .map_err(|source| ParseError::Owl {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Chooses the RDF syntax from the file extension. `.owl` files carry
/// RDF/XML.
fn format_from_path(path: &Path) -> Result<RdfFormat, ParseError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .ok_or_else(|| ParseError::UnsupportedExtension {
            path: path.to_path_buf(),
        })?;
    if extension.eq_ignore_ascii_case("owl") {
        return Ok(RdfFormat::RdfXml);
    }
    RdfFormat::from_extension(extension).ok_or_else(|| ParseError::UnsupportedExtension {
        path: path.to_path_buf(),
    })
}

/// Builds a `file://` base IRI for resolving relative IRIs in a document.
fn file_base_iri(path: &Path) -> Option<String> {
    let absolute = path.canonicalize().ok()?;
    let base = format!("file://{}", absolute.display());
    oxiri::Iri::parse(base.clone()).ok()?;
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_turtle_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "data.ttl",
            "@prefix ex: <http://example.org/> .\nex:Dog a <http://www.w3.org/2002/07/owl#Class> .\n",
        );

        let ontology = Loader::new().load(&path).unwrap();
        assert_eq!(ontology.len(), 1);
    }

    #[test]
    fn owl_extension_is_rdf_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "import.owl",
            r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://example.org/Dog"/>
</rdf:RDF>
"#,
        );

        let ontology = Loader::new().load(&path).unwrap();
        assert_eq!(ontology.len(), 1);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", "a,b\n");

        let error = Loader::new().load(&path).unwrap_err();
        assert!(matches!(error, ParseError::UnsupportedExtension { .. }));
    }

    #[test]
    fn declared_import_resolves_through_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = write_file(
            dir.path(),
            "upstream.ttl",
            "@prefix ex: <http://example.org/> .\nex:Animal a <http://www.w3.org/2002/07/owl#Class> .\n",
        );
        let doc = write_file(
            dir.path(),
            "doc.ttl",
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             <http://example.org/onto> a owl:Ontology ;\n\
               owl:imports <http://example.org/upstream> .\n",
        );

        let mut loader = Loader::new();
        loader.register_imports([(
            NamedNode::new_unchecked("http://example.org/upstream"),
            upstream,
        )]);
        let ontology = loader.load(&doc).unwrap();

        // Imported axioms validate the closure but stay out of the document.
        assert!(ontology.is_empty());
        assert_eq!(
            loader.resolved_imports(),
            &[NamedNode::new_unchecked("http://example.org/upstream")]
        );
    }

    #[test]
    fn unresolved_import_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_file(
            dir.path(),
            "doc.ttl",
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             <http://example.org/onto> a owl:Ontology ;\n\
               owl:imports <http://example.org/missing> .\n",
        );

        let error = Loader::new().load(&doc).unwrap_err();
        assert!(matches!(error, ParseError::UnresolvedImport { .. }));
    }

    #[test]
    fn absent_cache_files_are_skipped_at_registration() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_file(
            dir.path(),
            "doc.ttl",
            "@prefix ex: <http://example.org/> .\nex:Dog a <http://www.w3.org/2002/07/owl#Class> .\n",
        );

        let mut loader = Loader::new();
        loader.register_imports([(
            NamedNode::new_unchecked("http://example.org/unused"),
            dir.path().join("missing.owl"),
        )]);
        // The document declares no imports, so the absent cache entry is
        // irrelevant and the load succeeds.
        assert!(loader.load(&doc).is_ok());
    }
}
