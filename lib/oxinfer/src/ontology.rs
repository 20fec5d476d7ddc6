//! Ontology documents: a deduplicated axiom set with an optional identity.

use crate::axiom::Axiom;
use crate::entity::{AnnotationProperty, DataProperty, ObjectProperty};
use oxrdf::{NamedNode, Term};
use rustc_hash::FxHashSet;
use std::fmt;

/// An ontology annotation (e.g. an rdfs:label on the ontology header).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// The annotation property.
    pub property: AnnotationProperty,
    /// The annotation value.
    pub value: Term,
}

/// An OWL 2 ontology document.
///
/// Holds a deduplicated set of axioms together with the document's identity
/// (ontology IRI and version IRI), its declared imports and its ontology-level
/// annotations. Two structurally equal axioms cannot coexist in one document.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    iri: Option<NamedNode>,
    version_iri: Option<NamedNode>,
    imports: Vec<NamedNode>,
    annotations: Vec<Annotation>,
    axioms: FxHashSet<Axiom>,
    data_properties: FxHashSet<DataProperty>,
    annotation_properties: FxHashSet<AnnotationProperty>,
    object_properties: FxHashSet<ObjectProperty>,
}

impl Ontology {
    /// Creates a new empty ontology.
    pub fn new(iri: Option<NamedNode>) -> Self {
        Self {
            iri,
            ..Self::default()
        }
    }

    /// Creates a new empty ontology with the given IRI string.
    pub fn with_iri(iri: impl AsRef<str>) -> Result<Self, oxiri::IriParseError> {
        Ok(Self::new(Some(NamedNode::new(iri.as_ref())?)))
    }

    /// Returns the ontology IRI.
    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    /// Sets the ontology IRI.
    pub fn set_iri(&mut self, iri: Option<NamedNode>) {
        self.iri = iri;
    }

    /// Assigns the given IRI only if the document has none yet.
    ///
    /// Returns `true` if the IRI was assigned. Identity is assigned at most
    /// once per document; an existing IRI is never overwritten.
    pub fn assign_iri_if_absent(&mut self, iri: &NamedNode) -> bool {
        if self.iri.is_some() {
            return false;
        }
        self.iri = Some(iri.clone());
        true
    }

    /// Returns the version IRI.
    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.version_iri.as_ref()
    }

    /// Sets the version IRI.
    pub fn set_version_iri(&mut self, iri: Option<NamedNode>) {
        self.version_iri = iri;
    }

    /// Returns the declared import IRIs.
    pub fn imports(&self) -> &[NamedNode] {
        &self.imports
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, iri: NamedNode) {
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    /// Returns the ontology-level annotations.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Adds an ontology-level annotation.
    pub fn add_annotation(&mut self, property: AnnotationProperty, value: impl Into<Term>) {
        let annotation = Annotation {
            property,
            value: value.into(),
        };
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    /// Inserts an axiom. Returns `true` if it was not already present.
    pub fn insert(&mut self, axiom: Axiom) -> bool {
        match &axiom {
            Axiom::DeclareObjectProperty(p) => {
                self.object_properties.insert(p.clone());
            }
            Axiom::DeclareDataProperty(p) => {
                self.data_properties.insert(p.clone());
            }
            Axiom::DeclareAnnotationProperty(p) => {
                self.annotation_properties.insert(p.clone());
            }
            _ => {}
        }
        self.axioms.insert(axiom)
    }

    /// Checks whether the given axiom is asserted in this document.
    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    /// Returns the axioms of this document.
    pub fn axioms(&self) -> &FxHashSet<Axiom> {
        &self.axioms
    }

    /// Returns an iterator over the axioms.
    pub fn iter(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    /// Returns the number of axioms.
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    /// Returns `true` if the document contains no axioms.
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Checks whether a property was declared as a data property.
    pub fn is_data_property(&self, property: &DataProperty) -> bool {
        self.data_properties.contains(property)
    }

    /// Checks whether a property was declared as an annotation property.
    pub fn is_annotation_property(&self, property: &AnnotationProperty) -> bool {
        self.annotation_properties.contains(property)
    }

    /// Checks whether a property was declared as an object property.
    pub fn is_object_property(&self, property: &ObjectProperty) -> bool {
        self.object_properties.contains(property)
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.iri {
            Some(iri) => write!(f, "Ontology({iri})")?,
            None => write!(f, "Ontology(anonymous)")?,
        }
        write!(f, " [{} axioms]", self.axioms.len())
    }
}

/// Unions the axioms of all input documents into a fresh anonymous document.
///
/// The result carries no identity, imports or annotations: callers set those
/// explicitly if needed. The union is commutative and associative, and the
/// result's axiom count is at most the sum of the inputs' counts, with
/// equality exactly when the inputs are pairwise disjoint.
pub fn merge<I>(documents: I) -> Ontology
where
    I: IntoIterator<Item = Ontology>,
{
    let mut result = Ontology::new(None);
    for document in documents {
        for axiom in document.axioms {
            result.insert(axiom);
        }
    }
    result
}
