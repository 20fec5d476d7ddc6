//! OWL 2 axiom types.
//!
//! Axioms are the logical statements that make up an ontology. Every variant is
//! `Eq + Hash` so that an axiom set can deduplicate by structural equality.

use crate::entity::{AnnotationProperty, DataProperty, Individual, ObjectProperty, OwlClass};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use oxrdf::{Literal, Term};

/// The kinds of entailed assertions a reasoner can be asked to generate.
///
/// These mirror the generator restriction of the materialization pipeline:
/// only instance-level assertions are ever materialized, never TBox axioms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceKind {
    /// `ClassAssertion` entailments.
    ClassAssertions,
    /// `ObjectPropertyAssertion` entailments.
    ObjectPropertyAssertions,
    /// `DataPropertyAssertion` entailments.
    DataPropertyAssertions,
}

impl InferenceKind {
    /// All supported generator kinds.
    pub const ALL: [InferenceKind; 3] = [
        InferenceKind::ClassAssertions,
        InferenceKind::ObjectPropertyAssertions,
        InferenceKind::DataPropertyAssertions,
    ];
}

/// An OWL 2 axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    // === Class axioms ===
    /// SubClassOf(sub, super)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },
    /// EquivalentClasses(C1, C2, ...)
    EquivalentClasses(Vec<ClassExpression>),
    /// DisjointClasses(C1, C2, ...)
    DisjointClasses(Vec<ClassExpression>),

    // === Object property axioms ===
    /// SubObjectPropertyOf(sub, super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },
    /// EquivalentObjectProperties(P1, P2, ...)
    EquivalentObjectProperties(Vec<ObjectProperty>),
    /// InverseObjectProperties(P1, P2)
    InverseObjectProperties(ObjectProperty, ObjectProperty),
    /// ObjectPropertyDomain(P, C)
    ObjectPropertyDomain {
        property: ObjectProperty,
        domain: ClassExpression,
    },
    /// ObjectPropertyRange(P, C)
    ObjectPropertyRange {
        property: ObjectProperty,
        range: ClassExpression,
    },
    /// FunctionalObjectProperty(P)
    FunctionalObjectProperty(ObjectProperty),
    /// InverseFunctionalObjectProperty(P)
    InverseFunctionalObjectProperty(ObjectProperty),
    /// SymmetricObjectProperty(P)
    SymmetricObjectProperty(ObjectProperty),
    /// AsymmetricObjectProperty(P)
    AsymmetricObjectProperty(ObjectProperty),
    /// TransitiveObjectProperty(P)
    TransitiveObjectProperty(ObjectProperty),
    /// ReflexiveObjectProperty(P)
    ReflexiveObjectProperty(ObjectProperty),
    /// IrreflexiveObjectProperty(P)
    IrreflexiveObjectProperty(ObjectProperty),

    // === Data property axioms ===
    /// SubDataPropertyOf(sub, super)
    SubDataPropertyOf {
        sub_property: DataProperty,
        super_property: DataProperty,
    },
    /// DataPropertyDomain(P, C)
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },
    /// DataPropertyRange(P, D)
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },
    /// FunctionalDataProperty(P)
    FunctionalDataProperty(DataProperty),

    // === Assertions ===
    /// ClassAssertion(C, a)
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    /// ObjectPropertyAssertion(P, a, b)
    ObjectPropertyAssertion {
        property: ObjectProperty,
        source: Individual,
        target: Individual,
    },
    /// NegativeObjectPropertyAssertion(P, a, b)
    NegativeObjectPropertyAssertion {
        property: ObjectProperty,
        source: Individual,
        target: Individual,
    },
    /// DataPropertyAssertion(P, a, v)
    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },
    /// SameIndividual(a1, a2)
    SameIndividual(Vec<Individual>),
    /// DifferentIndividuals(a1, a2)
    DifferentIndividuals(Vec<Individual>),

    // === Annotations ===
    /// AnnotationAssertion(P, s, v)
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: Individual,
        value: Term,
    },

    // === Declarations ===
    /// Declaration(Class(C))
    DeclareClass(OwlClass),
    /// Declaration(ObjectProperty(P))
    DeclareObjectProperty(ObjectProperty),
    /// Declaration(DataProperty(P))
    DeclareDataProperty(DataProperty),
    /// Declaration(AnnotationProperty(P))
    DeclareAnnotationProperty(AnnotationProperty),
    /// Declaration(NamedIndividual(a))
    DeclareNamedIndividual(Individual),
}

impl Axiom {
    /// Creates a SubClassOf axiom.
    pub fn subclass_of(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self::SubClassOf {
            sub_class: sub.into(),
            super_class: sup.into(),
        }
    }

    /// Creates a ClassAssertion axiom.
    pub fn class_assertion(
        class: impl Into<ClassExpression>,
        individual: impl Into<Individual>,
    ) -> Self {
        Self::ClassAssertion {
            class: class.into(),
            individual: individual.into(),
        }
    }

    /// Creates an ObjectPropertyAssertion axiom.
    pub fn object_property_assertion(
        property: impl Into<ObjectProperty>,
        source: impl Into<Individual>,
        target: impl Into<Individual>,
    ) -> Self {
        Self::ObjectPropertyAssertion {
            property: property.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Creates a DataPropertyAssertion axiom.
    pub fn data_property_assertion(
        property: impl Into<DataProperty>,
        source: impl Into<Individual>,
        target: impl Into<Literal>,
    ) -> Self {
        Self::DataPropertyAssertion {
            property: property.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns the generator kind of this axiom, if it is an instance-level
    /// assertion a reasoner may emit. TBox axioms, annotations and negative
    /// assertions return `None`.
    pub fn inference_kind(&self) -> Option<InferenceKind> {
        match self {
            Self::ClassAssertion { .. } => Some(InferenceKind::ClassAssertions),
            Self::ObjectPropertyAssertion { .. } => Some(InferenceKind::ObjectPropertyAssertions),
            Self::DataPropertyAssertion { .. } => Some(InferenceKind::DataPropertyAssertions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn class(iri: &str) -> OwlClass {
        OwlClass::new(NamedNode::new_unchecked(iri))
    }

    #[test]
    fn inference_kind_of_assertions() {
        let alice = Individual::Named(NamedNode::new_unchecked("http://example.org/alice"));
        let assertion = Axiom::class_assertion(class("http://example.org/Person"), alice.clone());
        assert_eq!(
            assertion.inference_kind(),
            Some(InferenceKind::ClassAssertions)
        );

        let knows = ObjectProperty::new(NamedNode::new_unchecked("http://example.org/knows"));
        let assertion = Axiom::object_property_assertion(knows, alice.clone(), alice.clone());
        assert_eq!(
            assertion.inference_kind(),
            Some(InferenceKind::ObjectPropertyAssertions)
        );

        let subclass = Axiom::subclass_of(
            class("http://example.org/Person"),
            class("http://example.org/Agent"),
        );
        assert_eq!(subclass.inference_kind(), None);
    }

    #[test]
    fn axioms_deduplicate_by_structure() {
        let a = Axiom::subclass_of(
            class("http://example.org/Person"),
            class("http://example.org/Agent"),
        );
        let b = Axiom::subclass_of(
            class("http://example.org/Person"),
            class("http://example.org/Agent"),
        );
        assert_eq!(a, b);

        let mut set = rustc_hash::FxHashSet::default();
        assert!(set.insert(a));
        assert!(!set.insert(b));
    }
}
