//! Documents written in either syntax load back with the same axioms.

use oxinfer::pipeline::{PREFIXES, save};
use oxinfer::{
    Axiom, ClassExpression, DataProperty, Individual, Loader, ObjectProperty, Ontology, OwlClass,
};
use oxrdf::{Literal, NamedNode};
use oxrdfio::RdfFormat;

fn named(suffix: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.org/{suffix}"))
}

fn class(suffix: &str) -> OwlClass {
    OwlClass::new(named(suffix))
}

fn object_property(suffix: &str) -> ObjectProperty {
    ObjectProperty::new(named(suffix))
}

fn individual(suffix: &str) -> Individual {
    Individual::Named(named(suffix))
}

/// An ontology exercising schema axioms, restrictions, characteristics and
/// instance-level assertions.
fn sample_ontology() -> Ontology {
    let mut ontology = Ontology::new(Some(named("roundtrip")));

    ontology.insert(Axiom::DeclareClass(class("Person")));
    ontology.insert(Axiom::DeclareClass(class("Agent")));
    ontology.insert(Axiom::DeclareClass(class("Dog")));
    ontology.insert(Axiom::DeclareClass(class("DogOwner")));
    ontology.insert(Axiom::DeclareObjectProperty(object_property("hasPet")));
    ontology.insert(Axiom::DeclareObjectProperty(object_property("ownedBy")));
    ontology.insert(Axiom::DeclareDataProperty(DataProperty::new(named("age"))));

    ontology.insert(Axiom::subclass_of(class("Person"), class("Agent")));
    ontology.insert(Axiom::subclass_of(
        ClassExpression::some_values_from(
            object_property("hasPet"),
            ClassExpression::class(class("Dog")),
        ),
        class("DogOwner"),
    ));
    ontology.insert(Axiom::EquivalentClasses(vec![
        ClassExpression::class(class("Person")),
        ClassExpression::class(class("Human")),
    ]));
    ontology.insert(Axiom::DisjointClasses(vec![
        ClassExpression::class(class("Person")),
        ClassExpression::class(class("Dog")),
    ]));
    ontology.insert(Axiom::ObjectPropertyDomain {
        property: object_property("hasPet"),
        domain: ClassExpression::class(class("Person")),
    });
    ontology.insert(Axiom::ObjectPropertyRange {
        property: object_property("hasPet"),
        range: ClassExpression::class(class("Dog")),
    });
    ontology.insert(Axiom::InverseObjectProperties(
        object_property("hasPet"),
        object_property("ownedBy"),
    ));
    ontology.insert(Axiom::FunctionalObjectProperty(object_property("ownedBy")));

    ontology.insert(Axiom::class_assertion(class("Person"), individual("alice")));
    ontology.insert(Axiom::object_property_assertion(
        object_property("hasPet"),
        individual("alice"),
        individual("fido"),
    ));
    ontology.insert(Axiom::data_property_assertion(
        DataProperty::new(named("age")),
        individual("alice"),
        Literal::from(30),
    ));
    ontology.insert(Axiom::NegativeObjectPropertyAssertion {
        property: object_property("hasPet"),
        source: individual("bob"),
        target: individual("fido"),
    });
    ontology.insert(Axiom::SameIndividual(vec![
        individual("alice"),
        individual("alicia"),
    ]));

    ontology
}

fn assert_roundtrip(format: RdfFormat, file_name: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name);
    let original = sample_ontology();

    let prefixes: Vec<(String, String)> = PREFIXES
        .iter()
        .map(|(name, iri)| ((*name).to_owned(), (*iri).to_owned()))
        .collect();
    save(&original, format, &path, &prefixes).unwrap();

    let loaded = Loader::new().load(&path).unwrap();
    assert_eq!(loaded.iri(), original.iri());
    for axiom in original.iter() {
        assert!(
            loaded.contains(axiom),
            "{format:?} roundtrip lost {axiom:?}"
        );
    }
    for axiom in loaded.iter() {
        assert!(
            original.contains(axiom),
            "{format:?} roundtrip invented {axiom:?}"
        );
    }
}

#[test]
fn turtle_roundtrip_preserves_axioms() {
    assert_roundtrip(RdfFormat::Turtle, "roundtrip.ttl");
}

#[test]
fn rdfxml_roundtrip_preserves_axioms() {
    assert_roundtrip(RdfFormat::RdfXml, "roundtrip.rdf");
}

#[test]
fn owl_extension_loads_as_rdfxml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.owl");
    let original = sample_ontology();
    save(&original, RdfFormat::RdfXml, &path, &[]).unwrap();

    let loaded = Loader::new().load(&path).unwrap();
    assert_eq!(loaded.iri(), original.iri());
    assert_eq!(loaded.len(), original.len());
}
