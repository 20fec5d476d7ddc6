//! OWL 2 encoding into RDF graphs.
//!
//! The inverse of the parser: maps the structural axiom model back onto the
//! RDF encoding of OWL. Anonymous class expressions become typed blank nodes,
//! n-ary axioms become chains of pairwise triples and collections become
//! rdf:Lists.

use crate::axiom::Axiom;
use crate::entity::Individual;
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::ontology::Ontology;
use crate::vocab;
use oxrdf::{
    BlankNode, Graph, Literal, Subject, Term, Triple,
    vocab::{rdf, rdfs, xsd},
};

/// Serializer configuration.
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Whether entity declaration axioms are written as rdf:type triples.
    pub include_declarations: bool,
}

impl SerializerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            include_declarations: true,
        }
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes an OWL ontology to RDF triples.
pub struct OntologySerializer {
    config: SerializerConfig,
    blank_node_counter: u64,
}

impl OntologySerializer {
    /// Creates a new serializer with default configuration.
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::new())
    }

    /// Creates a new serializer with custom configuration.
    pub fn with_config(config: SerializerConfig) -> Self {
        Self {
            config,
            blank_node_counter: 0,
        }
    }

    /// Serializes an ontology to an RDF graph.
    pub fn serialize(&mut self, ontology: &Ontology) -> Graph {
        let mut graph = Graph::new();

        if let Some(iri) = ontology.iri() {
            graph.insert(&Triple {
                subject: iri.clone().into(),
                predicate: rdf::TYPE.into_owned(),
                object: vocab::ONTOLOGY.into_owned().into(),
            });
            if let Some(version_iri) = ontology.version_iri() {
                graph.insert(&Triple {
                    subject: iri.clone().into(),
                    predicate: vocab::VERSION_IRI.into_owned(),
                    object: version_iri.clone().into(),
                });
            }
            for import in ontology.imports() {
                graph.insert(&Triple {
                    subject: iri.clone().into(),
                    predicate: vocab::IMPORTS.into_owned(),
                    object: import.clone().into(),
                });
            }
            for annotation in ontology.annotations() {
                graph.insert(&Triple {
                    subject: iri.clone().into(),
                    predicate: annotation.property.iri().clone(),
                    object: annotation.value.clone(),
                });
            }
        }

        for axiom in ontology.iter() {
            self.serialize_axiom(axiom, &mut graph);
        }

        graph
    }

    fn serialize_axiom(&mut self, axiom: &Axiom, graph: &mut Graph) {
        match axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                let sub = self.serialize_class_expression(sub_class, graph);
                let sup = self.serialize_class_expression(super_class, graph);
                graph.insert(&Triple {
                    subject: sub,
                    predicate: rdfs::SUB_CLASS_OF.into_owned(),
                    object: sup.into(),
                });
            }

            Axiom::EquivalentClasses(classes) => {
                for window in classes.windows(2) {
                    let first = self.serialize_class_expression(&window[0], graph);
                    let second = self.serialize_class_expression(&window[1], graph);
                    graph.insert(&Triple {
                        subject: first,
                        predicate: vocab::EQUIVALENT_CLASS.into_owned(),
                        object: second.into(),
                    });
                }
            }

            Axiom::DisjointClasses(classes) => {
                for window in classes.windows(2) {
                    let first = self.serialize_class_expression(&window[0], graph);
                    let second = self.serialize_class_expression(&window[1], graph);
                    graph.insert(&Triple {
                        subject: first,
                        predicate: vocab::DISJOINT_WITH.into_owned(),
                        object: second.into(),
                    });
                }
            }

            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                let sub = self.serialize_object_property_expression(sub_property, graph);
                let sup = self.serialize_object_property_expression(super_property, graph);
                graph.insert(&Triple {
                    subject: sub,
                    predicate: rdfs::SUB_PROPERTY_OF.into_owned(),
                    object: sup.into(),
                });
            }

            Axiom::EquivalentObjectProperties(properties) => {
                for window in properties.windows(2) {
                    graph.insert(&Triple {
                        subject: window[0].iri().clone().into(),
                        predicate: vocab::EQUIVALENT_PROPERTY.into_owned(),
                        object: window[1].iri().clone().into(),
                    });
                }
            }

            Axiom::InverseObjectProperties(first, second) => {
                graph.insert(&Triple {
                    subject: first.iri().clone().into(),
                    predicate: vocab::INVERSE_OF.into_owned(),
                    object: second.iri().clone().into(),
                });
            }

            Axiom::ObjectPropertyDomain { property, domain } => {
                let domain = self.serialize_class_expression(domain, graph);
                graph.insert(&Triple {
                    subject: property.iri().clone().into(),
                    predicate: rdfs::DOMAIN.into_owned(),
                    object: domain.into(),
                });
            }

            Axiom::ObjectPropertyRange { property, range } => {
                let range = self.serialize_class_expression(range, graph);
                graph.insert(&Triple {
                    subject: property.iri().clone().into(),
                    predicate: rdfs::RANGE.into_owned(),
                    object: range.into(),
                });
            }

            Axiom::FunctionalObjectProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::FUNCTIONAL_PROPERTY, graph);
            }
            Axiom::InverseFunctionalObjectProperty(property) => {
                self.insert_characteristic(
                    property.iri().clone(),
                    vocab::INVERSE_FUNCTIONAL_PROPERTY,
                    graph,
                );
            }
            Axiom::SymmetricObjectProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::SYMMETRIC_PROPERTY, graph);
            }
            Axiom::AsymmetricObjectProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::ASYMMETRIC_PROPERTY, graph);
            }
            Axiom::TransitiveObjectProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::TRANSITIVE_PROPERTY, graph);
            }
            Axiom::ReflexiveObjectProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::REFLEXIVE_PROPERTY, graph);
            }
            Axiom::IrreflexiveObjectProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::IRREFLEXIVE_PROPERTY, graph);
            }

            Axiom::SubDataPropertyOf {
                sub_property,
                super_property,
            } => {
                graph.insert(&Triple {
                    subject: sub_property.iri().clone().into(),
                    predicate: rdfs::SUB_PROPERTY_OF.into_owned(),
                    object: super_property.iri().clone().into(),
                });
            }

            Axiom::DataPropertyDomain { property, domain } => {
                let domain = self.serialize_class_expression(domain, graph);
                graph.insert(&Triple {
                    subject: property.iri().clone().into(),
                    predicate: rdfs::DOMAIN.into_owned(),
                    object: domain.into(),
                });
            }

            Axiom::DataPropertyRange { property, range } => {
                let range = self.serialize_data_range(range, graph);
                graph.insert(&Triple {
                    subject: property.iri().clone().into(),
                    predicate: rdfs::RANGE.into_owned(),
                    object: range,
                });
            }

            Axiom::FunctionalDataProperty(property) => {
                self.insert_characteristic(property.iri().clone(), vocab::FUNCTIONAL_PROPERTY, graph);
            }

            Axiom::ClassAssertion { class, individual } => {
                let class = self.serialize_class_expression(class, graph);
                graph.insert(&Triple {
                    subject: individual.clone().into(),
                    predicate: rdf::TYPE.into_owned(),
                    object: class.into(),
                });
            }

            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                graph.insert(&Triple {
                    subject: source.clone().into(),
                    predicate: property.iri().clone(),
                    object: target.clone().into(),
                });
            }

            Axiom::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                let node = self.fresh_blank_node();
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: rdf::TYPE.into_owned(),
                    object: vocab::NEGATIVE_PROPERTY_ASSERTION.into_owned().into(),
                });
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: vocab::SOURCE_INDIVIDUAL.into_owned(),
                    object: source.clone().into(),
                });
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: vocab::ASSERTION_PROPERTY.into_owned(),
                    object: property.iri().clone().into(),
                });
                graph.insert(&Triple {
                    subject: node.into(),
                    predicate: vocab::TARGET_INDIVIDUAL.into_owned(),
                    object: target.clone().into(),
                });
            }

            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            } => {
                graph.insert(&Triple {
                    subject: source.clone().into(),
                    predicate: property.iri().clone(),
                    object: target.clone().into(),
                });
            }

            Axiom::SameIndividual(individuals) => {
                for window in individuals.windows(2) {
                    graph.insert(&Triple {
                        subject: window[0].clone().into(),
                        predicate: vocab::SAME_AS.into_owned(),
                        object: window[1].clone().into(),
                    });
                }
            }

            Axiom::DifferentIndividuals(individuals) => {
                for window in individuals.windows(2) {
                    graph.insert(&Triple {
                        subject: window[0].clone().into(),
                        predicate: vocab::DIFFERENT_FROM.into_owned(),
                        object: window[1].clone().into(),
                    });
                }
            }

            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                graph.insert(&Triple {
                    subject: subject.clone().into(),
                    predicate: property.iri().clone(),
                    object: value.clone(),
                });
            }

            Axiom::DeclareClass(class) => {
                if self.config.include_declarations {
                    self.insert_characteristic(class.iri().clone(), vocab::CLASS, graph);
                }
            }
            Axiom::DeclareObjectProperty(property) => {
                if self.config.include_declarations {
                    self.insert_characteristic(property.iri().clone(), vocab::OBJECT_PROPERTY, graph);
                }
            }
            Axiom::DeclareDataProperty(property) => {
                if self.config.include_declarations {
                    self.insert_characteristic(
                        property.iri().clone(),
                        vocab::DATATYPE_PROPERTY,
                        graph,
                    );
                }
            }
            Axiom::DeclareAnnotationProperty(property) => {
                if self.config.include_declarations {
                    self.insert_characteristic(
                        property.iri().clone(),
                        vocab::ANNOTATION_PROPERTY,
                        graph,
                    );
                }
            }
            Axiom::DeclareNamedIndividual(individual) => {
                if self.config.include_declarations {
                    graph.insert(&Triple {
                        subject: individual.clone().into(),
                        predicate: rdf::TYPE.into_owned(),
                        object: vocab::NAMED_INDIVIDUAL.into_owned().into(),
                    });
                }
            }
        }
    }

    fn insert_characteristic(
        &self,
        subject: oxrdf::NamedNode,
        object: oxrdf::NamedNodeRef<'_>,
        graph: &mut Graph,
    ) {
        graph.insert(&Triple {
            subject: subject.into(),
            predicate: rdf::TYPE.into_owned(),
            object: object.into_owned().into(),
        });
    }

    /// Serializes a class expression, emitting structure triples for
    /// anonymous expressions and returning the node that denotes it.
    fn serialize_class_expression(&mut self, expr: &ClassExpression, graph: &mut Graph) -> Subject {
        match expr {
            ClassExpression::Class(class) => class.iri().clone().into(),

            ClassExpression::ObjectIntersectionOf(classes) => {
                self.serialize_boolean(vocab::INTERSECTION_OF, classes, graph)
            }
            ClassExpression::ObjectUnionOf(classes) => {
                self.serialize_boolean(vocab::UNION_OF, classes, graph)
            }

            ClassExpression::ObjectComplementOf(class) => {
                let node = self.fresh_blank_node();
                let operand = self.serialize_class_expression(class, graph);
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: vocab::COMPLEMENT_OF.into_owned(),
                    object: operand.into(),
                });
                node.into()
            }

            ClassExpression::ObjectOneOf(individuals) => {
                let node = self.fresh_blank_node();
                let items = individuals
                    .iter()
                    .map(|individual| individual.clone().into())
                    .collect();
                let list = self.create_rdf_list(items, graph);
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: vocab::ONE_OF.into_owned(),
                    object: list,
                });
                node.into()
            }

            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                let filler = self.serialize_class_expression(filler, graph).into();
                self.serialize_restriction(property, vocab::SOME_VALUES_FROM, filler, graph)
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                let filler = self.serialize_class_expression(filler, graph).into();
                self.serialize_restriction(property, vocab::ALL_VALUES_FROM, filler, graph)
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => self.serialize_restriction(
                property,
                vocab::HAS_VALUE,
                individual.clone().into(),
                graph,
            ),

            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => self.serialize_cardinality(
                property,
                vocab::MIN_CARDINALITY,
                *cardinality,
                filler.as_deref(),
                graph,
            ),
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.serialize_cardinality(
                property,
                vocab::MAX_CARDINALITY,
                *cardinality,
                filler.as_deref(),
                graph,
            ),
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => self.serialize_cardinality(
                property,
                vocab::CARDINALITY,
                *cardinality,
                filler.as_deref(),
                graph,
            ),

            ClassExpression::DataSomeValuesFrom { property, filler } => {
                let filler = self.serialize_data_range(filler, graph);
                self.serialize_data_restriction(
                    property.iri().clone(),
                    vocab::SOME_VALUES_FROM,
                    filler,
                    graph,
                )
            }
            ClassExpression::DataAllValuesFrom { property, filler } => {
                let filler = self.serialize_data_range(filler, graph);
                self.serialize_data_restriction(
                    property.iri().clone(),
                    vocab::ALL_VALUES_FROM,
                    filler,
                    graph,
                )
            }
            ClassExpression::DataHasValue { property, value } => self.serialize_data_restriction(
                property.iri().clone(),
                vocab::HAS_VALUE,
                value.clone().into(),
                graph,
            ),
        }
    }

    fn serialize_boolean(
        &mut self,
        predicate: oxrdf::NamedNodeRef<'_>,
        classes: &[ClassExpression],
        graph: &mut Graph,
    ) -> Subject {
        let node = self.fresh_blank_node();
        let items = classes
            .iter()
            .map(|class| self.serialize_class_expression(class, graph).into())
            .collect();
        let list = self.create_rdf_list(items, graph);
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: predicate.into_owned(),
            object: list,
        });
        node.into()
    }

    fn serialize_restriction(
        &mut self,
        property: &ObjectPropertyExpression,
        predicate: oxrdf::NamedNodeRef<'_>,
        value: Term,
        graph: &mut Graph,
    ) -> Subject {
        let node = self.fresh_blank_node();
        let property = self.serialize_object_property_expression(property, graph);
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: rdf::TYPE.into_owned(),
            object: vocab::RESTRICTION.into_owned().into(),
        });
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: vocab::ON_PROPERTY.into_owned(),
            object: property.into(),
        });
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: predicate.into_owned(),
            object: value,
        });
        node.into()
    }

    fn serialize_data_restriction(
        &mut self,
        property: oxrdf::NamedNode,
        predicate: oxrdf::NamedNodeRef<'_>,
        value: Term,
        graph: &mut Graph,
    ) -> Subject {
        let node = self.fresh_blank_node();
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: rdf::TYPE.into_owned(),
            object: vocab::RESTRICTION.into_owned().into(),
        });
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: vocab::ON_PROPERTY.into_owned(),
            object: property.into(),
        });
        graph.insert(&Triple {
            subject: node.clone().into(),
            predicate: predicate.into_owned(),
            object: value,
        });
        node.into()
    }

    fn serialize_cardinality(
        &mut self,
        property: &ObjectPropertyExpression,
        predicate: oxrdf::NamedNodeRef<'_>,
        cardinality: u32,
        filler: Option<&ClassExpression>,
        graph: &mut Graph,
    ) -> Subject {
        let value = Literal::new_typed_literal(
            cardinality.to_string(),
            xsd::NON_NEGATIVE_INTEGER.into_owned(),
        );
        let node = self.serialize_restriction(property, predicate, value.into(), graph);
        if let Some(filler) = filler {
            let filler = self.serialize_class_expression(filler, graph);
            graph.insert(&Triple {
                subject: node.clone(),
                predicate: vocab::ON_CLASS.into_owned(),
                object: filler.into(),
            });
        }
        node
    }

    /// Serializes an object property expression. A named property is its IRI;
    /// an inverse is a blank node carrying owl:inverseOf.
    fn serialize_object_property_expression(
        &mut self,
        expr: &ObjectPropertyExpression,
        graph: &mut Graph,
    ) -> Subject {
        match expr {
            ObjectPropertyExpression::ObjectProperty(property) => property.iri().clone().into(),
            ObjectPropertyExpression::ObjectInverseOf(property) => {
                let node = self.fresh_blank_node();
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: vocab::INVERSE_OF.into_owned(),
                    object: property.iri().clone().into(),
                });
                node.into()
            }
        }
    }

    fn serialize_data_range(&mut self, range: &DataRange, graph: &mut Graph) -> Term {
        match range {
            DataRange::Datatype(datatype) => datatype.clone().into(),
            DataRange::DataOneOf(literals) => {
                let node = self.fresh_blank_node();
                let items = literals.iter().map(|literal| literal.clone().into()).collect();
                let list = self.create_rdf_list(items, graph);
                graph.insert(&Triple {
                    subject: node.clone().into(),
                    predicate: vocab::ONE_OF.into_owned(),
                    object: list,
                });
                node.into()
            }
        }
    }

    /// Builds an rdf:List from back to front.
    fn create_rdf_list(&mut self, items: Vec<Term>, graph: &mut Graph) -> Term {
        let mut current: Term = rdf::NIL.into_owned().into();
        for item in items.into_iter().rev() {
            let cell = self.fresh_blank_node();
            graph.insert(&Triple {
                subject: cell.clone().into(),
                predicate: rdf::FIRST.into_owned(),
                object: item,
            });
            graph.insert(&Triple {
                subject: cell.clone().into(),
                predicate: rdf::REST.into_owned(),
                object: current,
            });
            current = cell.into();
        }
        current
    }

    fn fresh_blank_node(&mut self) -> BlankNode {
        self.blank_node_counter += 1;
        BlankNode::new_unchecked(format!("e{}", self.blank_node_counter))
    }
}

impl Default for OntologySerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes an ontology to an RDF graph.
pub fn serialize_ontology(ontology: &Ontology) -> Graph {
    OntologySerializer::new().serialize(ontology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ObjectProperty, OwlClass};
    use oxrdf::NamedNode;

    fn named(iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    #[test]
    fn serializes_header_and_subclass() {
        let mut ontology = Ontology::with_iri("http://example.org/onto").unwrap();
        ontology.insert(Axiom::subclass_of(
            OwlClass::new(named("http://example.org/Dog")),
            OwlClass::new(named("http://example.org/Animal")),
        ));

        let graph = serialize_ontology(&ontology);

        assert!(graph.contains(&Triple {
            subject: named("http://example.org/onto").into(),
            predicate: rdf::TYPE.into_owned(),
            object: vocab::ONTOLOGY.into_owned().into(),
        }));
        assert!(graph.contains(&Triple {
            subject: named("http://example.org/Dog").into(),
            predicate: rdfs::SUB_CLASS_OF.into_owned(),
            object: named("http://example.org/Animal").into(),
        }));
    }

    #[test]
    fn serializes_class_assertion() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::class_assertion(
            OwlClass::new(named("http://example.org/Dog")),
            named("http://example.org/fido"),
        ));

        let graph = serialize_ontology(&ontology);
        assert!(graph.contains(&Triple {
            subject: named("http://example.org/fido").into(),
            predicate: rdf::TYPE.into_owned(),
            object: named("http://example.org/Dog").into(),
        }));
    }

    #[test]
    fn serializes_restriction_with_structure() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::subclass_of(
            OwlClass::new(named("http://example.org/PetOwner")),
            ClassExpression::some_values_from(
                ObjectProperty::new(named("http://example.org/hasPet")),
                ClassExpression::class(OwlClass::new(named("http://example.org/Pet"))),
            ),
        ));

        let graph = serialize_ontology(&ontology);
        assert!(
            graph
                .triples_for_predicate(vocab::SOME_VALUES_FROM)
                .next()
                .is_some()
        );
        assert!(
            graph
                .triples_for_predicate(vocab::ON_PROPERTY)
                .next()
                .is_some()
        );
    }

    #[test]
    fn declarations_can_be_omitted() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::DeclareClass(OwlClass::new(named(
            "http://example.org/Dog",
        ))));

        let graph = serialize_ontology(&ontology);
        assert_eq!(graph.len(), 1);

        let config = SerializerConfig {
            include_declarations: false,
        };
        let graph = OntologySerializer::with_config(config).serialize(&ontology);
        assert!(graph.is_empty());
    }
}
