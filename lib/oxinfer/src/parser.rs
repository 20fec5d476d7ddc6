//! OWL 2 interpretation of RDF graphs.
//!
//! Maps the RDF encoding of OWL (Turtle, RDF/XML and friends all land in the
//! same [`Graph`]) onto the structural axiom model. Predicates are classified
//! through entity declarations: a triple with an undeclared predicate falls
//! back to a data assertion when its object is a literal and to an object
//! assertion otherwise.

use crate::axiom::Axiom;
use crate::entity::{AnnotationProperty, DataProperty, Individual, ObjectProperty, OwlClass};
use crate::error::OntologyParseError;
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::ontology::Ontology;
use crate::vocab;
use oxrdf::{
    BlankNodeRef, Graph, NamedNode, NamedNodeRef, Subject, SubjectRef, Term, TermRef,
    vocab::{rdf, rdfs},
};
use rustc_hash::FxHashSet;
use tracing::debug;

const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Upper bound on rdf:List length before the list is considered malformed.
    pub max_list_length: usize,
    /// Whether malformed OWL constructs are skipped instead of failing the
    /// whole document.
    pub lenient: bool,
}

impl ParserConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            max_list_length: 10_000,
            lenient: false,
        }
    }

    /// Enables lenient mode.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an OWL ontology from an RDF graph.
pub struct OntologyParser<'a> {
    graph: &'a Graph,
    config: ParserConfig,
    /// Blank nodes that encode expressions, lists or reifications rather than
    /// individuals. They never yield assertion axioms of their own.
    structural: FxHashSet<Subject>,
    /// Subjects typed owl:Ontology. Their properties belong to the header.
    header_subjects: FxHashSet<Subject>,
    declared_object: FxHashSet<NamedNode>,
    declared_data: FxHashSet<NamedNode>,
    declared_annotation: FxHashSet<NamedNode>,
}

impl<'a> OntologyParser<'a> {
    /// Creates a new parser for the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_config(graph, ParserConfig::new())
    }

    /// Creates a new parser with custom configuration.
    pub fn with_config(graph: &'a Graph, config: ParserConfig) -> Self {
        Self {
            graph,
            config,
            structural: FxHashSet::default(),
            header_subjects: FxHashSet::default(),
            declared_object: FxHashSet::default(),
            declared_data: FxHashSet::default(),
            declared_annotation: FxHashSet::default(),
        }
    }

    /// Parses the ontology from the graph.
    pub fn parse(&mut self) -> Result<Ontology, OntologyParseError> {
        let mut ontology = Ontology::new(None);

        self.collect_structural_nodes();
        self.parse_header(&mut ontology);
        self.parse_declarations(&mut ontology);
        self.parse_schema_axioms(&mut ontology)?;
        self.parse_negative_assertions(&mut ontology)?;
        self.parse_assertions(&mut ontology)?;

        Ok(ontology)
    }

    /// Records the blank nodes that carry expression or reification structure.
    fn collect_structural_nodes(&mut self) {
        for triple in self.graph.triples_for_predicate(rdf::TYPE) {
            if let TermRef::NamedNode(object) = triple.object {
                if object == vocab::RESTRICTION || object == vocab::NEGATIVE_PROPERTY_ASSERTION {
                    self.structural.insert(triple.subject.into_owned());
                }
            }
        }
        for predicate in [
            vocab::INTERSECTION_OF,
            vocab::UNION_OF,
            vocab::COMPLEMENT_OF,
            vocab::ONE_OF,
        ] {
            for triple in self.graph.triples_for_predicate(predicate) {
                if triple.subject.is_blank_node() {
                    self.structural.insert(triple.subject.into_owned());
                }
            }
        }
        for triple in self.graph.triples_for_predicate(rdf::FIRST) {
            self.structural.insert(triple.subject.into_owned());
        }
    }

    /// Extracts the document header: ontology IRI, version IRI, imports and
    /// ontology-level annotations.
    fn parse_header(&mut self, ontology: &mut Ontology) {
        for triple in self.graph.triples_for_predicate(rdf::TYPE) {
            let TermRef::NamedNode(object) = triple.object else {
                continue;
            };
            if object != vocab::ONTOLOGY {
                continue;
            }
            self.header_subjects.insert(triple.subject.into_owned());

            if let SubjectRef::NamedNode(iri) = triple.subject {
                ontology.set_iri(Some(iri.into_owned()));
            }
            for header in self.graph.triples_for_subject(triple.subject) {
                if header.predicate == rdf::TYPE {
                    continue;
                } else if header.predicate == vocab::IMPORTS {
                    if let TermRef::NamedNode(import) = header.object {
                        ontology.add_import(import.into_owned());
                    }
                } else if header.predicate == vocab::VERSION_IRI {
                    if let TermRef::NamedNode(version) = header.object {
                        ontology.set_version_iri(Some(version.into_owned()));
                    }
                } else {
                    ontology.add_annotation(
                        AnnotationProperty::new(header.predicate.into_owned()),
                        header.object.into_owned(),
                    );
                }
            }
        }
    }

    /// Parses entity declarations and indexes property kinds for later
    /// predicate classification.
    fn parse_declarations(&mut self, ontology: &mut Ontology) {
        for triple in self.graph.triples_for_predicate(rdf::TYPE) {
            let TermRef::NamedNode(object) = triple.object else {
                continue;
            };
            let SubjectRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let node = subject.into_owned();

            if object == vocab::CLASS {
                ontology.insert(Axiom::DeclareClass(OwlClass::new(node)));
            } else if object == vocab::OBJECT_PROPERTY {
                self.declared_object.insert(node.clone());
                ontology.insert(Axiom::DeclareObjectProperty(ObjectProperty::new(node)));
            } else if object == vocab::DATATYPE_PROPERTY {
                self.declared_data.insert(node.clone());
                ontology.insert(Axiom::DeclareDataProperty(DataProperty::new(node)));
            } else if object == vocab::ANNOTATION_PROPERTY {
                self.declared_annotation.insert(node.clone());
                ontology.insert(Axiom::DeclareAnnotationProperty(AnnotationProperty::new(
                    node,
                )));
            } else if object == vocab::NAMED_INDIVIDUAL {
                ontology.insert(Axiom::DeclareNamedIndividual(Individual::Named(node)));
            }
        }
    }

    /// Parses terminological axioms and property characteristics.
    fn parse_schema_axioms(&mut self, ontology: &mut Ontology) -> Result<(), OntologyParseError> {
        for triple in self.graph.triples_for_predicate(rdfs::SUB_CLASS_OF) {
            let axiom = self.recover(self.parse_class_pair(triple.subject, triple.object))?;
            if let Some((sub_class, super_class)) = axiom {
                ontology.insert(Axiom::SubClassOf {
                    sub_class,
                    super_class,
                });
            }
        }

        for triple in self.graph.triples_for_predicate(vocab::EQUIVALENT_CLASS) {
            let axiom = self.recover(self.parse_class_pair(triple.subject, triple.object))?;
            if let Some((first, second)) = axiom {
                ontology.insert(Axiom::EquivalentClasses(vec![first, second]));
            }
        }

        for triple in self.graph.triples_for_predicate(vocab::DISJOINT_WITH) {
            let axiom = self.recover(self.parse_class_pair(triple.subject, triple.object))?;
            if let Some((first, second)) = axiom {
                ontology.insert(Axiom::DisjointClasses(vec![first, second]));
            }
        }

        for triple in self.graph.triples_for_predicate(rdfs::SUB_PROPERTY_OF) {
            let (SubjectRef::NamedNode(sub), TermRef::NamedNode(sup)) =
                (triple.subject, triple.object)
            else {
                continue;
            };
            let sub = sub.into_owned();
            let sup = sup.into_owned();
            if self.declared_data.contains(&sub) || self.declared_data.contains(&sup) {
                ontology.insert(Axiom::SubDataPropertyOf {
                    sub_property: DataProperty::new(sub),
                    super_property: DataProperty::new(sup),
                });
            } else {
                ontology.insert(Axiom::SubObjectPropertyOf {
                    sub_property: ObjectProperty::new(sub).into(),
                    super_property: ObjectProperty::new(sup).into(),
                });
            }
        }

        for triple in self.graph.triples_for_predicate(rdfs::DOMAIN) {
            let SubjectRef::NamedNode(property) = triple.subject else {
                continue;
            };
            let property = property.into_owned();
            let Some(domain) = self.recover(self.parse_class_expression(triple.object))? else {
                continue;
            };
            if self.declared_data.contains(&property) {
                ontology.insert(Axiom::DataPropertyDomain {
                    property: DataProperty::new(property),
                    domain,
                });
            } else {
                ontology.insert(Axiom::ObjectPropertyDomain {
                    property: ObjectProperty::new(property),
                    domain,
                });
            }
        }

        for triple in self.graph.triples_for_predicate(rdfs::RANGE) {
            let SubjectRef::NamedNode(property) = triple.subject else {
                continue;
            };
            let property = property.into_owned();
            if self.declared_data.contains(&property) {
                let Some(range) = self.recover(self.parse_data_range(triple.object))? else {
                    continue;
                };
                ontology.insert(Axiom::DataPropertyRange {
                    property: DataProperty::new(property),
                    range,
                });
            } else {
                let Some(range) = self.recover(self.parse_class_expression(triple.object))? else {
                    continue;
                };
                ontology.insert(Axiom::ObjectPropertyRange {
                    property: ObjectProperty::new(property),
                    range,
                });
            }
        }

        for triple in self.graph.triples_for_predicate(vocab::INVERSE_OF) {
            if let (SubjectRef::NamedNode(first), TermRef::NamedNode(second)) =
                (triple.subject, triple.object)
            {
                ontology.insert(Axiom::InverseObjectProperties(
                    ObjectProperty::new(first.into_owned()),
                    ObjectProperty::new(second.into_owned()),
                ));
            }
        }

        for triple in self.graph.triples_for_predicate(vocab::EQUIVALENT_PROPERTY) {
            if let (SubjectRef::NamedNode(first), TermRef::NamedNode(second)) =
                (triple.subject, triple.object)
            {
                ontology.insert(Axiom::EquivalentObjectProperties(vec![
                    ObjectProperty::new(first.into_owned()),
                    ObjectProperty::new(second.into_owned()),
                ]));
            }
        }

        for triple in self.graph.triples_for_predicate(rdf::TYPE) {
            let SubjectRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let TermRef::NamedNode(object) = triple.object else {
                continue;
            };
            let node = subject.into_owned();
            if object == vocab::FUNCTIONAL_PROPERTY {
                if self.declared_data.contains(&node) {
                    ontology.insert(Axiom::FunctionalDataProperty(DataProperty::new(node)));
                } else {
                    ontology.insert(Axiom::FunctionalObjectProperty(ObjectProperty::new(node)));
                }
            } else if object == vocab::INVERSE_FUNCTIONAL_PROPERTY {
                ontology.insert(Axiom::InverseFunctionalObjectProperty(ObjectProperty::new(
                    node,
                )));
            } else if object == vocab::TRANSITIVE_PROPERTY {
                ontology.insert(Axiom::TransitiveObjectProperty(ObjectProperty::new(node)));
            } else if object == vocab::SYMMETRIC_PROPERTY {
                ontology.insert(Axiom::SymmetricObjectProperty(ObjectProperty::new(node)));
            } else if object == vocab::ASYMMETRIC_PROPERTY {
                ontology.insert(Axiom::AsymmetricObjectProperty(ObjectProperty::new(node)));
            } else if object == vocab::REFLEXIVE_PROPERTY {
                ontology.insert(Axiom::ReflexiveObjectProperty(ObjectProperty::new(node)));
            } else if object == vocab::IRREFLEXIVE_PROPERTY {
                ontology.insert(Axiom::IrreflexiveObjectProperty(ObjectProperty::new(node)));
            }
        }

        for triple in self.graph.triples_for_predicate(vocab::SAME_AS) {
            let pair = self.recover(self.parse_individual_pair(triple.subject, triple.object))?;
            if let Some((first, second)) = pair {
                ontology.insert(Axiom::SameIndividual(vec![first, second]));
            }
        }

        for triple in self.graph.triples_for_predicate(vocab::DIFFERENT_FROM) {
            let pair = self.recover(self.parse_individual_pair(triple.subject, triple.object))?;
            if let Some((first, second)) = pair {
                ontology.insert(Axiom::DifferentIndividuals(vec![first, second]));
            }
        }

        Ok(())
    }

    /// Decodes reified owl:NegativePropertyAssertion nodes.
    ///
    /// Negative data assertions (owl:targetValue) are skipped.
    fn parse_negative_assertions(
        &mut self,
        ontology: &mut Ontology,
    ) -> Result<(), OntologyParseError> {
        for triple in self.graph.triples_for_predicate(rdf::TYPE) {
            let TermRef::NamedNode(object) = triple.object else {
                continue;
            };
            if object != vocab::NEGATIVE_PROPERTY_ASSERTION {
                continue;
            }
            let node = triple.subject;
            if self
                .graph
                .object_for_subject_predicate(node, vocab::TARGET_VALUE)
                .is_some()
            {
                debug!(node = %node, "skipping negative data property assertion");
                continue;
            }
            let decoded = self.recover(self.decode_negative_assertion(node))?;
            if let Some(axiom) = decoded {
                ontology.insert(axiom);
            }
        }
        Ok(())
    }

    fn decode_negative_assertion(
        &self,
        node: SubjectRef<'_>,
    ) -> Result<Axiom, OntologyParseError> {
        let missing = |part: &str| OntologyParseError::InvalidNegativeAssertion {
            node: node.to_string(),
            reason: format!("missing owl:{part}"),
        };
        let source = self
            .graph
            .object_for_subject_predicate(node, vocab::SOURCE_INDIVIDUAL)
            .ok_or_else(|| missing("sourceIndividual"))?;
        let property = self
            .graph
            .object_for_subject_predicate(node, vocab::ASSERTION_PROPERTY)
            .ok_or_else(|| missing("assertionProperty"))?;
        let target = self
            .graph
            .object_for_subject_predicate(node, vocab::TARGET_INDIVIDUAL)
            .ok_or_else(|| missing("targetIndividual"))?;
        let TermRef::NamedNode(property) = property else {
            return Err(OntologyParseError::UnexpectedTerm {
                position: "owl:assertionProperty".into(),
                found: property.to_string(),
            });
        };
        Ok(Axiom::NegativeObjectPropertyAssertion {
            property: ObjectProperty::new(property.into_owned()),
            source: self.term_to_individual(source)?,
            target: self.term_to_individual(target)?,
        })
    }

    /// Parses instance-level assertions: class assertions, property
    /// assertions and annotation assertions.
    fn parse_assertions(&mut self, ontology: &mut Ontology) -> Result<(), OntologyParseError> {
        for triple in self.graph.iter() {
            if self.is_consumed_subject(triple.subject) {
                continue;
            }
            if triple.predicate == rdf::TYPE {
                let assertion = self.recover(self.parse_type_assertion(triple.subject, triple.object))?;
                if let Some(axiom) = assertion.flatten() {
                    ontology.insert(axiom);
                }
                continue;
            }
            if is_builtin_annotation(triple.predicate) {
                let subject = subject_to_individual(triple.subject);
                ontology.insert(Axiom::AnnotationAssertion {
                    property: AnnotationProperty::new(triple.predicate.into_owned()),
                    subject,
                    value: triple.object.into_owned(),
                });
                continue;
            }
            if is_reserved_iri(triple.predicate.as_str()) {
                continue;
            }

            let predicate = triple.predicate.into_owned();
            if self.declared_annotation.contains(&predicate) {
                let subject = subject_to_individual(triple.subject);
                ontology.insert(Axiom::AnnotationAssertion {
                    property: AnnotationProperty::new(predicate),
                    subject,
                    value: triple.object.into_owned(),
                });
            } else if self.declared_data.contains(&predicate) {
                let TermRef::Literal(value) = triple.object else {
                    let error = OntologyParseError::UnexpectedTerm {
                        position: format!("value of data property {predicate}"),
                        found: triple.object.to_string(),
                    };
                    self.recover(Err::<(), _>(error))?;
                    continue;
                };
                let subject = subject_to_individual(triple.subject);
                ontology.insert(Axiom::DataPropertyAssertion {
                    property: DataProperty::new(predicate),
                    source: subject,
                    target: value.into_owned(),
                });
            } else {
                // Undeclared predicate: the object decides.
                match triple.object {
                    TermRef::Literal(value) => {
                        let subject = subject_to_individual(triple.subject);
                        ontology.insert(Axiom::DataPropertyAssertion {
                            property: DataProperty::new(predicate),
                            source: subject,
                            target: value.into_owned(),
                        });
                    }
                    object => {
                        if self.is_consumed_term(object) {
                            continue;
                        }
                        let subject = subject_to_individual(triple.subject);
                        let target = self.term_to_individual(object)?;
                        ontology.insert(Axiom::ObjectPropertyAssertion {
                            property: ObjectProperty::new(predicate),
                            source: subject,
                            target,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Interprets one rdf:type triple as a class assertion, or `None` when it
    /// carries vocabulary already handled elsewhere.
    fn parse_type_assertion(
        &self,
        subject: SubjectRef<'_>,
        object: TermRef<'_>,
    ) -> Result<Option<Axiom>, OntologyParseError> {
        let class = match object {
            TermRef::NamedNode(class) => {
                if is_reserved_iri(class.as_str()) {
                    return Ok(None);
                }
                ClassExpression::Class(OwlClass::new(class.into_owned()))
            }
            TermRef::BlankNode(node) => {
                if !self.structural.contains(&Subject::BlankNode(node.into_owned())) {
                    return Ok(None);
                }
                self.parse_anonymous_class(node)?
            }
            other => {
                return Err(OntologyParseError::UnexpectedTerm {
                    position: "class of rdf:type".into(),
                    found: other.to_string(),
                });
            }
        };
        Ok(Some(Axiom::ClassAssertion {
            class,
            individual: subject_to_individual(subject),
        }))
    }

    fn parse_class_pair(
        &self,
        subject: SubjectRef<'_>,
        object: TermRef<'_>,
    ) -> Result<(ClassExpression, ClassExpression), OntologyParseError> {
        let first = match subject {
            SubjectRef::NamedNode(node) => {
                ClassExpression::Class(OwlClass::new(node.into_owned()))
            }
            SubjectRef::BlankNode(node) => self.parse_anonymous_class(node)?,
        };
        let second = self.parse_class_expression(object)?;
        Ok((first, second))
    }

    fn parse_individual_pair(
        &self,
        subject: SubjectRef<'_>,
        object: TermRef<'_>,
    ) -> Result<(Individual, Individual), OntologyParseError> {
        Ok((
            subject_to_individual(subject),
            self.term_to_individual(object)?,
        ))
    }

    /// Parses a class expression from a term.
    fn parse_class_expression(
        &self,
        term: TermRef<'_>,
    ) -> Result<ClassExpression, OntologyParseError> {
        match term {
            TermRef::NamedNode(node) => {
                Ok(ClassExpression::Class(OwlClass::new(node.into_owned())))
            }
            TermRef::BlankNode(node) => self.parse_anonymous_class(node),
            other => Err(OntologyParseError::UnexpectedTerm {
                position: "class expression".into(),
                found: other.to_string(),
            }),
        }
    }

    /// Parses an anonymous class expression, either a restriction or a
    /// boolean combination.
    fn parse_anonymous_class(
        &self,
        node: BlankNodeRef<'_>,
    ) -> Result<ClassExpression, OntologyParseError> {
        for triple in self.graph.triples_for_subject(node) {
            if triple.predicate == rdf::TYPE {
                if let TermRef::NamedNode(object) = triple.object {
                    if object == vocab::RESTRICTION {
                        return self.parse_restriction(node);
                    }
                }
            }
        }

        for triple in self.graph.triples_for_subject(node) {
            if triple.predicate == vocab::INTERSECTION_OF {
                return Ok(ClassExpression::ObjectIntersectionOf(
                    self.parse_class_list(triple.object)?,
                ));
            } else if triple.predicate == vocab::UNION_OF {
                return Ok(ClassExpression::ObjectUnionOf(
                    self.parse_class_list(triple.object)?,
                ));
            } else if triple.predicate == vocab::COMPLEMENT_OF {
                return Ok(ClassExpression::ObjectComplementOf(Box::new(
                    self.parse_class_expression(triple.object)?,
                )));
            } else if triple.predicate == vocab::ONE_OF {
                return Ok(ClassExpression::ObjectOneOf(
                    self.parse_individual_list(triple.object)?,
                ));
            }
        }

        Err(OntologyParseError::UnexpectedTerm {
            position: "anonymous class expression".into(),
            found: node.to_string(),
        })
    }

    /// Parses an owl:Restriction node.
    fn parse_restriction(
        &self,
        node: BlankNodeRef<'_>,
    ) -> Result<ClassExpression, OntologyParseError> {
        let mut property = None;
        let mut some_values = None;
        let mut all_values = None;
        let mut has_value = None;
        let mut min_cardinality = None;
        let mut max_cardinality = None;
        let mut exact_cardinality = None;
        let mut on_class = None;

        for triple in self.graph.triples_for_subject(node) {
            if triple.predicate == vocab::ON_PROPERTY {
                if let TermRef::NamedNode(p) = triple.object {
                    property = Some(p.into_owned());
                }
            } else if triple.predicate == vocab::SOME_VALUES_FROM {
                some_values = Some(triple.object);
            } else if triple.predicate == vocab::ALL_VALUES_FROM {
                all_values = Some(triple.object);
            } else if triple.predicate == vocab::HAS_VALUE {
                has_value = Some(triple.object);
            } else if triple.predicate == vocab::MIN_CARDINALITY {
                min_cardinality = Some(self.parse_cardinality(node, triple.object)?);
            } else if triple.predicate == vocab::MAX_CARDINALITY {
                max_cardinality = Some(self.parse_cardinality(node, triple.object)?);
            } else if triple.predicate == vocab::CARDINALITY {
                exact_cardinality = Some(self.parse_cardinality(node, triple.object)?);
            } else if triple.predicate == vocab::ON_CLASS {
                on_class = Some(self.parse_class_expression(triple.object)?);
            }
        }

        let property = property.ok_or_else(|| OntologyParseError::InvalidRestriction {
            node: node.to_string(),
            reason: "missing owl:onProperty".into(),
        })?;

        if self.declared_data.contains(&property) {
            let property = DataProperty::new(property);
            if let Some(filler) = some_values {
                return Ok(ClassExpression::DataSomeValuesFrom {
                    property,
                    filler: self.parse_data_range(filler)?,
                });
            }
            if let Some(filler) = all_values {
                return Ok(ClassExpression::DataAllValuesFrom {
                    property,
                    filler: self.parse_data_range(filler)?,
                });
            }
            if let Some(value) = has_value {
                let TermRef::Literal(value) = value else {
                    return Err(OntologyParseError::UnexpectedTerm {
                        position: "owl:hasValue of a data property".into(),
                        found: value.to_string(),
                    });
                };
                return Ok(ClassExpression::DataHasValue {
                    property,
                    value: value.into_owned(),
                });
            }
            return Err(OntologyParseError::InvalidRestriction {
                node: node.to_string(),
                reason: "unsupported data property restriction".into(),
            });
        }

        let property = ObjectPropertyExpression::ObjectProperty(ObjectProperty::new(property));

        if let Some(filler) = some_values {
            return Ok(ClassExpression::ObjectSomeValuesFrom {
                property,
                filler: Box::new(self.parse_class_expression(filler)?),
            });
        }
        if let Some(filler) = all_values {
            return Ok(ClassExpression::ObjectAllValuesFrom {
                property,
                filler: Box::new(self.parse_class_expression(filler)?),
            });
        }
        if let Some(value) = has_value {
            return Ok(ClassExpression::ObjectHasValue {
                property,
                individual: self.term_to_individual(value)?,
            });
        }
        if let Some(cardinality) = min_cardinality {
            return Ok(ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler: on_class.map(Box::new),
            });
        }
        if let Some(cardinality) = max_cardinality {
            return Ok(ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler: on_class.map(Box::new),
            });
        }
        if let Some(cardinality) = exact_cardinality {
            return Ok(ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler: on_class.map(Box::new),
            });
        }

        Err(OntologyParseError::InvalidRestriction {
            node: node.to_string(),
            reason: "no restriction value".into(),
        })
    }

    fn parse_cardinality(
        &self,
        node: BlankNodeRef<'_>,
        term: TermRef<'_>,
    ) -> Result<u32, OntologyParseError> {
        let TermRef::Literal(literal) = term else {
            return Err(OntologyParseError::InvalidCardinality {
                node: node.to_string(),
                value: term.to_string(),
            });
        };
        literal
            .value()
            .parse()
            .map_err(|_| OntologyParseError::InvalidCardinality {
                node: node.to_string(),
                value: literal.value().into(),
            })
    }

    /// Parses a data range: a datatype IRI or an owl:oneOf of literals.
    fn parse_data_range(&self, term: TermRef<'_>) -> Result<DataRange, OntologyParseError> {
        match term {
            TermRef::NamedNode(datatype) => Ok(DataRange::Datatype(datatype.into_owned())),
            TermRef::BlankNode(node) => {
                for triple in self.graph.triples_for_subject(node) {
                    if triple.predicate == vocab::ONE_OF {
                        return Ok(DataRange::DataOneOf(
                            self.parse_literal_list(triple.object)?,
                        ));
                    }
                }
                Err(OntologyParseError::UnexpectedTerm {
                    position: "data range".into(),
                    found: node.to_string(),
                })
            }
            other => Err(OntologyParseError::UnexpectedTerm {
                position: "data range".into(),
                found: other.to_string(),
            }),
        }
    }

    fn parse_class_list(
        &self,
        head: TermRef<'_>,
    ) -> Result<Vec<ClassExpression>, OntologyParseError> {
        self.parse_list(head, |parser, item| parser.parse_class_expression(item))
    }

    fn parse_individual_list(
        &self,
        head: TermRef<'_>,
    ) -> Result<Vec<Individual>, OntologyParseError> {
        self.parse_list(head, |parser, item| parser.term_to_individual(item))
    }

    fn parse_literal_list(&self, head: TermRef<'_>) -> Result<Vec<oxrdf::Literal>, OntologyParseError> {
        self.parse_list(head, |_, item| match item {
            TermRef::Literal(literal) => Ok(literal.into_owned()),
            other => Err(OntologyParseError::UnexpectedTerm {
                position: "literal list item".into(),
                found: other.to_string(),
            }),
        })
    }

    /// Walks an rdf:List, decoding each rdf:first with `decode_item`.
    fn parse_list<T>(
        &self,
        head: TermRef<'_>,
        decode_item: impl Fn(&Self, TermRef<'_>) -> Result<T, OntologyParseError>,
    ) -> Result<Vec<T>, OntologyParseError> {
        let head_repr = head.to_string();
        let invalid = |reason: &str| OntologyParseError::InvalidList {
            node: head_repr.clone(),
            reason: reason.into(),
        };

        let mut result = Vec::new();
        let mut current = head.into_owned();
        while current != Term::from(rdf::NIL) {
            if result.len() >= self.config.max_list_length {
                return Err(invalid("list exceeds the configured maximum length"));
            }
            let cell = match &current {
                Term::NamedNode(node) => SubjectRef::from(node.as_ref()),
                Term::BlankNode(node) => SubjectRef::from(node.as_ref()),
                _ => return Err(invalid("list cell is not a node")),
            };
            let first = self
                .graph
                .object_for_subject_predicate(cell, rdf::FIRST)
                .ok_or_else(|| invalid("missing rdf:first"))?;
            result.push(decode_item(self, first)?);
            current = self
                .graph
                .object_for_subject_predicate(cell, rdf::REST)
                .ok_or_else(|| invalid("missing rdf:rest"))?
                .into_owned();
        }
        Ok(result)
    }


    fn term_to_individual(&self, term: TermRef<'_>) -> Result<Individual, OntologyParseError> {
        match term {
            TermRef::NamedNode(node) => Ok(Individual::Named(node.into_owned())),
            TermRef::BlankNode(node) => Ok(Individual::Anonymous(node.into_owned())),
            other => Err(OntologyParseError::UnexpectedTerm {
                position: "individual".into(),
                found: other.to_string(),
            }),
        }
    }

    fn is_consumed_subject(&self, subject: SubjectRef<'_>) -> bool {
        let owned = subject.into_owned();
        self.structural.contains(&owned) || self.header_subjects.contains(&owned)
    }

    fn is_consumed_term(&self, term: TermRef<'_>) -> bool {
        match term {
            TermRef::NamedNode(node) => self
                .header_subjects
                .contains(&Subject::NamedNode(node.into_owned())),
            TermRef::BlankNode(node) => self
                .structural
                .contains(&Subject::BlankNode(node.into_owned())),
            _ => false,
        }
    }

    /// In lenient mode downgrades a parse failure to a skipped construct.
    fn recover<T>(
        &self,
        result: Result<T, OntologyParseError>,
    ) -> Result<Option<T>, OntologyParseError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) if self.config.lenient => {
                debug!(%error, "skipping malformed OWL construct");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

fn subject_to_individual(subject: SubjectRef<'_>) -> Individual {
    match subject {
        SubjectRef::NamedNode(node) => Individual::Named(node.into_owned()),
        SubjectRef::BlankNode(node) => Individual::Anonymous(node.into_owned()),
    }
}

fn is_reserved_iri(iri: &str) -> bool {
    iri.starts_with(vocab::OWL_NAMESPACE)
        || iri.starts_with(RDF_NAMESPACE)
        || iri.starts_with(RDFS_NAMESPACE)
        || iri.starts_with(XSD_NAMESPACE)
}

/// Built-in annotation vocabulary usable without a declaration.
fn is_builtin_annotation(predicate: NamedNodeRef<'_>) -> bool {
    predicate == rdfs::LABEL
        || predicate == rdfs::COMMENT
        || predicate == rdfs::SEE_ALSO
        || predicate == rdfs::IS_DEFINED_BY
        || predicate == vocab::VERSION_INFO
        || predicate == vocab::DEPRECATED
}

/// Parses an ontology from an RDF graph.
pub fn parse_ontology(graph: &Graph) -> Result<Ontology, OntologyParseError> {
    OntologyParser::new(graph).parse()
}

/// Parses an ontology with custom configuration.
pub fn parse_ontology_with_config(
    graph: &Graph,
    config: ParserConfig,
) -> Result<Ontology, OntologyParseError> {
    OntologyParser::with_config(graph, config).parse()
}
