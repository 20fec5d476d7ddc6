//! Forward-chaining reasoning over merged ontology documents.
//!
//! The default backend applies an OWL 2 RL style rule set: subclass and
//! equivalence closure with type propagation, domain/range typing,
//! subproperty/inverse/symmetric/transitive propagation and sameAs merging,
//! all at the assertion level. Generated entailments are restricted to
//! instance-level assertions; the backend never emits schema axioms.

mod rules;

use crate::axiom::{Axiom, InferenceKind};
use crate::entity::{DataProperty, Individual, ObjectProperty, OwlClass};
use crate::error::ReasoningError;
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::ontology::Ontology;
use crate::vocab;
use oxrdf::Literal;
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for the rule backend.
#[derive(Debug, Clone)]
pub struct ReasonerConfig {
    /// Upper bound on fixpoint iterations. Reaching it is an error, not a
    /// silent truncation.
    pub max_iterations: usize,
    /// Optional wall-clock budget for the whole closure computation.
    pub timeout: Option<Duration>,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            timeout: None,
        }
    }
}

/// Capability surface the materialization pipeline depends on.
///
/// Implementations hold whatever backend resources they need; dropping the
/// reasoner releases them, so disposal happens exactly once on every exit
/// path of the owning run.
pub trait Reasoner {
    /// Checks whether the ontology is consistent.
    fn is_consistent(&mut self) -> Result<bool, ReasoningError>;

    /// Computes the closure over the requested assertion kinds. Blocking;
    /// after it returns, queries reflect the closure.
    fn precompute(&mut self, kinds: &[InferenceKind]) -> Result<(), ReasoningError>;

    /// Returns entailed assertions not already asserted in the ontology,
    /// restricted to the requested generator kinds.
    fn inferred_axioms(
        &mut self,
        kinds: &[InferenceKind],
    ) -> Result<FxHashSet<Axiom>, ReasoningError>;

    /// Describes the detected contradiction, if any.
    fn clash(&self) -> Option<&str> {
        None
    }
}

/// The default forward-chaining rule backend.
pub struct RuleReasoner<'a> {
    ontology: &'a Ontology,
    config: ReasonerConfig,

    /// Named subclass closure: class -> its named superclasses.
    superclasses: FxHashMap<OwlClass, FxHashSet<OwlClass>>,
    /// Anonymous subsumers: satisfying the expression entails the class.
    complex_subsumptions: Vec<(ClassExpression, OwlClass)>,
    disjoint_pairs: Vec<(ClassExpression, ClassExpression)>,

    superproperties: FxHashMap<ObjectProperty, FxHashSet<ObjectProperty>>,
    data_superproperties: FxHashMap<DataProperty, FxHashSet<DataProperty>>,
    domains: FxHashMap<ObjectProperty, FxHashSet<OwlClass>>,
    ranges: FxHashMap<ObjectProperty, FxHashSet<OwlClass>>,
    data_domains: FxHashMap<DataProperty, FxHashSet<OwlClass>>,
    inverses: FxHashMap<ObjectProperty, FxHashSet<ObjectProperty>>,
    symmetric: FxHashSet<ObjectProperty>,
    transitive: FxHashSet<ObjectProperty>,
    functional: FxHashSet<ObjectProperty>,
    inverse_functional: FxHashSet<ObjectProperty>,
    irreflexive: FxHashSet<ObjectProperty>,
    asymmetric: FxHashSet<ObjectProperty>,

    /// Closure state: individual -> named types.
    types: FxHashMap<Individual, FxHashSet<OwlClass>>,
    /// Asserted negations: individual -> classes it must not belong to.
    negative_types: FxHashMap<Individual, FxHashSet<OwlClass>>,
    object_values: FxHashMap<(Individual, ObjectProperty), FxHashSet<Individual>>,
    data_values: FxHashMap<(Individual, DataProperty), FxHashSet<Literal>>,
    same_as: FxHashMap<Individual, FxHashSet<Individual>>,
    different_from: FxHashSet<(Individual, Individual)>,
    negative_object: FxHashSet<(Individual, ObjectProperty, Individual)>,

    classified: bool,
    clash: Option<String>,
    start_time: Option<Instant>,
}

impl<'a> RuleReasoner<'a> {
    /// Creates a reasoner over the given ontology with default bounds.
    pub fn new(ontology: &'a Ontology) -> Self {
        Self::with_config(ontology, ReasonerConfig::default())
    }

    /// Creates a reasoner with custom bounds.
    pub fn with_config(ontology: &'a Ontology, config: ReasonerConfig) -> Self {
        Self {
            ontology,
            config,
            superclasses: FxHashMap::default(),
            complex_subsumptions: Vec::new(),
            disjoint_pairs: Vec::new(),
            superproperties: FxHashMap::default(),
            data_superproperties: FxHashMap::default(),
            domains: FxHashMap::default(),
            ranges: FxHashMap::default(),
            data_domains: FxHashMap::default(),
            inverses: FxHashMap::default(),
            symmetric: FxHashSet::default(),
            transitive: FxHashSet::default(),
            functional: FxHashSet::default(),
            inverse_functional: FxHashSet::default(),
            irreflexive: FxHashSet::default(),
            asymmetric: FxHashSet::default(),
            types: FxHashMap::default(),
            negative_types: FxHashMap::default(),
            object_values: FxHashMap::default(),
            data_values: FxHashMap::default(),
            same_as: FxHashMap::default(),
            different_from: FxHashSet::default(),
            negative_object: FxHashSet::default(),
            classified: false,
            clash: None,
            start_time: None,
        }
    }

    /// Runs the whole closure computation once.
    fn classify(&mut self) -> Result<(), ReasoningError> {
        if self.classified {
            return Ok(());
        }
        self.start_time = Some(Instant::now());
        self.initialize();
        self.close_hierarchy()?;
        self.run_rules_to_fixpoint()?;
        self.detect_clash();
        self.classified = true;
        debug!(
            individuals = self.types.len(),
            consistent = self.clash.is_none(),
            "closure computed"
        );
        Ok(())
    }

    fn check_timeout(&self) -> Result<(), ReasoningError> {
        if let (Some(timeout), Some(start)) = (self.config.timeout, self.start_time) {
            if start.elapsed() >= timeout {
                return Err(ReasoningError::Timeout(timeout));
            }
        }
        Ok(())
    }

    /// Indexes the ontology's axioms into the rule engine's working state.
    fn initialize(&mut self) {
        for axiom in self.ontology.iter() {
            match axiom {
                Axiom::SubClassOf {
                    sub_class,
                    super_class,
                } => match (sub_class, super_class) {
                    (ClassExpression::Class(sub), ClassExpression::Class(sup)) => {
                        self.superclasses
                            .entry(sub.clone())
                            .or_default()
                            .insert(sup.clone());
                    }
                    (expr, ClassExpression::Class(sup)) => {
                        self.complex_subsumptions.push((expr.clone(), sup.clone()));
                    }
                    // A fully anonymous inclusion cannot feed type
                    // propagation; it still participates in disjointness.
                    _ => {}
                },
                Axiom::EquivalentClasses(classes) => {
                    for first in classes {
                        for second in classes {
                            if first == second {
                                continue;
                            }
                            match (first, second) {
                                (ClassExpression::Class(sub), ClassExpression::Class(sup)) => {
                                    self.superclasses
                                        .entry(sub.clone())
                                        .or_default()
                                        .insert(sup.clone());
                                }
                                (expr, ClassExpression::Class(sup)) => {
                                    self.complex_subsumptions.push((expr.clone(), sup.clone()));
                                }
                                _ => {}
                            }
                        }
                    }
                }
                Axiom::DisjointClasses(classes) => {
                    for (index, first) in classes.iter().enumerate() {
                        for second in &classes[index + 1..] {
                            self.disjoint_pairs.push((first.clone(), second.clone()));
                        }
                    }
                }
                Axiom::ClassAssertion { class, individual } => match class {
                    ClassExpression::Class(class) => {
                        self.types
                            .entry(individual.clone())
                            .or_default()
                            .insert(class.clone());
                    }
                    ClassExpression::ObjectComplementOf(inner) => {
                        if let ClassExpression::Class(class) = inner.as_ref() {
                            self.negative_types
                                .entry(individual.clone())
                                .or_default()
                                .insert(class.clone());
                        }
                    }
                    ClassExpression::ObjectIntersectionOf(members) => {
                        for member in members {
                            if let ClassExpression::Class(class) = member {
                                self.types
                                    .entry(individual.clone())
                                    .or_default()
                                    .insert(class.clone());
                            }
                        }
                    }
                    _ => {}
                },
                Axiom::ObjectPropertyAssertion {
                    property,
                    source,
                    target,
                } => {
                    self.object_values
                        .entry((source.clone(), property.clone()))
                        .or_default()
                        .insert(target.clone());
                }
                Axiom::DataPropertyAssertion {
                    property,
                    source,
                    target,
                } => {
                    self.data_values
                        .entry((source.clone(), property.clone()))
                        .or_default()
                        .insert(target.clone());
                }
                Axiom::NegativeObjectPropertyAssertion {
                    property,
                    source,
                    target,
                } => {
                    self.negative_object
                        .insert((source.clone(), property.clone(), target.clone()));
                }
                Axiom::SubObjectPropertyOf {
                    sub_property: ObjectPropertyExpression::ObjectProperty(sub),
                    super_property: ObjectPropertyExpression::ObjectProperty(sup),
                } => {
                    self.superproperties
                        .entry(sub.clone())
                        .or_default()
                        .insert(sup.clone());
                }
                Axiom::EquivalentObjectProperties(properties) => {
                    for first in properties {
                        for second in properties {
                            if first != second {
                                self.superproperties
                                    .entry(first.clone())
                                    .or_default()
                                    .insert(second.clone());
                            }
                        }
                    }
                }
                Axiom::SubDataPropertyOf {
                    sub_property,
                    super_property,
                } => {
                    self.data_superproperties
                        .entry(sub_property.clone())
                        .or_default()
                        .insert(super_property.clone());
                }
                Axiom::InverseObjectProperties(first, second) => {
                    self.inverses
                        .entry(first.clone())
                        .or_default()
                        .insert(second.clone());
                    self.inverses
                        .entry(second.clone())
                        .or_default()
                        .insert(first.clone());
                }
                Axiom::ObjectPropertyDomain {
                    property,
                    domain: ClassExpression::Class(class),
                } => {
                    self.domains
                        .entry(property.clone())
                        .or_default()
                        .insert(class.clone());
                }
                Axiom::ObjectPropertyRange {
                    property,
                    range: ClassExpression::Class(class),
                } => {
                    self.ranges
                        .entry(property.clone())
                        .or_default()
                        .insert(class.clone());
                }
                Axiom::DataPropertyDomain {
                    property,
                    domain: ClassExpression::Class(class),
                } => {
                    self.data_domains
                        .entry(property.clone())
                        .or_default()
                        .insert(class.clone());
                }
                Axiom::SameIndividual(individuals) => {
                    for first in individuals {
                        for second in individuals {
                            if first != second {
                                self.same_as
                                    .entry(first.clone())
                                    .or_default()
                                    .insert(second.clone());
                            }
                        }
                    }
                }
                Axiom::DifferentIndividuals(individuals) => {
                    for (index, first) in individuals.iter().enumerate() {
                        for second in &individuals[index + 1..] {
                            self.different_from.insert((first.clone(), second.clone()));
                            self.different_from.insert((second.clone(), first.clone()));
                        }
                    }
                }
                Axiom::FunctionalObjectProperty(property) => {
                    self.functional.insert(property.clone());
                }
                Axiom::InverseFunctionalObjectProperty(property) => {
                    self.inverse_functional.insert(property.clone());
                }
                Axiom::SymmetricObjectProperty(property) => {
                    self.symmetric.insert(property.clone());
                }
                Axiom::TransitiveObjectProperty(property) => {
                    self.transitive.insert(property.clone());
                }
                Axiom::AsymmetricObjectProperty(property) => {
                    self.asymmetric.insert(property.clone());
                }
                Axiom::IrreflexiveObjectProperty(property) => {
                    self.irreflexive.insert(property.clone());
                }
                _ => {}
            }
        }
    }

    /// Tests whether the closure supports membership of `individual` in the
    /// given expression.
    fn satisfies(&self, individual: &Individual, expr: &ClassExpression) -> bool {
        match expr {
            ClassExpression::Class(class) => {
                class.iri().as_ref() == vocab::THING
                    || self
                        .types
                        .get(individual)
                        .is_some_and(|types| types.contains(class))
            }
            ClassExpression::ObjectIntersectionOf(members) => members
                .iter()
                .all(|member| self.satisfies(individual, member)),
            ClassExpression::ObjectUnionOf(members) => members
                .iter()
                .any(|member| self.satisfies(individual, member)),
            ClassExpression::ObjectComplementOf(inner) => {
                if let ClassExpression::Class(class) = inner.as_ref() {
                    self.negative_types
                        .get(individual)
                        .is_some_and(|classes| classes.contains(class))
                } else {
                    false
                }
            }
            ClassExpression::ObjectOneOf(individuals) => individuals.contains(individual),
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                let ObjectPropertyExpression::ObjectProperty(property) = property else {
                    return false;
                };
                self.object_values
                    .get(&(individual.clone(), property.clone()))
                    .is_some_and(|targets| {
                        targets.iter().any(|target| self.satisfies(target, filler))
                    })
            }
            ClassExpression::ObjectHasValue {
                property,
                individual: value,
            } => {
                let ObjectPropertyExpression::ObjectProperty(property) = property else {
                    return false;
                };
                self.object_values
                    .get(&(individual.clone(), property.clone()))
                    .is_some_and(|targets| {
                        targets.contains(value)
                            || targets.iter().any(|target| {
                                self.same_as
                                    .get(target)
                                    .is_some_and(|aliases| aliases.contains(value))
                            })
                    })
            }
            ClassExpression::DataHasValue { property, value } => self
                .data_values
                .get(&(individual.clone(), property.clone()))
                .is_some_and(|values| values.contains(value)),
            ClassExpression::DataSomeValuesFrom { property, filler } => self
                .data_values
                .get(&(individual.clone(), property.clone()))
                .is_some_and(|values| match filler {
                    DataRange::Datatype(datatype) => values
                        .iter()
                        .any(|value| value.datatype() == datatype.as_ref()),
                    DataRange::DataOneOf(literals) => {
                        values.iter().any(|value| literals.contains(value))
                    }
                }),
            // Universal and cardinality restrictions need closed-world
            // counting, which this backend does not attempt.
            _ => false,
        }
    }

    /// Looks for contradictions in the computed closure.
    fn detect_clash(&mut self) {
        let nothing = OwlClass::new(vocab::NOTHING.into_owned());
        for (individual, types) in &self.types {
            if types.contains(&nothing) {
                self.clash = Some(format!("{individual} is an instance of owl:Nothing"));
                return;
            }
            if let Some(negated) = self.negative_types.get(individual) {
                if let Some(class) = types.intersection(negated).next() {
                    self.clash = Some(format!(
                        "{individual} is asserted both inside and outside {class}"
                    ));
                    return;
                }
            }
        }

        let individuals: FxHashSet<&Individual> = self.types.keys().collect();
        for (first, second) in &self.disjoint_pairs {
            for individual in &individuals {
                if self.satisfies(individual, first) && self.satisfies(individual, second) {
                    self.clash = Some(format!(
                        "{individual} violates a disjointness between {first:?} and {second:?}"
                    ));
                    return;
                }
            }
        }

        for (first, second) in &self.different_from {
            if self
                .same_as
                .get(first)
                .is_some_and(|aliases| aliases.contains(second))
            {
                self.clash = Some(format!("{first} is both sameAs and differentFrom {second}"));
                return;
            }
        }

        for (source, property, target) in &self.negative_object {
            if self
                .object_values
                .get(&(source.clone(), property.clone()))
                .is_some_and(|targets| targets.contains(target))
            {
                self.clash = Some(format!(
                    "{source} {property} {target} contradicts a negative assertion"
                ));
                return;
            }
        }

        for ((source, property), targets) in &self.object_values {
            if self.irreflexive.contains(property) && targets.contains(source) {
                self.clash = Some(format!("irreflexive {property} relates {source} to itself"));
                return;
            }
            if self.asymmetric.contains(property) {
                for target in targets {
                    if target != source
                        && self
                            .object_values
                            .get(&(target.clone(), property.clone()))
                            .is_some_and(|back| back.contains(source))
                    {
                        self.clash = Some(format!(
                            "asymmetric {property} holds in both directions between {source} and {target}"
                        ));
                        return;
                    }
                }
            }
        }
    }
}

impl Reasoner for RuleReasoner<'_> {
    fn is_consistent(&mut self) -> Result<bool, ReasoningError> {
        self.classify()?;
        Ok(self.clash.is_none())
    }

    fn precompute(&mut self, _kinds: &[InferenceKind]) -> Result<(), ReasoningError> {
        // The closure covers all assertion kinds at once.
        self.classify()
    }

    fn inferred_axioms(
        &mut self,
        kinds: &[InferenceKind],
    ) -> Result<FxHashSet<Axiom>, ReasoningError> {
        self.classify()?;
        let mut inferred = FxHashSet::default();

        if kinds.contains(&InferenceKind::ClassAssertions) {
            for (individual, types) in &self.types {
                for class in types {
                    if class.iri().as_ref() == vocab::THING {
                        continue;
                    }
                    let axiom = Axiom::ClassAssertion {
                        class: ClassExpression::Class(class.clone()),
                        individual: individual.clone(),
                    };
                    if !self.ontology.contains(&axiom) {
                        inferred.insert(axiom);
                    }
                }
            }
        }

        if kinds.contains(&InferenceKind::ObjectPropertyAssertions) {
            for ((source, property), targets) in &self.object_values {
                for target in targets {
                    let axiom = Axiom::ObjectPropertyAssertion {
                        property: property.clone(),
                        source: source.clone(),
                        target: target.clone(),
                    };
                    if !self.ontology.contains(&axiom) {
                        inferred.insert(axiom);
                    }
                }
            }
        }

        if kinds.contains(&InferenceKind::DataPropertyAssertions) {
            for ((source, property), values) in &self.data_values {
                for value in values {
                    let axiom = Axiom::DataPropertyAssertion {
                        property: property.clone(),
                        source: source.clone(),
                        target: value.clone(),
                    };
                    if !self.ontology.contains(&axiom) {
                        inferred.insert(axiom);
                    }
                }
            }
        }

        Ok(inferred)
    }

    fn clash(&self) -> Option<&str> {
        self.clash.as_deref()
    }
}

impl std::fmt::Debug for RuleReasoner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleReasoner")
            .field("classified", &self.classified)
            .field("individuals", &self.types.len())
            .field("clash", &self.clash)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn class(iri: &str) -> OwlClass {
        OwlClass::new(NamedNode::new_unchecked(format!("http://example.org/{iri}")))
    }

    fn property(iri: &str) -> ObjectProperty {
        ObjectProperty::new(NamedNode::new_unchecked(format!("http://example.org/{iri}")))
    }

    fn individual(iri: &str) -> Individual {
        Individual::Named(NamedNode::new_unchecked(format!("http://example.org/{iri}")))
    }

    fn class_assertion(name: &str, individual_name: &str) -> Axiom {
        Axiom::class_assertion(class(name), individual(individual_name))
    }

    #[test]
    fn subclass_types_propagate() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::subclass_of(class("Person"), class("Agent")));
        ontology.insert(class_assertion("Person", "alice"));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner
            .inferred_axioms(&[InferenceKind::ClassAssertions])
            .unwrap();
        assert!(inferred.contains(&class_assertion("Agent", "alice")));
        // The asserted type is not re-reported.
        assert!(!inferred.contains(&class_assertion("Person", "alice")));
    }

    #[test]
    fn schema_axioms_are_never_emitted() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::subclass_of(class("Person"), class("Agent")));
        ontology.insert(Axiom::subclass_of(class("Agent"), class("Thing2")));
        ontology.insert(class_assertion("Person", "alice"));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner.inferred_axioms(&InferenceKind::ALL).unwrap();
        assert!(
            inferred
                .iter()
                .all(|axiom| axiom.inference_kind().is_some())
        );
    }

    #[test]
    fn domain_and_range_type_individuals() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::ObjectPropertyDomain {
            property: property("wrote"),
            domain: ClassExpression::Class(class("Author")),
        });
        ontology.insert(Axiom::ObjectPropertyRange {
            property: property("wrote"),
            range: ClassExpression::Class(class("Work")),
        });
        ontology.insert(Axiom::object_property_assertion(
            property("wrote"),
            individual("sappho"),
            individual("fragment31"),
        ));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner
            .inferred_axioms(&[InferenceKind::ClassAssertions])
            .unwrap();
        assert!(inferred.contains(&class_assertion("Author", "sappho")));
        assert!(inferred.contains(&class_assertion("Work", "fragment31")));
    }

    #[test]
    fn subproperty_and_inverse_propagate_assertions() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::SubObjectPropertyOf {
            sub_property: property("wrote").into(),
            super_property: property("created").into(),
        });
        ontology.insert(Axiom::InverseObjectProperties(
            property("wrote"),
            property("writtenBy"),
        ));
        ontology.insert(Axiom::object_property_assertion(
            property("wrote"),
            individual("sappho"),
            individual("fragment31"),
        ));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner
            .inferred_axioms(&[InferenceKind::ObjectPropertyAssertions])
            .unwrap();
        assert!(inferred.contains(&Axiom::object_property_assertion(
            property("created"),
            individual("sappho"),
            individual("fragment31"),
        )));
        assert!(inferred.contains(&Axiom::object_property_assertion(
            property("writtenBy"),
            individual("fragment31"),
            individual("sappho"),
        )));
    }

    #[test]
    fn transitive_and_symmetric_closure() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::TransitiveObjectProperty(property("ancestorOf")));
        ontology.insert(Axiom::SymmetricObjectProperty(property("knows")));
        ontology.insert(Axiom::object_property_assertion(
            property("ancestorOf"),
            individual("a"),
            individual("b"),
        ));
        ontology.insert(Axiom::object_property_assertion(
            property("ancestorOf"),
            individual("b"),
            individual("c"),
        ));
        ontology.insert(Axiom::object_property_assertion(
            property("knows"),
            individual("a"),
            individual("b"),
        ));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner
            .inferred_axioms(&[InferenceKind::ObjectPropertyAssertions])
            .unwrap();
        assert!(inferred.contains(&Axiom::object_property_assertion(
            property("ancestorOf"),
            individual("a"),
            individual("c"),
        )));
        assert!(inferred.contains(&Axiom::object_property_assertion(
            property("knows"),
            individual("b"),
            individual("a"),
        )));
    }

    #[test]
    fn existential_subsumer_applies() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::subclass_of(
            ClassExpression::some_values_from(
                property("hasPet"),
                ClassExpression::class(class("Dog")),
            ),
            class("DogOwner"),
        ));
        ontology.insert(Axiom::object_property_assertion(
            property("hasPet"),
            individual("alice"),
            individual("fido"),
        ));
        ontology.insert(class_assertion("Dog", "fido"));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner
            .inferred_axioms(&[InferenceKind::ClassAssertions])
            .unwrap();
        assert!(inferred.contains(&class_assertion("DogOwner", "alice")));
    }

    #[test]
    fn complement_assertion_is_a_clash() {
        let mut ontology = Ontology::new(None);
        ontology.insert(class_assertion("Person", "alice"));
        ontology.insert(Axiom::ClassAssertion {
            class: ClassExpression::complement(ClassExpression::class(class("Person"))),
            individual: individual("alice"),
        });

        let mut reasoner = RuleReasoner::new(&ontology);
        assert!(!reasoner.is_consistent().unwrap());
        assert!(reasoner.clash().is_some());
        // Materialization still proceeds on an inconsistent ontology.
        assert!(reasoner.inferred_axioms(&InferenceKind::ALL).is_ok());
    }

    #[test]
    fn disjointness_violation_is_a_clash() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::DisjointClasses(vec![
            ClassExpression::class(class("Person")),
            ClassExpression::class(class("Place")),
        ]));
        ontology.insert(class_assertion("Person", "lesbos"));
        ontology.insert(class_assertion("Place", "lesbos"));

        let mut reasoner = RuleReasoner::new(&ontology);
        assert!(!reasoner.is_consistent().unwrap());
    }

    #[test]
    fn same_as_merges_types() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::SameIndividual(vec![
            individual("sappho"),
            individual("psappho"),
        ]));
        ontology.insert(class_assertion("Poet", "sappho"));

        let mut reasoner = RuleReasoner::new(&ontology);
        let inferred = reasoner
            .inferred_axioms(&[InferenceKind::ClassAssertions])
            .unwrap();
        assert!(inferred.contains(&class_assertion("Poet", "psappho")));
    }

    #[test]
    fn functional_property_merges_targets() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::FunctionalObjectProperty(property("bornIn")));
        ontology.insert(Axiom::DifferentIndividuals(vec![
            individual("lesbos"),
            individual("athens"),
        ]));
        ontology.insert(Axiom::object_property_assertion(
            property("bornIn"),
            individual("sappho"),
            individual("lesbos"),
        ));
        ontology.insert(Axiom::object_property_assertion(
            property("bornIn"),
            individual("sappho"),
            individual("athens"),
        ));

        let mut reasoner = RuleReasoner::new(&ontology);
        // Functional merging makes the two places equal, clashing with the
        // explicit difference.
        assert!(!reasoner.is_consistent().unwrap());
    }

    #[test]
    fn iteration_limit_is_an_error() {
        let mut ontology = Ontology::new(None);
        ontology.insert(Axiom::TransitiveObjectProperty(property("next")));
        for index in 0..20 {
            ontology.insert(Axiom::object_property_assertion(
                property("next"),
                individual(&format!("n{index}")),
                individual(&format!("n{}", index + 1)),
            ));
        }

        let config = ReasonerConfig {
            max_iterations: 1,
            timeout: None,
        };
        let mut reasoner = RuleReasoner::with_config(&ontology, config);
        assert!(matches!(
            reasoner.precompute(&InferenceKind::ALL),
            Err(ReasoningError::IterationLimit(1))
        ));
    }
}
