//! Fixpoint rules of the forward-chaining backend.

use super::RuleReasoner;
use crate::entity::Individual;
use crate::error::ReasoningError;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

impl RuleReasoner<'_> {
    /// Closes the subclass and subproperty hierarchies transitively before
    /// the assertion-level rules run.
    pub(super) fn close_hierarchy(&mut self) -> Result<(), ReasoningError> {
        close_transitively(&mut self.superclasses);
        close_transitively(&mut self.superproperties);
        close_transitively(&mut self.data_superproperties);
        self.check_timeout()
    }

    /// Applies all assertion-level rules until nothing changes. Reaching the
    /// iteration bound before the fixpoint is an error.
    pub(super) fn run_rules_to_fixpoint(&mut self) -> Result<(), ReasoningError> {
        let mut iterations = 0usize;
        loop {
            let mut changed = false;
            changed |= self.propagate_types();
            changed |= self.apply_complex_subsumptions();
            changed |= self.apply_property_hierarchy();
            changed |= self.apply_inverse_rules();
            changed |= self.apply_symmetric_rules();
            changed |= self.apply_transitive_rules();
            changed |= self.apply_domain_range_rules();
            changed |= self.apply_data_rules();
            changed |= self.apply_same_as_rules();
            changed |= self.apply_functional_rules();
            if !changed {
                return Ok(());
            }
            iterations += 1;
            if iterations >= self.config.max_iterations {
                return Err(ReasoningError::IterationLimit(self.config.max_iterations));
            }
            if iterations % 10 == 0 {
                self.check_timeout()?;
            }
        }
    }

    /// Every individual also belongs to the superclasses of its types.
    fn propagate_types(&mut self) -> bool {
        let mut additions = Vec::new();
        for (individual, types) in &self.types {
            for class in types {
                if let Some(superclasses) = self.superclasses.get(class) {
                    for superclass in superclasses {
                        if !types.contains(superclass) {
                            additions.push((individual.clone(), superclass.clone()));
                        }
                    }
                }
            }
        }
        let mut changed = false;
        for (individual, class) in additions {
            changed |= self.types.entry(individual).or_default().insert(class);
        }
        changed
    }

    /// Individuals satisfying an anonymous subsumer gain its named
    /// superclass.
    fn apply_complex_subsumptions(&mut self) -> bool {
        if self.complex_subsumptions.is_empty() {
            return false;
        }
        let individuals = self.known_individuals();
        let mut additions = Vec::new();
        for (expr, class) in &self.complex_subsumptions {
            for individual in &individuals {
                if self
                    .types
                    .get(individual)
                    .is_some_and(|types| types.contains(class))
                {
                    continue;
                }
                if self.satisfies(individual, expr) {
                    additions.push((individual.clone(), class.clone()));
                }
            }
        }
        let mut changed = false;
        for (individual, class) in additions {
            changed |= self.types.entry(individual).or_default().insert(class);
        }
        changed
    }

    /// Assertions also hold for every superproperty.
    fn apply_property_hierarchy(&mut self) -> bool {
        let mut additions = Vec::new();
        for ((source, property), targets) in &self.object_values {
            if let Some(superproperties) = self.superproperties.get(property) {
                for superproperty in superproperties {
                    for target in targets {
                        additions.push((source.clone(), superproperty.clone(), target.clone()));
                    }
                }
            }
        }
        let mut changed = false;
        for (source, property, target) in additions {
            changed |= self
                .object_values
                .entry((source, property))
                .or_default()
                .insert(target);
        }
        changed
    }

    /// `x P y` entails `y Q x` for every inverse Q of P.
    fn apply_inverse_rules(&mut self) -> bool {
        let mut additions = Vec::new();
        for ((source, property), targets) in &self.object_values {
            if let Some(inverses) = self.inverses.get(property) {
                for inverse in inverses {
                    for target in targets {
                        additions.push((target.clone(), inverse.clone(), source.clone()));
                    }
                }
            }
        }
        let mut changed = false;
        for (source, property, target) in additions {
            changed |= self
                .object_values
                .entry((source, property))
                .or_default()
                .insert(target);
        }
        changed
    }

    fn apply_symmetric_rules(&mut self) -> bool {
        let mut additions = Vec::new();
        for ((source, property), targets) in &self.object_values {
            if self.symmetric.contains(property) {
                for target in targets {
                    additions.push((target.clone(), property.clone(), source.clone()));
                }
            }
        }
        let mut changed = false;
        for (source, property, target) in additions {
            changed |= self
                .object_values
                .entry((source, property))
                .or_default()
                .insert(target);
        }
        changed
    }

    /// `x P y` and `y P z` entail `x P z` for transitive P.
    fn apply_transitive_rules(&mut self) -> bool {
        let mut additions = Vec::new();
        for ((source, property), targets) in &self.object_values {
            if !self.transitive.contains(property) {
                continue;
            }
            for target in targets {
                if let Some(indirect) = self
                    .object_values
                    .get(&(target.clone(), property.clone()))
                {
                    for further in indirect {
                        if !targets.contains(further) {
                            additions.push((source.clone(), property.clone(), further.clone()));
                        }
                    }
                }
            }
        }
        let mut changed = false;
        for (source, property, target) in additions {
            changed |= self
                .object_values
                .entry((source, property))
                .or_default()
                .insert(target);
        }
        changed
    }

    /// Domains type sources, ranges type targets.
    fn apply_domain_range_rules(&mut self) -> bool {
        let mut additions = Vec::new();
        for ((source, property), targets) in &self.object_values {
            if let Some(domains) = self.domains.get(property) {
                for class in domains {
                    additions.push((source.clone(), class.clone()));
                }
            }
            if let Some(ranges) = self.ranges.get(property) {
                for class in ranges {
                    for target in targets {
                        additions.push((target.clone(), class.clone()));
                    }
                }
            }
        }
        let mut changed = false;
        for (individual, class) in additions {
            changed |= self.types.entry(individual).or_default().insert(class);
        }
        changed
    }

    /// Subproperty and domain rules for data assertions.
    fn apply_data_rules(&mut self) -> bool {
        let mut value_additions = Vec::new();
        let mut type_additions = Vec::new();
        for ((source, property), values) in &self.data_values {
            if let Some(superproperties) = self.data_superproperties.get(property) {
                for superproperty in superproperties {
                    for value in values {
                        value_additions.push((source.clone(), superproperty.clone(), value.clone()));
                    }
                }
            }
            if let Some(domains) = self.data_domains.get(property) {
                for class in domains {
                    type_additions.push((source.clone(), class.clone()));
                }
            }
        }
        let mut changed = false;
        for (source, property, value) in value_additions {
            changed |= self
                .data_values
                .entry((source, property))
                .or_default()
                .insert(value);
        }
        for (individual, class) in type_additions {
            changed |= self.types.entry(individual).or_default().insert(class);
        }
        changed
    }

    /// Closes the sameAs relation and copies assertions between equals.
    fn apply_same_as_rules(&mut self) -> bool {
        let mut changed = close_transitively_once(&mut self.same_as);
        changed |= symmetrize(&mut self.same_as);

        let mut type_additions = Vec::new();
        let mut value_additions = Vec::new();
        let mut data_additions = Vec::new();
        for (individual, aliases) in &self.same_as {
            for alias in aliases {
                if let Some(types) = self.types.get(individual) {
                    for class in types {
                        type_additions.push((alias.clone(), class.clone()));
                    }
                }
            }
        }
        for ((source, property), targets) in &self.object_values {
            if let Some(aliases) = self.same_as.get(source) {
                for alias in aliases {
                    for target in targets {
                        value_additions.push((alias.clone(), property.clone(), target.clone()));
                    }
                }
            }
            for target in targets {
                if let Some(aliases) = self.same_as.get(target) {
                    for alias in aliases {
                        value_additions.push((source.clone(), property.clone(), alias.clone()));
                    }
                }
            }
        }
        for ((source, property), values) in &self.data_values {
            if let Some(aliases) = self.same_as.get(source) {
                for alias in aliases {
                    for value in values {
                        data_additions.push((alias.clone(), property.clone(), value.clone()));
                    }
                }
            }
        }

        for (individual, class) in type_additions {
            changed |= self.types.entry(individual).or_default().insert(class);
        }
        for (source, property, target) in value_additions {
            changed |= self
                .object_values
                .entry((source, property))
                .or_default()
                .insert(target);
        }
        for (source, property, value) in data_additions {
            changed |= self
                .data_values
                .entry((source, property))
                .or_default()
                .insert(value);
        }
        changed
    }

    /// Functional properties merge multiple targets, inverse-functional
    /// properties merge multiple sources.
    fn apply_functional_rules(&mut self) -> bool {
        let mut merges = Vec::new();
        for ((_, property), targets) in &self.object_values {
            if self.functional.contains(property) && targets.len() > 1 {
                let targets: Vec<_> = targets.iter().cloned().collect();
                for (index, first) in targets.iter().enumerate() {
                    for second in &targets[index + 1..] {
                        merges.push((first.clone(), second.clone()));
                    }
                }
            }
        }
        let mut sources_by_target: FxHashMap<_, Vec<&Individual>> = FxHashMap::default();
        for ((source, property), targets) in &self.object_values {
            if self.inverse_functional.contains(property) {
                for target in targets {
                    sources_by_target
                        .entry((property.clone(), target.clone()))
                        .or_default()
                        .push(source);
                }
            }
        }
        for sources in sources_by_target.values() {
            for (index, first) in sources.iter().enumerate() {
                for second in &sources[index + 1..] {
                    if first != second {
                        merges.push(((*first).clone(), (*second).clone()));
                    }
                }
            }
        }

        let mut changed = false;
        for (first, second) in merges {
            if first == second {
                continue;
            }
            changed |= self
                .same_as
                .entry(first.clone())
                .or_default()
                .insert(second.clone());
            changed |= self.same_as.entry(second).or_default().insert(first);
        }
        changed
    }

    /// All individuals the closure has seen so far.
    fn known_individuals(&self) -> Vec<Individual> {
        let mut individuals: FxHashSet<Individual> = self.types.keys().cloned().collect();
        for ((source, _), targets) in &self.object_values {
            individuals.insert(source.clone());
            individuals.extend(targets.iter().cloned());
        }
        for (source, _) in self.data_values.keys() {
            individuals.insert(source.clone());
        }
        individuals.into_iter().collect()
    }
}

/// Saturates a set-valued map under transitivity.
fn close_transitively<K: Clone + Eq + Hash>(map: &mut FxHashMap<K, FxHashSet<K>>) {
    while close_transitively_once(map) {}
}

/// One round of transitive propagation; reports whether anything changed.
fn close_transitively_once<K: Clone + Eq + Hash>(map: &mut FxHashMap<K, FxHashSet<K>>) -> bool {
    let mut additions = Vec::new();
    for (key, values) in map.iter() {
        for value in values {
            if let Some(indirect) = map.get(value) {
                for target in indirect {
                    if target != key && !values.contains(target) {
                        additions.push((key.clone(), target.clone()));
                    }
                }
            }
        }
    }
    let mut changed = false;
    for (key, value) in additions {
        changed |= map.entry(key).or_default().insert(value);
    }
    changed
}

/// Makes a set-valued map symmetric.
fn symmetrize<K: Clone + Eq + Hash>(map: &mut FxHashMap<K, FxHashSet<K>>) -> bool {
    let mut additions = Vec::new();
    for (key, values) in map.iter() {
        for value in values {
            if !map.get(value).is_some_and(|back| back.contains(key)) {
                additions.push((value.clone(), key.clone()));
            }
        }
    }
    let mut changed = false;
    for (key, value) in additions {
        changed |= map.entry(key).or_default().insert(value);
    }
    changed
}
