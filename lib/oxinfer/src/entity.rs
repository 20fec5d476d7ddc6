//! OWL 2 entity types (classes, properties, individuals).

use oxrdf::{BlankNode, NamedNode, Subject, Term};
use std::fmt;

/// An OWL class (owl:Class).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwlClass(NamedNode);

/// An OWL object property (owl:ObjectProperty), relating individuals to individuals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectProperty(NamedNode);

/// An OWL data property (owl:DatatypeProperty), relating individuals to literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataProperty(NamedNode);

/// An OWL annotation property (owl:AnnotationProperty).
///
/// Annotation properties carry metadata and have no semantic meaning in reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationProperty(NamedNode);

macro_rules! iri_entity {
    ($ty:ident) => {
        impl $ty {
            /// Creates a new entity from a named node.
            #[inline]
            pub fn new(iri: NamedNode) -> Self {
                Self(iri)
            }

            /// Creates a new entity from an IRI string.
            #[inline]
            pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, oxiri::IriParseError> {
                Ok(Self(NamedNode::new(iri)?))
            }

            /// Returns the IRI of this entity.
            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            /// Converts this entity into its underlying named node.
            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<NamedNode> for $ty {
            fn from(node: NamedNode) -> Self {
                Self(node)
            }
        }

        impl From<$ty> for NamedNode {
            fn from(entity: $ty) -> Self {
                entity.0
            }
        }

        impl From<$ty> for Term {
            fn from(entity: $ty) -> Self {
                entity.0.into()
            }
        }

        impl AsRef<NamedNode> for $ty {
            fn as_ref(&self) -> &NamedNode {
                &self.0
            }
        }
    };
}

iri_entity!(OwlClass);
iri_entity!(ObjectProperty);
iri_entity!(DataProperty);
iri_entity!(AnnotationProperty);

/// An OWL individual, either named (IRI) or anonymous (blank node).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    /// A named individual.
    Named(NamedNode),
    /// An anonymous individual.
    Anonymous(BlankNode),
}

impl Individual {
    /// Returns `true` if this is a named individual.
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// Returns the named node if this is a named individual.
    #[inline]
    pub fn as_named(&self) -> Option<&NamedNode> {
        match self {
            Self::Named(n) => Some(n),
            Self::Anonymous(_) => None,
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => n.fmt(f),
            Self::Anonymous(b) => b.fmt(f),
        }
    }
}

impl From<NamedNode> for Individual {
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<BlankNode> for Individual {
    fn from(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }
}

impl From<Individual> for Term {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}

impl From<Individual> for Subject {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(n) => n.into(),
            Individual::Anonymous(b) => b.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owl_class_accessors() {
        let iri = NamedNode::new_unchecked("http://example.org/Person");
        let class = OwlClass::new(iri.clone());
        assert_eq!(class.iri(), &iri);
        assert_eq!(class.to_string(), iri.to_string());
        assert_eq!(class.clone().into_inner(), iri);
    }

    #[test]
    fn entity_from_iri_string() {
        assert!(ObjectProperty::new_from_iri("http://example.org/knows").is_ok());
        assert!(DataProperty::new_from_iri("not an iri").is_err());
    }

    #[test]
    fn individual_named_and_anonymous() {
        let iri = NamedNode::new_unchecked("http://example.org/alice");
        let named = Individual::Named(iri.clone());
        assert!(named.is_named());
        assert_eq!(named.as_named(), Some(&iri));

        let anon = Individual::Anonymous(BlankNode::default());
        assert!(!anon.is_named());
        assert_eq!(anon.as_named(), None);
    }

    #[test]
    fn conversions() {
        let iri = NamedNode::new_unchecked("http://example.org/Work");
        let class: OwlClass = iri.clone().into();
        let term: Term = class.into();
        assert_eq!(term, Term::NamedNode(iri));
    }
}
