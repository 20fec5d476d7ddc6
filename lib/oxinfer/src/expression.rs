//! OWL 2 class expressions, object property expressions, and data ranges.

use crate::entity::{DataProperty, Individual, ObjectProperty, OwlClass};
use oxrdf::{Literal, NamedNode};

/// An OWL 2 class expression.
///
/// Covers the constructs that appear in the ontologies this pipeline consumes:
/// named classes, boolean combinations, enumerations and property restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named (atomic) class.
    Class(OwlClass),
    /// ObjectIntersectionOf(C1, ..., Cn)
    ObjectIntersectionOf(Vec<ClassExpression>),
    /// ObjectUnionOf(C1, ..., Cn)
    ObjectUnionOf(Vec<ClassExpression>),
    /// ObjectComplementOf(C)
    ObjectComplementOf(Box<ClassExpression>),
    /// ObjectOneOf(a1, ..., an)
    ObjectOneOf(Vec<Individual>),
    /// ObjectSomeValuesFrom(P, C)
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    /// ObjectAllValuesFrom(P, C)
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    /// ObjectHasValue(P, a)
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },
    /// ObjectMinCardinality(n, P) or ObjectMinCardinality(n, P, C)
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// ObjectMaxCardinality(n, P) or ObjectMaxCardinality(n, P, C)
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// ObjectExactCardinality(n, P) or ObjectExactCardinality(n, P, C)
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// DataSomeValuesFrom(P, D)
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    /// DataAllValuesFrom(P, D)
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    /// DataHasValue(P, v)
    DataHasValue {
        property: DataProperty,
        value: Literal,
    },
}

impl ClassExpression {
    /// Creates a named class expression.
    pub fn class(class: impl Into<OwlClass>) -> Self {
        Self::Class(class.into())
    }

    /// Creates an intersection of class expressions.
    pub fn intersection(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(classes)
    }

    /// Creates a union of class expressions.
    pub fn union(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectUnionOf(classes)
    }

    /// Creates the complement of a class expression.
    pub fn complement(class: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(class))
    }

    /// Creates an existential restriction.
    pub fn some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// Returns `true` if this is a named class.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// Returns the named class if this is one.
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(class: OwlClass) -> Self {
        Self::Class(class)
    }
}

/// An OWL 2 object property expression: a named property or its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    /// A named object property.
    ObjectProperty(ObjectProperty),
    /// ObjectInverseOf(P)
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// Creates an inverse property expression.
    pub fn inverse(property: ObjectProperty) -> Self {
        Self::ObjectInverseOf(property)
    }

    /// Returns `true` if this is a named property (not an inverse).
    pub fn is_named(&self) -> bool {
        matches!(self, Self::ObjectProperty(_))
    }

    /// Returns the underlying named property, inverse or not.
    pub fn base_property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::ObjectInverseOf(p) => p,
        }
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(property: ObjectProperty) -> Self {
        Self::ObjectProperty(property)
    }
}

/// An OWL 2 data range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    /// A named datatype (e.g. xsd:string).
    Datatype(NamedNode),
    /// DataOneOf(v1, ..., vn)
    DataOneOf(Vec<Literal>),
}

impl DataRange {
    /// Returns the datatype if this is a simple named datatype.
    pub fn as_datatype(&self) -> Option<&NamedNode> {
        match self {
            Self::Datatype(dt) => Some(dt),
            Self::DataOneOf(_) => None,
        }
    }
}

impl From<NamedNode> for DataRange {
    fn from(node: NamedNode) -> Self {
        Self::Datatype(node)
    }
}
