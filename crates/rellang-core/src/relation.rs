//! Typed relation expressions.
//!
//! Every node owns the `DomCod` the analyzer resolved for it. Constructors take
//! that `DomCod` as given; they never derive it from the operands.

use serde::Serialize;

use crate::SetType;

/// Domain and codomain of a relation.
#[derive(Debug, Clone, Serialize)]
pub struct DomCod {
    domain: SetType,
    codomain: SetType,
}

impl DomCod {
    pub fn new(domain: SetType, codomain: SetType) -> Self {
        Self { domain, codomain }
    }

    pub fn domain(&self) -> &SetType {
        &self.domain
    }

    pub fn codomain(&self) -> &SetType {
        &self.codomain
    }
}

#[derive(Debug, Clone)]
pub enum RelationType {
    /// A fresh relation name with an inline annotation: `R : A -> B`.
    Atomic { name: String, dom_cod: DomCod },
    /// A reference to a `rel` definition; `dom_cod` is copied from it.
    Defined { name: String, dom_cod: DomCod },
    /// `left ; right`
    Composition {
        left: Box<RelationType>,
        right: Box<RelationType>,
        dom_cod: DomCod,
    },
    /// `left * right`
    Product {
        left: Box<RelationType>,
        right: Box<RelationType>,
        dom_cod: DomCod,
    },
    /// `left + right`
    Coproduct {
        left: Box<RelationType>,
        right: Box<RelationType>,
        dom_cod: DomCod,
    },
}

impl RelationType {
    pub fn atomic(name: impl Into<String>, dom_cod: DomCod) -> Self {
        Self::Atomic {
            name: name.into(),
            dom_cod,
        }
    }

    pub fn defined(name: impl Into<String>, dom_cod: DomCod) -> Self {
        Self::Defined {
            name: name.into(),
            dom_cod,
        }
    }

    pub fn composition(left: RelationType, right: RelationType, dom_cod: DomCod) -> Self {
        Self::Composition {
            left: Box::new(left),
            right: Box::new(right),
            dom_cod,
        }
    }

    pub fn product(left: RelationType, right: RelationType, dom_cod: DomCod) -> Self {
        Self::Product {
            left: Box::new(left),
            right: Box::new(right),
            dom_cod,
        }
    }

    pub fn coproduct(left: RelationType, right: RelationType, dom_cod: DomCod) -> Self {
        Self::Coproduct {
            left: Box::new(left),
            right: Box::new(right),
            dom_cod,
        }
    }

    pub fn dom_cod(&self) -> &DomCod {
        match self {
            Self::Atomic { dom_cod, .. }
            | Self::Defined { dom_cod, .. }
            | Self::Composition { dom_cod, .. }
            | Self::Product { dom_cod, .. }
            | Self::Coproduct { dom_cod, .. } => dom_cod,
        }
    }

    pub fn domain(&self) -> &SetType {
        self.dom_cod().domain()
    }

    pub fn codomain(&self) -> &SetType {
        self.dom_cod().codomain()
    }

    /// Relation name of an atomic or defined node.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Atomic { name, .. } | Self::Defined { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn operands(&self) -> Option<(&RelationType, &RelationType)> {
        match self {
            Self::Composition { left, right, .. }
            | Self::Product { left, right, .. }
            | Self::Coproduct { left, right, .. } => Some((left, right)),
            Self::Atomic { .. } | Self::Defined { .. } => None,
        }
    }
}
