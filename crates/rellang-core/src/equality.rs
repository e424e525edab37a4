//! Structural equality over type trees.
//!
//! Two trees are equal when their tags match and all corresponding children
//! are equal, left to right. `A * B` and `B * A` are different sets, and a
//! `DefinedRef` only equals another reference to the same name.
//!
//! `PartialEq` for the tree types delegates here.

use crate::{DomCod, RelationType, SetType};

pub trait StructuralEq {
    fn structurally_eq(&self, other: &Self) -> bool;
}

impl StructuralEq for SetType {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SetType::Atomic { name: a }, SetType::Atomic { name: b })
            | (SetType::DefinedRef { name: a }, SetType::DefinedRef { name: b }) => a == b,
            (
                SetType::Product { left: l1, right: r1 },
                SetType::Product { left: l2, right: r2 },
            )
            | (
                SetType::Coproduct { left: l1, right: r1 },
                SetType::Coproduct { left: l2, right: r2 },
            ) => l1.structurally_eq(l2) && r1.structurally_eq(r2),
            _ => false,
        }
    }
}

impl StructuralEq for DomCod {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.domain().structurally_eq(other.domain())
            && self.codomain().structurally_eq(other.codomain())
    }
}

impl StructuralEq for RelationType {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                RelationType::Atomic { name: n1, dom_cod: t1 },
                RelationType::Atomic { name: n2, dom_cod: t2 },
            )
            | (
                RelationType::Defined { name: n1, dom_cod: t1 },
                RelationType::Defined { name: n2, dom_cod: t2 },
            ) => n1 == n2 && t1.structurally_eq(t2),
            (
                RelationType::Composition { left: l1, right: r1, dom_cod: t1 },
                RelationType::Composition { left: l2, right: r2, dom_cod: t2 },
            )
            | (
                RelationType::Product { left: l1, right: r1, dom_cod: t1 },
                RelationType::Product { left: l2, right: r2, dom_cod: t2 },
            )
            | (
                RelationType::Coproduct { left: l1, right: r1, dom_cod: t1 },
                RelationType::Coproduct { left: l2, right: r2, dom_cod: t2 },
            ) => l1.structurally_eq(l2) && r1.structurally_eq(r2) && t1.structurally_eq(t2),
            _ => false,
        }
    }
}

macro_rules! structural_partial_eq {
    ($($ty:ty),*) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.structurally_eq(other)
                }
            }

            impl Eq for $ty {}
        )*
    };
}

structural_partial_eq!(SetType, DomCod, RelationType);
