//! Surface-syntax rendering of type trees.
//!
//! Output re-parses to the same tree: operators are left-associative, so a
//! right operand of equal precedence is parenthesized, as is any operand of
//! lower precedence.

use std::fmt;

use crate::{DomCod, RelationType, SetType};

impl SetType {
    fn precedence(&self) -> u8 {
        match self {
            SetType::Coproduct { .. } => 1,
            SetType::Product { .. } => 2,
            SetType::Atomic { .. } | SetType::DefinedRef { .. } => 3,
        }
    }
}

impl RelationType {
    /// Annotated atomics are always parenthesized as operands, hence 0.
    fn precedence(&self) -> u8 {
        match self {
            RelationType::Atomic { .. } => 0,
            RelationType::Composition { .. } => 1,
            RelationType::Coproduct { .. } => 2,
            RelationType::Product { .. } => 3,
            RelationType::Defined { .. } => 4,
        }
    }
}

fn write_operand<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    operand: &T,
    operand_prec: u8,
    parent_prec: u8,
    is_right: bool,
) -> fmt::Result {
    let needs_parens = operand_prec < parent_prec || (is_right && operand_prec == parent_prec);
    if needs_parens {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right, op) = match self {
            SetType::Atomic { name } | SetType::DefinedRef { name } => return f.write_str(name),
            SetType::Product { left, right } => (left, right, " * "),
            SetType::Coproduct { left, right } => (left, right, " + "),
        };
        let prec = self.precedence();
        write_operand(f, left, left.precedence(), prec, false)?;
        f.write_str(op)?;
        write_operand(f, right, right.precedence(), prec, true)
    }
}

impl fmt::Display for DomCod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.domain(), self.codomain())
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right, op) = match self {
            RelationType::Atomic { name, dom_cod } => return write!(f, "{name} : {dom_cod}"),
            RelationType::Defined { name, .. } => return f.write_str(name),
            RelationType::Composition { left, right, .. } => (left, right, " ; "),
            RelationType::Product { left, right, .. } => (left, right, " * "),
            RelationType::Coproduct { left, right, .. } => (left, right, " + "),
        };
        let prec = self.precedence();
        write_operand(f, left, left.precedence(), prec, false)?;
        f.write_str(op)?;
        write_operand(f, right, right.precedence(), prec, true)
    }
}
