//! Checked programs: the analyzer's output.

use crate::{RelationType, SetType};

/// A `set` or `rel` binding, recorded once per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Set { name: String, body: SetType },
    Rel { name: String, body: RelationType },
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Self::Set { name, .. } | Self::Rel { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Definition(Definition),
    Relation(RelationType),
}

impl Statement {
    pub fn as_definition(&self) -> Option<&Definition> {
        match self {
            Self::Definition(def) => Some(def),
            Self::Relation(_) => None,
        }
    }

    /// The typed relation of an expression statement or a `rel` definition.
    pub fn as_relation(&self) -> Option<&RelationType> {
        match self {
            Self::Relation(rel) | Self::Definition(Definition::Rel { body: rel, .. }) => Some(rel),
            Self::Definition(Definition::Set { .. }) => None,
        }
    }
}

/// Statements in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }
}

impl IntoIterator for Program {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
