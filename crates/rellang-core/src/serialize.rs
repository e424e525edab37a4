//! JSON shape of checked programs.
//!
//! ```text
//! {"type": "program", "expr": [{"expr": <statement>}, ...]}
//! ```
//!
//! A statement is either a definition (`"type": "definition"`, with
//! `expr_type` set to `set` or `relation`) or a relation node. Every relation
//! node carries `"type": "relation"`, an `operation` and its `dom_cod`; atomic
//! relations name themselves with `rel_name`. Set nodes are plain
//! `operation`-tagged objects.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::{Definition, Program, RelationType, Statement};

impl Serialize for RelationType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.operands().is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("RelationType", len)?;
        state.serialize_field("type", "relation")?;
        match self {
            RelationType::Atomic { name, .. } => {
                state.serialize_field("operation", "atomic")?;
                state.serialize_field("rel_name", name)?;
            }
            RelationType::Defined { name, .. } => {
                state.serialize_field("operation", "defined")?;
                state.serialize_field("name", name)?;
            }
            RelationType::Composition { left, right, .. }
            | RelationType::Product { left, right, .. }
            | RelationType::Coproduct { left, right, .. } => {
                state.serialize_field("operation", operation(self))?;
                state.serialize_field("left", left)?;
                state.serialize_field("right", right)?;
            }
        }
        state.serialize_field("dom_cod", self.dom_cod())?;
        state.end()
    }
}

fn operation(relation: &RelationType) -> &'static str {
    match relation {
        RelationType::Atomic { .. } => "atomic",
        RelationType::Defined { .. } => "defined",
        RelationType::Composition { .. } => "composition",
        RelationType::Product { .. } => "product",
        RelationType::Coproduct { .. } => "coproduct",
    }
}

impl Serialize for Definition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Definition", 4)?;
        state.serialize_field("type", "definition")?;
        match self {
            Definition::Set { name, body } => {
                state.serialize_field("expr_type", "set")?;
                state.serialize_field("name", name)?;
                state.serialize_field("body", body)?;
            }
            Definition::Rel { name, body } => {
                state.serialize_field("expr_type", "relation")?;
                state.serialize_field("name", name)?;
                state.serialize_field("body", body)?;
            }
        }
        state.end()
    }
}

impl Serialize for Statement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Statement::Definition(def) => def.serialize(serializer),
            Statement::Relation(rel) => rel.serialize(serializer),
        }
    }
}

/// One entry of the program's `expr` list.
#[derive(Serialize)]
struct StatementEntry<'a> {
    expr: &'a Statement,
}

impl Serialize for Program {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<_> = self.iter().map(|expr| StatementEntry { expr }).collect();

        let mut state = serializer.serialize_struct("Program", 2)?;
        state.serialize_field("type", "program")?;
        state.serialize_field("expr", &entries)?;
        state.end()
    }
}
