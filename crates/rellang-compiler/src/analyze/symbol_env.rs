//! Names bound while checking one program.
//!
//! A name is "used" once it is defined or first appears as a primitive
//! (undeclared) atom. Definitions may only bind names that were never used.

use indexmap::{IndexMap, IndexSet};
use rellang_core::{RelationType, SetType};

use super::error::{AnalyzeError, NameKind};

/// Keywords that can never be bound.
pub const RESERVED_NAMES: [&str; 2] = ["set", "rel"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEnvironment {
    set_definitions: IndexMap<String, SetType>,
    rel_definitions: IndexMap<String, RelationType>,
    used_names: IndexSet<String>,
}

impl Default for SymbolEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolEnvironment {
    pub fn new() -> Self {
        Self {
            set_definitions: IndexMap::new(),
            rel_definitions: IndexMap::new(),
            used_names: RESERVED_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn define_set(&mut self, name: &str, body: SetType) -> Result<(), AnalyzeError> {
        self.claim(name)?;
        log::debug!("defined set `{name}` := {body}");
        self.set_definitions.insert(name.to_string(), body);
        Ok(())
    }

    pub fn define_rel(&mut self, name: &str, body: RelationType) -> Result<(), AnalyzeError> {
        self.claim(name)?;
        log::debug!("defined relation `{name}` : {}", body.dom_cod());
        self.rel_definitions.insert(name.to_string(), body);
        Ok(())
    }

    fn claim(&mut self, name: &str) -> Result<(), AnalyzeError> {
        if !self.used_names.insert(name.to_string()) {
            return Err(AnalyzeError::NameCollision {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Never fails; repeated uses are no-ops.
    pub fn use_name(&mut self, name: &str) {
        if !self.used_names.contains(name) {
            self.used_names.insert(name.to_string());
        }
    }

    pub fn lookup_set(&self, name: &str) -> Result<&SetType, AnalyzeError> {
        self.set_definitions
            .get(name)
            .ok_or_else(|| AnalyzeError::UndefinedName {
                name: name.to_string(),
                kind: NameKind::Set,
            })
    }

    pub fn lookup_rel(&self, name: &str) -> Result<&RelationType, AnalyzeError> {
        self.rel_definitions
            .get(name)
            .ok_or_else(|| AnalyzeError::UndefinedName {
                name: name.to_string(),
                kind: NameKind::Relation,
            })
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    pub fn contains_set(&self, name: &str) -> bool {
        self.set_definitions.contains_key(name)
    }

    pub fn contains_rel(&self, name: &str) -> bool {
        self.rel_definitions.contains_key(name)
    }

    /// Set definitions in definition order.
    pub fn set_definitions(&self) -> impl Iterator<Item = (&str, &SetType)> {
        self.set_definitions
            .iter()
            .map(|(name, body)| (name.as_str(), body))
    }

    /// Relation definitions in definition order.
    pub fn rel_definitions(&self) -> impl Iterator<Item = (&str, &RelationType)> {
        self.rel_definitions
            .iter()
            .map(|(name, body)| (name.as_str(), body))
    }

    /// Reserved names first, then every name in order of first use.
    pub fn used_names(&self) -> impl Iterator<Item = &str> {
        self.used_names.iter().map(String::as_str)
    }
}
