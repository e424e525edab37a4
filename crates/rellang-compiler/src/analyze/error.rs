use std::fmt;

use rellang_core::{DomCod, SetType};

use crate::diagnostics::DiagnosticKind;

/// What a name was expected to denote at a use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Set,
    Relation,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Set => f.write_str("set"),
            NameKind::Relation => f.write_str("relation"),
        }
    }
}

/// First semantic inconsistency found in a program. Carries the conflicting
/// types verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("name is already in use: `{name}`")]
    NameCollision { name: String },

    #[error("undefined name: no {kind} named `{name}`")]
    UndefinedName { name: String, kind: NameKind },

    #[error("type mismatch in composition: {left_codomain} ≠ {right_domain}")]
    CompositionTypeMismatch {
        left_codomain: SetType,
        right_domain: SetType,
    },

    #[error(
        "annotation does not match the definition: `{name}` is declared as {declared} but annotated as {inline}"
    )]
    AnnotationMismatch {
        name: String,
        declared: DomCod,
        inline: DomCod,
    },

    #[error(
        "type mismatch: expression has type {inferred} but was declared with type {declared}"
    )]
    ExplicitAnnotationMismatch { inferred: DomCod, declared: DomCod },
}

impl AnalyzeError {
    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            AnalyzeError::NameCollision { .. } => DiagnosticKind::NameCollision,
            AnalyzeError::UndefinedName { .. } => DiagnosticKind::UndefinedName,
            AnalyzeError::CompositionTypeMismatch { .. } => {
                DiagnosticKind::CompositionTypeMismatch
            }
            AnalyzeError::AnnotationMismatch { .. } => DiagnosticKind::AnnotationMismatch,
            AnalyzeError::ExplicitAnnotationMismatch { .. } => {
                DiagnosticKind::ExplicitAnnotationMismatch
            }
        }
    }

    /// Message detail for the diagnostic; the kind's fallback message is the prefix.
    pub fn detail(&self) -> String {
        match self {
            AnalyzeError::NameCollision { name } => format!("`{name}`"),
            AnalyzeError::UndefinedName { name, kind } => format!("no {kind} named `{name}`"),
            AnalyzeError::CompositionTypeMismatch {
                left_codomain,
                right_domain,
            } => format!("{left_codomain} ≠ {right_domain}"),
            AnalyzeError::AnnotationMismatch {
                name,
                declared,
                inline,
            } => format!("`{name}` is declared as {declared} but annotated as {inline}"),
            AnalyzeError::ExplicitAnnotationMismatch { inferred, declared } => format!(
                "expression has type {inferred} but was declared with type {declared}"
            ),
        }
    }
}
