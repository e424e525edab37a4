use std::fmt;

use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Syntax errors come before semantic ones: analysis only runs on programs
/// that parsed cleanly, so a semantic diagnostic never shares a span with a
/// syntax one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascades through the rest of the statement
    UnclosedParen,

    // User omitted something required
    ExpectedExpression,
    ExpectedSetExpression,
    ExpectedIdentifier,
    ExpectedArrow,
    ExpectedDefEquals,

    // User wrote something that doesn't belong
    UnexpectedToken,
    MissingSeparator,

    // Valid syntax, invalid semantics
    NameCollision,
    UndefinedName,
    CompositionTypeMismatch,
    AnnotationMismatch,
    ExplicitAnnotationMismatch,
}

impl DiagnosticKind {
    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",

            Self::ExpectedExpression => "expected a relation expression",
            Self::ExpectedSetExpression => "expected a set expression",
            Self::ExpectedIdentifier => "expected a name",
            Self::ExpectedArrow => "expected `->`",
            Self::ExpectedDefEquals => "expected `:=`",

            Self::UnexpectedToken => "unexpected token",
            Self::MissingSeparator => "statements must be separated by a newline",

            Self::NameCollision => "name is already in use",
            Self::UndefinedName => "undefined name",
            Self::CompositionTypeMismatch => "type mismatch in composition",
            Self::AnnotationMismatch => "annotation does not match the definition",
            Self::ExplicitAnnotationMismatch => "type mismatch",
        }
    }

    /// Template for custom messages: fallback followed by the detail.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) => format!("{}: {}", self.fallback_message(), detail),
            None => self.fallback_message().to_string(),
        }
    }

    pub fn is_semantic(&self) -> bool {
        *self >= Self::NameCollision
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.fallback_message().to_string(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: {} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}
