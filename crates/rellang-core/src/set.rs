use serde::Serialize;

/// A set expression.
///
/// `DefinedRef` names a `set` definition and is compared by name only: the
/// body of the definition is never inlined.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum SetType {
    /// A primitive set, never declared.
    Atomic { name: String },
    /// A reference to a declared set.
    #[serde(rename = "defined")]
    DefinedRef { name: String },
    Product {
        left: Box<SetType>,
        right: Box<SetType>,
    },
    Coproduct {
        left: Box<SetType>,
        right: Box<SetType>,
    },
}

impl SetType {
    pub fn atomic(name: impl Into<String>) -> Self {
        Self::Atomic { name: name.into() }
    }

    pub fn defined(name: impl Into<String>) -> Self {
        Self::DefinedRef { name: name.into() }
    }

    pub fn product(left: SetType, right: SetType) -> Self {
        Self::Product {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn coproduct(left: SetType, right: SetType) -> Self {
        Self::Coproduct {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Name of an atomic or defined set, `None` for composite sets.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Atomic { name } | Self::DefinedRef { name } => Some(name),
            Self::Product { .. } | Self::Coproduct { .. } => None,
        }
    }

    /// Left and right operands of a product or coproduct.
    pub fn operands(&self) -> Option<(&SetType, &SetType)> {
        match self {
            Self::Product { left, right } | Self::Coproduct { left, right } => Some((left, right)),
            Self::Atomic { .. } | Self::DefinedRef { .. } => None,
        }
    }
}
