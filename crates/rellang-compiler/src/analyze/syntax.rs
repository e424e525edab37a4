//! Parse trees consumed by the checker.
//!
//! Parenthesization is already explicit in the tree shape; the checker never
//! sees grouping tokens or trivia.

/// `domain -> codomain` as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomCodSyntax {
    pub domain: SetExprSyntax,
    pub codomain: SetExprSyntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetExprSyntax {
    Name(String),
    Product(Box<SetExprSyntax>, Box<SetExprSyntax>),
    Coproduct(Box<SetExprSyntax>, Box<SetExprSyntax>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelExprSyntax {
    /// `R : A -> B`
    Annotated { name: String, dom_cod: DomCodSyntax },
    /// Bare `R`
    Name(String),
    Composition(Box<RelExprSyntax>, Box<RelExprSyntax>),
    Product(Box<RelExprSyntax>, Box<RelExprSyntax>),
    Coproduct(Box<RelExprSyntax>, Box<RelExprSyntax>),
    /// `(expr) : A -> B` around anything but a bare name.
    Ascription {
        expr: Box<RelExprSyntax>,
        dom_cod: DomCodSyntax,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtSyntax {
    SetDefinition { name: String, body: SetExprSyntax },
    RelDefinition { name: String, body: RelExprSyntax },
    RelExpression(RelExprSyntax),
}

impl SetExprSyntax {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn product(left: Self, right: Self) -> Self {
        Self::Product(Box::new(left), Box::new(right))
    }

    pub fn coproduct(left: Self, right: Self) -> Self {
        Self::Coproduct(Box::new(left), Box::new(right))
    }
}

impl DomCodSyntax {
    pub fn new(domain: SetExprSyntax, codomain: SetExprSyntax) -> Self {
        Self { domain, codomain }
    }
}

impl RelExprSyntax {
    pub fn annotated(name: impl Into<String>, dom_cod: DomCodSyntax) -> Self {
        Self::Annotated {
            name: name.into(),
            dom_cod,
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn composition(left: Self, right: Self) -> Self {
        Self::Composition(Box::new(left), Box::new(right))
    }

    pub fn product(left: Self, right: Self) -> Self {
        Self::Product(Box::new(left), Box::new(right))
    }

    pub fn coproduct(left: Self, right: Self) -> Self {
        Self::Coproduct(Box::new(left), Box::new(right))
    }

    pub fn ascription(expr: Self, dom_cod: DomCodSyntax) -> Self {
        Self::Ascription {
            expr: Box::new(expr),
            dom_cod,
        }
    }
}
