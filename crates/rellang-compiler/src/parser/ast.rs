//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Accessors return `Option` because recovered trees may lack any child.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

/// Left and right operand of a binary node.
macro_rules! binary_operands {
    ($name:ident, $operand:ident) => {
        impl $name {
            pub fn lhs(&self) -> Option<$operand> {
                self.0.children().filter_map($operand::cast).next()
            }

            pub fn rhs(&self) -> Option<$operand> {
                self.0.children().filter_map($operand::cast).nth(1)
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(SetDef, SetDef);
ast_node!(RelDef, RelDef);
ast_node!(ExprStmt, ExprStmt);
ast_node!(Ascription, Ascription);
ast_node!(Composition, Composition);
ast_node!(RelCoproduct, RelCoproduct);
ast_node!(RelProduct, RelProduct);
ast_node!(AtomicRel, AtomicRel);
ast_node!(RelRef, RelRef);
ast_node!(RelParen, RelParen);
ast_node!(DomCod, DomCod);
ast_node!(SetCoproduct, SetCoproduct);
ast_node!(SetProduct, SetProduct);
ast_node!(SetRef, SetRef);
ast_node!(SetParen, SetParen);

binary_operands!(Composition, RelExpr);
binary_operands!(RelCoproduct, RelExpr);
binary_operands!(RelProduct, RelExpr);
binary_operands!(SetCoproduct, SetExpr);
binary_operands!(SetProduct, SetExpr);

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    SetDef(SetDef),
    RelDef(RelDef),
    Expr(ExprStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::SetDef => SetDef::cast(node).map(Stmt::SetDef),
            SyntaxKind::RelDef => RelDef::cast(node).map(Stmt::RelDef),
            SyntaxKind::ExprStmt => ExprStmt::cast(node).map(Stmt::Expr),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::SetDef(n) => n.as_cst(),
            Stmt::RelDef(n) => n.as_cst(),
            Stmt::Expr(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

/// Relation expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelExpr {
    Ascription(Ascription),
    Composition(Composition),
    Coproduct(RelCoproduct),
    Product(RelProduct),
    Atomic(AtomicRel),
    Ref(RelRef),
    Paren(RelParen),
}

impl RelExpr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Ascription => Ascription::cast(node).map(RelExpr::Ascription),
            SyntaxKind::Composition => Composition::cast(node).map(RelExpr::Composition),
            SyntaxKind::RelCoproduct => RelCoproduct::cast(node).map(RelExpr::Coproduct),
            SyntaxKind::RelProduct => RelProduct::cast(node).map(RelExpr::Product),
            SyntaxKind::AtomicRel => AtomicRel::cast(node).map(RelExpr::Atomic),
            SyntaxKind::RelRef => RelRef::cast(node).map(RelExpr::Ref),
            SyntaxKind::RelParen => RelParen::cast(node).map(RelExpr::Paren),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            RelExpr::Ascription(n) => n.as_cst(),
            RelExpr::Composition(n) => n.as_cst(),
            RelExpr::Coproduct(n) => n.as_cst(),
            RelExpr::Product(n) => n.as_cst(),
            RelExpr::Atomic(n) => n.as_cst(),
            RelExpr::Ref(n) => n.as_cst(),
            RelExpr::Paren(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

/// Set expression (domain, codomain or set definition body).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetExpr {
    Coproduct(SetCoproduct),
    Product(SetProduct),
    Ref(SetRef),
    Paren(SetParen),
}

impl SetExpr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::SetCoproduct => SetCoproduct::cast(node).map(SetExpr::Coproduct),
            SyntaxKind::SetProduct => SetProduct::cast(node).map(SetExpr::Product),
            SyntaxKind::SetRef => SetRef::cast(node).map(SetExpr::Ref),
            SyntaxKind::SetParen => SetParen::cast(node).map(SetExpr::Paren),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            SetExpr::Coproduct(n) => n.as_cst(),
            SetExpr::Product(n) => n.as_cst(),
            SetExpr::Ref(n) => n.as_cst(),
            SetExpr::Paren(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

fn id_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == SyntaxKind::Id)
}

impl Root {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl SetDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        id_token(&self.0)
    }

    pub fn body(&self) -> Option<SetExpr> {
        self.0.children().find_map(SetExpr::cast)
    }
}

impl RelDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        id_token(&self.0)
    }

    pub fn body(&self) -> Option<RelExpr> {
        self.0.children().find_map(RelExpr::cast)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<RelExpr> {
        self.0.children().find_map(RelExpr::cast)
    }
}

impl Ascription {
    pub fn expr(&self) -> Option<RelExpr> {
        self.0.children().find_map(RelExpr::cast)
    }

    pub fn dom_cod(&self) -> Option<DomCod> {
        self.0.children().find_map(DomCod::cast)
    }
}

impl AtomicRel {
    pub fn name(&self) -> Option<SyntaxToken> {
        id_token(&self.0)
    }

    pub fn dom_cod(&self) -> Option<DomCod> {
        self.0.children().find_map(DomCod::cast)
    }
}

impl RelRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        id_token(&self.0)
    }
}

impl RelParen {
    pub fn inner(&self) -> Option<RelExpr> {
        self.0.children().find_map(RelExpr::cast)
    }
}

impl DomCod {
    pub fn domain(&self) -> Option<SetExpr> {
        self.0.children().filter_map(SetExpr::cast).next()
    }

    /// `None` also when the arrow is missing.
    pub fn codomain(&self) -> Option<SetExpr> {
        let has_arrow = self
            .0
            .children_with_tokens()
            .any(|it| it.kind() == SyntaxKind::Arrow);
        if !has_arrow {
            return None;
        }
        self.0.children().filter_map(SetExpr::cast).nth(1)
    }
}

impl SetRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        id_token(&self.0)
    }
}

impl SetParen {
    pub fn inner(&self) -> Option<SetExpr> {
        self.0.children().find_map(SetExpr::cast)
    }
}
