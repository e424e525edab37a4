//! Lowering from typed AST views into checker input.
//!
//! Parentheses disappear here; the nesting of the produced trees carries the
//! grouping. A node with a missing child is reported and its statement is
//! dropped.
//!
//! Walks use explicit work stacks, so long operator chains and deep nesting
//! do not grow the call stack.

use rowan::TextRange;

use super::ast::{DomCod, RelExpr, Root, SetExpr, Stmt};
use super::cst::SyntaxToken;
use crate::analyze::syntax::{DomCodSyntax, RelExprSyntax, SetExprSyntax, StmtSyntax};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// A lowered statement and the source range it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredStmt {
    pub syntax: StmtSyntax,
    pub range: TextRange,
}

pub fn lower(root: &Root, diagnostics: &mut Diagnostics) -> Vec<LoweredStmt> {
    let mut lowerer = Lowerer { diagnostics };
    root.statements()
        .filter_map(|stmt| {
            let range = stmt.text_range();
            lowerer
                .stmt(&stmt)
                .map(|syntax| LoweredStmt { syntax, range })
        })
        .collect()
}

struct Lowerer<'d> {
    diagnostics: &'d mut Diagnostics,
}

impl Lowerer<'_> {
    fn missing(&mut self, kind: DiagnosticKind, range: TextRange) {
        self.diagnostics.report(kind, range).emit();
    }

    fn name(&mut self, token: Option<SyntaxToken>, range: TextRange) -> Option<String> {
        match token {
            Some(token) => Some(token.text().to_string()),
            None => {
                self.missing(DiagnosticKind::ExpectedIdentifier, range);
                None
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) -> Option<StmtSyntax> {
        let range = stmt.text_range();
        match stmt {
            Stmt::SetDef(def) => {
                let name = self.name(def.name(), range)?;
                let body = self.set_expr(def.body(), range)?;
                Some(StmtSyntax::SetDefinition { name, body })
            }
            Stmt::RelDef(def) => {
                let name = self.name(def.name(), range)?;
                let body = self.rel_expr(def.body(), range)?;
                Some(StmtSyntax::RelDefinition { name, body })
            }
            Stmt::Expr(expr) => self.rel_expr(expr.expr(), range).map(StmtSyntax::RelExpression),
        }
    }

    fn rel_expr(&mut self, expr: Option<RelExpr>, parent: TextRange) -> Option<RelExprSyntax> {
        let mut tasks = vec![RelTask::Visit(expr, parent)];
        let mut done = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                RelTask::Visit(expr, parent) => {
                    let Some(expr) = expr else {
                        self.missing(DiagnosticKind::ExpectedExpression, parent);
                        return None;
                    };
                    let range = expr.text_range();
                    match expr {
                        RelExpr::Paren(paren) => tasks.push(RelTask::Visit(paren.inner(), range)),
                        RelExpr::Ref(node) => {
                            done.push(RelExprSyntax::Name(self.name(node.name(), range)?));
                        }
                        RelExpr::Atomic(node) => {
                            let name = self.name(node.name(), range)?;
                            let dom_cod = self.dom_cod(node.dom_cod(), range)?;
                            done.push(RelExprSyntax::annotated(name, dom_cod));
                        }
                        RelExpr::Ascription(node) => {
                            tasks.push(RelTask::Ascribe(node.dom_cod(), range));
                            tasks.push(RelTask::Visit(node.expr(), range));
                        }
                        RelExpr::Composition(node) => {
                            tasks.push(RelTask::Combine(RelExprSyntax::composition));
                            tasks.push(RelTask::Visit(node.rhs(), range));
                            tasks.push(RelTask::Visit(node.lhs(), range));
                        }
                        RelExpr::Coproduct(node) => {
                            tasks.push(RelTask::Combine(RelExprSyntax::coproduct));
                            tasks.push(RelTask::Visit(node.rhs(), range));
                            tasks.push(RelTask::Visit(node.lhs(), range));
                        }
                        RelExpr::Product(node) => {
                            tasks.push(RelTask::Combine(RelExprSyntax::product));
                            tasks.push(RelTask::Visit(node.rhs(), range));
                            tasks.push(RelTask::Visit(node.lhs(), range));
                        }
                    }
                }
                RelTask::Combine(build) => {
                    let right = done.pop()?;
                    let left = done.pop()?;
                    done.push(build(left, right));
                }
                RelTask::Ascribe(dom_cod, range) => {
                    let inner = done.pop()?;
                    let dom_cod = self.dom_cod(dom_cod, range)?;
                    done.push(RelExprSyntax::ascription(inner, dom_cod));
                }
            }
        }

        done.pop()
    }

    fn dom_cod(&mut self, dom_cod: Option<DomCod>, parent: TextRange) -> Option<DomCodSyntax> {
        let Some(dom_cod) = dom_cod else {
            self.missing(DiagnosticKind::ExpectedArrow, parent);
            return None;
        };
        let range = dom_cod.text_range();
        let domain = self.set_expr(dom_cod.domain(), range)?;
        let codomain = self.set_expr(dom_cod.codomain(), range)?;
        Some(DomCodSyntax::new(domain, codomain))
    }

    fn set_expr(&mut self, expr: Option<SetExpr>, parent: TextRange) -> Option<SetExprSyntax> {
        let mut tasks = vec![SetTask::Visit(expr, parent)];
        let mut done = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                SetTask::Visit(expr, parent) => {
                    let Some(expr) = expr else {
                        self.missing(DiagnosticKind::ExpectedSetExpression, parent);
                        return None;
                    };
                    let range = expr.text_range();
                    match expr {
                        SetExpr::Paren(paren) => tasks.push(SetTask::Visit(paren.inner(), range)),
                        SetExpr::Ref(node) => {
                            done.push(SetExprSyntax::Name(self.name(node.name(), range)?));
                        }
                        SetExpr::Product(node) => {
                            tasks.push(SetTask::Combine(SetExprSyntax::product));
                            tasks.push(SetTask::Visit(node.rhs(), range));
                            tasks.push(SetTask::Visit(node.lhs(), range));
                        }
                        SetExpr::Coproduct(node) => {
                            tasks.push(SetTask::Combine(SetExprSyntax::coproduct));
                            tasks.push(SetTask::Visit(node.rhs(), range));
                            tasks.push(SetTask::Visit(node.lhs(), range));
                        }
                    }
                }
                SetTask::Combine(build) => {
                    let right = done.pop()?;
                    let left = done.pop()?;
                    done.push(build(left, right));
                }
            }
        }

        done.pop()
    }
}

/// Pending work of the relation walk. Operands are visited left to right and
/// combined once both are lowered.
enum RelTask {
    Visit(Option<RelExpr>, TextRange),
    Combine(fn(RelExprSyntax, RelExprSyntax) -> RelExprSyntax),
    Ascribe(Option<DomCod>, TextRange),
}

enum SetTask {
    Visit(Option<SetExpr>, TextRange),
    Combine(fn(SetExprSyntax, SetExprSyntax) -> SetExprSyntax),
}
