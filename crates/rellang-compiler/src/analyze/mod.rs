//! Semantic analysis: builds the typed program from statement syntax.
//!
//! Statements are checked in order against one [`SymbolEnvironment`].
//! Sub-expressions are reduced bottom-up and left to right, so the first
//! error reported is the first inconsistency in that order. The walk keeps
//! its own work stack instead of recursing, so operator chains of any length
//! are checked in constant call depth.

mod builder;
mod error;
mod symbol_env;
pub mod syntax;

#[cfg(test)]
mod analyze_tests;

pub use builder::AstBuilder;
pub use error::{AnalyzeError, NameKind};
pub use symbol_env::{RESERVED_NAMES, SymbolEnvironment};

use rellang_core::{DomCod, Program, RelationType, SetType, Statement};

use syntax::{DomCodSyntax, RelExprSyntax, SetExprSyntax, StmtSyntax};

/// Checks a whole program in a fresh environment.
pub fn analyze(statements: &[StmtSyntax]) -> Result<Program, AnalyzeError> {
    let mut env = SymbolEnvironment::new();
    analyze_in(statements, &mut env)
}

/// Checks statements against an existing environment, stopping at the first error.
pub fn analyze_in(
    statements: &[StmtSyntax],
    env: &mut SymbolEnvironment,
) -> Result<Program, AnalyzeError> {
    let mut checker = Checker::new(env);
    let statements = statements
        .iter()
        .map(|stmt| checker.check_statement(stmt))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(checker.builder.program(statements))
}

/// Walks statement syntax and drives the [`AstBuilder`].
pub struct Checker<'env> {
    builder: AstBuilder<'env>,
}

impl<'env> Checker<'env> {
    pub fn new(env: &'env mut SymbolEnvironment) -> Self {
        Self {
            builder: AstBuilder::new(env),
        }
    }

    pub fn env(&self) -> &SymbolEnvironment {
        self.builder.env()
    }

    pub fn check_statement(&mut self, stmt: &StmtSyntax) -> Result<Statement, AnalyzeError> {
        let result = match stmt {
            StmtSyntax::SetDefinition { name, body } => {
                let body = self.set_expr(body)?;
                self.builder.set_definition(name, body)
            }
            StmtSyntax::RelDefinition { name, body } => {
                let body = self.rel_expr(body)?;
                self.builder.rel_definition(name, body)
            }
            StmtSyntax::RelExpression(expr) => {
                let expr = self.rel_expr(expr)?;
                Ok(self.builder.expression(expr))
            }
        };
        if let Err(err) = &result {
            log::debug!("statement rejected: {err}");
        }
        result
    }

    pub fn rel_expr(&mut self, expr: &RelExprSyntax) -> Result<RelationType, AnalyzeError> {
        let mut steps = vec![RelStep::Visit(expr)];
        let mut values = Vec::new();

        while let Some(step) = steps.pop() {
            let value = match step {
                RelStep::Visit(RelExprSyntax::Annotated { name, dom_cod }) => {
                    let dom_cod = self.dom_cod(dom_cod)?;
                    self.builder.annotated_rel(name, dom_cod)?
                }
                RelStep::Visit(RelExprSyntax::Name(name)) => self.builder.rel_name(name)?,
                RelStep::Visit(RelExprSyntax::Composition(left, right)) => {
                    steps.extend([RelStep::Compose, RelStep::Visit(right), RelStep::Visit(left)]);
                    continue;
                }
                RelStep::Visit(RelExprSyntax::Product(left, right)) => {
                    steps.extend([RelStep::Product, RelStep::Visit(right), RelStep::Visit(left)]);
                    continue;
                }
                RelStep::Visit(RelExprSyntax::Coproduct(left, right)) => {
                    steps.extend([RelStep::Coproduct, RelStep::Visit(right), RelStep::Visit(left)]);
                    continue;
                }
                RelStep::Visit(RelExprSyntax::Ascription { expr, dom_cod }) => {
                    steps.extend([RelStep::Annotate(dom_cod), RelStep::Visit(expr)]);
                    continue;
                }
                RelStep::Compose => {
                    let (left, right) = pop_operands(&mut values);
                    self.builder.composition(left, right)?
                }
                RelStep::Product => {
                    let (left, right) = pop_operands(&mut values);
                    self.builder.product(left, right)
                }
                RelStep::Coproduct => {
                    let (left, right) = pop_operands(&mut values);
                    self.builder.coproduct(left, right)
                }
                RelStep::Annotate(dom_cod) => {
                    let expr = values.pop().expect("annotated expression is checked first");
                    let declared = self.dom_cod(dom_cod)?;
                    self.builder.annotate(expr, declared)?
                }
            };
            values.push(value);
        }

        Ok(values.pop().expect("walk leaves exactly one relation"))
    }

    pub fn set_expr(&mut self, expr: &SetExprSyntax) -> Result<SetType, AnalyzeError> {
        let mut steps = vec![SetStep::Visit(expr)];
        let mut values = Vec::new();

        while let Some(step) = steps.pop() {
            let value = match step {
                SetStep::Visit(SetExprSyntax::Name(name)) => self.builder.set_name(name)?,
                SetStep::Visit(SetExprSyntax::Product(left, right)) => {
                    steps.extend([SetStep::Product, SetStep::Visit(right), SetStep::Visit(left)]);
                    continue;
                }
                SetStep::Visit(SetExprSyntax::Coproduct(left, right)) => {
                    steps.extend([SetStep::Coproduct, SetStep::Visit(right), SetStep::Visit(left)]);
                    continue;
                }
                SetStep::Product => {
                    let (left, right) = pop_operands(&mut values);
                    self.builder.set_product(left, right)
                }
                SetStep::Coproduct => {
                    let (left, right) = pop_operands(&mut values);
                    self.builder.set_coproduct(left, right)
                }
            };
            values.push(value);
        }

        Ok(values.pop().expect("walk leaves exactly one set"))
    }

    fn dom_cod(&mut self, dom_cod: &DomCodSyntax) -> Result<DomCod, AnalyzeError> {
        let domain = self.set_expr(&dom_cod.domain)?;
        let codomain = self.set_expr(&dom_cod.codomain)?;
        Ok(self.builder.dom_cod(domain, codomain))
    }
}

/// Pending work of the relation walk. Left operands are checked before right
/// ones, and both before their operator.
enum RelStep<'s> {
    Visit(&'s RelExprSyntax),
    Compose,
    Product,
    Coproduct,
    Annotate(&'s DomCodSyntax),
}

enum SetStep<'s> {
    Visit(&'s SetExprSyntax),
    Product,
    Coproduct,
}

fn pop_operands<T>(values: &mut Vec<T>) -> (T, T) {
    let right = values.pop().expect("right operand is checked before its operator");
    let left = values.pop().expect("left operand is checked before its operator");
    (left, right)
}
