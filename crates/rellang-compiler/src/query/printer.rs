use std::fmt::Write;

use rowan::NodeOrToken;

use rellang_core::{Definition, Program, RelationType, Statement};

use crate::parser::SyntaxNode;

use super::Query;

/// Indented dumps of the CST or of the checked program.
pub struct QueryPrinter<'q, 'src> {
    query: &'q Query<'src>,
    raw: bool,
    trivia: bool,
}

impl<'q, 'src> QueryPrinter<'q, 'src> {
    pub fn new(query: &'q Query<'src>) -> Self {
        Self {
            query,
            raw: false,
            trivia: false,
        }
    }

    /// Print the concrete syntax tree instead of the checked program.
    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    /// Include whitespace tokens in raw output.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.raw {
            return self.format_cst(self.query.as_cst(), 0, w);
        }
        match self.query.program() {
            Some(program) => self.format_program(program, w),
            None => writeln!(w, "<invalid>"),
        }
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        writeln!(w, "{}{:?}", prefix, node.kind())?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        writeln!(w, "{}{:?} {:?}", child_prefix, t.kind(), t.text())?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_program(&self, program: &Program, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "Program")?;
        for statement in program {
            self.format_statement(statement, w)?;
        }
        Ok(())
    }

    fn format_statement(&self, statement: &Statement, w: &mut impl Write) -> std::fmt::Result {
        match statement {
            Statement::Definition(Definition::Set { name, body }) => {
                writeln!(w, "  SetDef {name} := {body}")
            }
            Statement::Definition(Definition::Rel { name, body }) => {
                writeln!(w, "  RelDef {name}")?;
                self.format_rel(body, 2, w)
            }
            Statement::Relation(rel) => {
                writeln!(w, "  Expr")?;
                self.format_rel(rel, 2, w)
            }
        }
    }

    fn format_rel(&self, rel: &RelationType, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let label = match rel {
            RelationType::Atomic { name, .. } => format!("Atomic {name}"),
            RelationType::Defined { name, .. } => format!("Defined {name}"),
            RelationType::Composition { .. } => "Composition".to_string(),
            RelationType::Product { .. } => "Product".to_string(),
            RelationType::Coproduct { .. } => "Coproduct".to_string(),
        };
        writeln!(w, "{prefix}{label} : {}", rel.dom_cod())?;

        if let Some((left, right)) = rel.operands() {
            self.format_rel(left, indent + 1, w)?;
            self.format_rel(right, indent + 1, w)?;
        }
        Ok(())
    }
}
