//! Program checking pipeline.
//!
//! Stages: parse → lower → analyze. Parse and lower collect every syntax
//! diagnostic they find; analysis runs only on a clean tree and stops at the
//! first semantic error. Use `is_valid()` to check if any stage failed.

mod dump;
mod printer;
pub use printer::QueryPrinter;

#[cfg(test)]
mod query_tests;

use rowan::GreenNodeBuilder;

use crate::analyze::{AnalyzeError, Checker, SymbolEnvironment};
use crate::diagnostics::Diagnostics;
use crate::parser::cst::SyntaxKind;
use crate::parser::lexer::lex;
use crate::parser::{LoweredStmt, ParseResult, Parser, Root, SyntaxNode, lower};
use crate::{Error, Result};
use rellang_core::Program;

const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
/// Parser nesting depth; sized to fit a 2 MiB thread stack.
const DEFAULT_RECURSION_FUEL: u32 = 256;

/// A parsed and checked program.
///
/// Create with [`new`](Self::new), optionally configure fuel limits,
/// then call [`exec`](Self::exec) to run the pipeline.
///
/// Check [`is_valid`](Self::is_valid) or [`diagnostics`](Self::diagnostics)
/// to determine if the program has syntax/semantic issues.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    source: &'a str,
    ast: Root,
    statements: Vec<LoweredStmt>,
    env: SymbolEnvironment,
    program: Option<Program>,
    analyze_error: Option<AnalyzeError>,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
    exec_fuel_consumed: u32,
    parse_diagnostics: Diagnostics,
    lower_diagnostics: Diagnostics,
    analyze_diagnostics: Diagnostics,
}

fn empty_root() -> Root {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::Root.into());
    builder.finish_node();
    let green = builder.finish();
    Root::cast(SyntaxNode::new_root(green)).expect("we just built a Root node")
}

impl<'a> Query<'a> {
    /// Create a new query from source text.
    ///
    /// Call [`exec`](Self::exec) to run the pipeline.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            ast: empty_root(),
            statements: Vec::new(),
            env: SymbolEnvironment::new(),
            program: None,
            analyze_error: None,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
            exec_fuel_consumed: 0,
            parse_diagnostics: Diagnostics::new(),
            lower_diagnostics: Diagnostics::new(),
            analyze_diagnostics: Diagnostics::new(),
        }
    }

    /// Set execution fuel limit. None = infinite.
    ///
    /// Execution fuel never replenishes. It protects against large inputs.
    /// Returns error from [`exec`](Self::exec) when exhausted.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Set recursion depth limit. None = infinite.
    ///
    /// Recursion fuel restores when exiting recursion. It protects against
    /// deeply nested input. Returns error from [`exec`](Self::exec) when exhausted.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Run all stages.
    ///
    /// Returns `Err` only if fuel limits are exceeded.
    /// Syntax/semantic diagnostics are collected and accessible via [`diagnostics`](Self::diagnostics).
    pub fn exec(mut self) -> Result<Self> {
        self.try_parse()?;
        if !self.parse_diagnostics.is_empty() {
            return Ok(self);
        }

        self.statements = lower(&self.ast, &mut self.lower_diagnostics);
        log::trace!("lowered {} statements", self.statements.len());
        if !self.lower_diagnostics.is_empty() {
            return Ok(self);
        }

        self.analyze();
        Ok(self)
    }

    fn try_parse(&mut self) -> Result<()> {
        let tokens = lex(self.source);
        let parser = Parser::new(self.source, tokens)
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel);

        let ParseResult {
            root,
            diagnostics,
            exec_fuel_consumed,
        } = parser.parse()?;
        log::trace!(
            "parsed with {} diagnostics, {exec_fuel_consumed} fuel consumed",
            diagnostics.len()
        );
        self.ast = root;
        self.parse_diagnostics = diagnostics;
        self.exec_fuel_consumed = exec_fuel_consumed;
        Ok(())
    }

    fn analyze(&mut self) {
        let mut env = SymbolEnvironment::new();
        let mut checker = Checker::new(&mut env);
        let mut statements = Vec::with_capacity(self.statements.len());

        for lowered in &self.statements {
            match checker.check_statement(&lowered.syntax) {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.analyze_diagnostics
                        .report(err.diagnostic_kind(), lowered.range)
                        .message(err.detail())
                        .emit();
                    self.analyze_error = Some(err);
                    break;
                }
            }
        }

        if self.analyze_error.is_none() {
            self.program = Some(Program::new(statements));
        }
        self.env = env;
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub(crate) fn as_cst(&self) -> &SyntaxNode {
        self.ast.as_cst()
    }

    pub fn root(&self) -> &Root {
        &self.ast
    }

    /// Lowered statements, empty when the source has syntax errors.
    pub fn statements(&self) -> &[LoweredStmt] {
        &self.statements
    }

    /// Names bound by the checked statements, up to the first failing one.
    pub fn env(&self) -> &SymbolEnvironment {
        &self.env
    }

    /// The checked program, present only when the query is valid.
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn analyze_error(&self) -> Option<&AnalyzeError> {
        self.analyze_error.as_ref()
    }

    pub fn exec_fuel_consumed(&self) -> u32 {
        self.exec_fuel_consumed
    }

    /// All diagnostics combined from all stages.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut all = Diagnostics::new();
        all.extend(self.parse_diagnostics.clone());
        all.extend(self.lower_diagnostics.clone());
        all.extend(self.analyze_diagnostics.clone());
        all
    }

    pub fn is_valid(&self) -> bool {
        self.parse_diagnostics.is_empty()
            && self.lower_diagnostics.is_empty()
            && self.analyze_diagnostics.is_empty()
    }

    /// The checked program, or the error that prevented it.
    pub fn into_program(self) -> Result<Program> {
        let diagnostics = self.diagnostics();
        match (self.program, self.analyze_error) {
            (_, Some(err)) => Err(Error::Analyze(err)),
            (Some(program), None) => Ok(program),
            (None, None) => Err(Error::Parse(diagnostics)),
        }
    }

    pub fn printer(&self) -> QueryPrinter<'_, 'a> {
        QueryPrinter::new(self)
    }
}

impl<'a> TryFrom<&'a str> for Query<'a> {
    type Error = Error;

    fn try_from(source: &'a str) -> Result<Self> {
        Self::new(source).exec()
    }
}

impl<'a> TryFrom<&'a String> for Query<'a> {
    type Error = Error;

    fn try_from(source: &'a String) -> Result<Self> {
        Self::new(source.as_str()).exec()
    }
}

/// Parses and checks `source` with default fuel.
pub fn check(source: &str) -> Result<Program> {
    Query::try_from(source)?.into_program()
}
