//! Parser infrastructure for rellang.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace collected, then attached as leading trivia
//! - Checkpoint-based wrapping: binary operators retroactively wrap their left operand
//! - Newlines are real tokens and terminate statements
//!
//! # Recovery Strategy
//!
//! The parser always produces a tree:
//!
//! 1. A statement that cannot be parsed is wrapped in a `SyntaxKind::Error` node up to the next newline
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. Only one diagnostic is reported per source position
//! 4. On recursion limit, remaining input goes into single Error node
//!
//! However, fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.
//!
//! Once the tree is built, [`lower`] turns typed AST views into the statement
//! syntax consumed by [`crate::analyze`].

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod lower;

mod core;
mod grammar;
mod invariants;


pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    Ascription, AtomicRel, Composition, DomCod, ExprStmt, RelCoproduct, RelDef, RelExpr,
    RelParen, RelProduct, RelRef, Root, SetCoproduct, SetDef, SetExpr, SetParen, SetProduct,
    SetRef, Stmt,
};

pub use core::{ParseResult, Parser};
pub use lower::{LoweredStmt, lower};

use crate::PassResult;
use lexer::lex;

/// Main entry point with default (unlimited) fuel. Returns Err on fuel exhaustion.
pub fn parse(source: &str) -> PassResult<Root> {
    let result = Parser::new(source, lex(source)).parse()?;
    Ok((result.root, result.diagnostics))
}
