//! rellang compiler: parser and semantic analyzer for the relational calculus.
//!
//! This crate provides the checking pipeline for rellang programs:
//! - `parser` - lexer, CST, AST views, and lowering to statement syntax
//! - `analyze` - symbol environment and the typed-AST builder
//! - `diagnostics` - error reporting
//! - `query` - high-level Query facade
//!
//! # Example
//!
//! ```
//! use rellang_compiler::Query;
//!
//! let source = "
//! set X := A * B
//! rel R := S : X -> C
//! R ; (T : C -> D)
//! ";
//!
//! let query = Query::try_from(source).expect("out of fuel");
//! assert!(query.is_valid());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod parser;
pub mod query;

/// Result type for passes that produce both output and diagnostics.
///
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use analyze::{AnalyzeError, NameKind, SymbolEnvironment};
pub use diagnostics::{DiagnosticKind, Diagnostics};
pub use query::{Query, check};
pub use rellang_core::{Definition, DomCod, Program, RelationType, SetType, Statement};

/// Errors that can occur while checking a program.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("program parsing failed with {} errors", .0.len())]
    Parse(Diagnostics),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// Result type for program checking.
pub type Result<T> = std::result::Result<T, Error>;
