#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for rellang: the shapes relations are typed with.
//!
//! Two layers:
//! - **Set types** (`SetType`): atomic names, references to `set` definitions,
//!   products and coproducts.
//! - **Relation types** (`RelationType`): typed relation expressions, each node
//!   carrying its resolved `DomCod`.
//!
//! All values are immutable trees. Nothing here resolves names or computes
//! types; that is the analyzer's job. Equality is structural (see
//! [`StructuralEq`]) and never unfolds definitions.

mod display;
mod equality;
mod program;
mod relation;
mod serialize;
mod set;


pub use equality::StructuralEq;
pub use program::{Definition, Program, Statement};
pub use relation::{DomCod, RelationType};
pub use set::SetType;
