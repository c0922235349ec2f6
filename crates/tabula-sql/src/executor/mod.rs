//! Query evaluation.
//!
//! A [`QueryPlan`](crate::parser::QueryPlan) is evaluated in three steps:
//!
//! - **Join**: the tables of the FROM list are combined by Cartesian product,
//!   left to right
//! - **Filter**: rows failing the WHERE predicate are dropped
//! - **Project**: the SELECT list picks and orders the output columns
//!
//! Every step produces a new [`Table`](crate::table::Table); inputs are never
//! modified.

mod engine;
mod operators;
mod predicate;

pub use engine::*;
pub use operators::*;
pub use predicate::*;
