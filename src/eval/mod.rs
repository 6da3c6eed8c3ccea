//! Seven-card hand evaluation.
//!
//! Maps any 7 distinct cards to a totally ordered 32-bit [`HandScore`] in
//! constant time. Flushes and straight flushes resolve through a single
//! probe of a precomputed 8,192-entry table; everything else falls out of
//! a rank histogram scan.

mod evaluator;
mod tables;

pub use evaluator::{evaluate_seven, HandCategory, HandScore};
