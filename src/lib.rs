//! A generic simulated-annealing optimizer for discrete combinatorial problems.
//!
//! The [`core`] module is the problem-agnostic annealer: it knows nothing about TSP tours or
//! sort arrays, only the [`core::MoveManager`] contract a problem must implement. The
//! [`problems`] module supplies two such problems as worked examples.

pub mod core;
pub mod errors;
pub mod problems;

pub use crate::core::{AnnealReport, Annealer, Cost, LocalOpt, MoveManager, Rng};
pub use crate::errors::{AnnealingError, Result};
