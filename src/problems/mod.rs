//! Reference `MoveManager` implementations: a Euclidean TSP solved by 2-opt moves, and an
//! inversion-count sort harness. Neither is part of the optimizer itself -- they exist to give
//! `Annealer`/`LocalOpt` something concrete to drive, in the CLI and in the test suite.

pub mod sort;
pub mod tsp;

pub use sort::{SortMove, SortMoveManager};
pub use tsp::{parse_tsplib, TspMove, TspMoveManager};
