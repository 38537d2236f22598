//! The generic simulated-annealing core: the `Rng`, `Cost`, and `MoveManager` building blocks, and
//! the two optimizers (`Annealer`, `LocalOpt`) built on top of them. Everything in this module is
//! problem-agnostic; see `crate::problems` for the reference TSP and sort-harness `MoveManager`s.

pub mod annealer;
pub mod cost;
pub mod local_opt;
pub mod move_manager;
pub mod progress;
pub mod rng;

pub use annealer::{AnnealReport, Annealer, EquilibriumStats, TerminationReason};
pub use cost::Cost;
pub use local_opt::LocalOpt;
pub use move_manager::MoveManager;
pub use progress::{LogSink, NullSink, ProgressSink, VecSink};
pub use rng::Rng;
