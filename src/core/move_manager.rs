//! The contract every problem implements so it can be driven by [`Annealer`](super::annealer::Annealer)
//! or [`LocalOpt`](super::local_opt::LocalOpt).
//!
//! This mirrors `IMoveMgr` from the original reference implementation almost one for one, with the
//! virtual-dispatch interface replaced by an associated-type trait so the optimizers monomorphize
//! per problem instead of paying for an indirect call on every move.

use super::cost::Cost;
use super::rng::Rng;

/// Encapsulates the state of a single combinatorial problem instance and the moves available on
/// it. All problem state lives behind this trait; the optimizers are stateless with respect to it.
///
/// # Invariants
///
/// - After any sequence of `generate_move`/`propose_move`/`make_move` calls, `score()` equals the
///   true cost of the committed state.
/// - `propose_move` must be side-effect-free: calling it twice in a row on the same move, with no
///   `make_move` in between, must return the same delta and must not change `score()`.
/// - A move returned by `generate_move` must be legal to pass to `propose_move` and `make_move`.
/// - The delta `make_move` returns must equal the delta `propose_move` would have returned for the
///   same move on the pre-commit state.
pub trait MoveManager {
  /// An opaque description of a candidate transition.
  type Move;
  /// The scalar cost type this problem reports.
  type Cost: Cost;

  /// Draw a candidate move. The distribution is caller-defined, but it should explore the
  /// neighborhood usefully; `rng` is the optimizer's own random stream, shared so that an entire
  /// run is reproducible from a single seed.
  fn generate_move(&mut self, rng: &mut Rng) -> Self::Move;

  /// Compute the delta-cost (new score minus current score) of applying `mv`, without applying
  /// it. Must not be observable in `score()` or in any later call.
  fn propose_move(&mut self, mv: &Self::Move) -> Self::Cost;

  /// Apply `mv` to the committed state and return the delta-cost actually incurred. This MUST
  /// equal what `propose_move` would return for `mv` on the pre-commit state; implementations
  /// are free to cache the last proposal to avoid recomputing it.
  fn make_move(&mut self, mv: &Self::Move) -> Self::Cost;

  /// The current total cost of the committed state. Expected O(1); must always agree with the
  /// true cost of the committed state.
  fn score(&self) -> Self::Cost;

  /// The problem size, constant over the optimizer's lifetime. Some optimizer parameters scale
  /// with this; what "size" means is problem-defined.
  fn problem_size(&self) -> u32;

  /// Optional diagnostic hook. The optimizers never call this themselves; it exists purely so a
  /// `MoveManager` can wire up its own ad-hoc debugging.
  fn debug(&self) {}
}
