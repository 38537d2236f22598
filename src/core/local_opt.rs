//! A minimal greedy local-search optimizer: accept only strictly improving moves, give up after a
//! long streak of non-improving proposals. Shares the [`MoveManager`] contract with
//! [`Annealer`](super::annealer::Annealer), which is the only reason it lives in this crate at all
//! -- it is useful on its own (see the CLI's `local-opt` solver) and as a polishing pass after
//! annealing has done the hard work of escaping local minima (see `tests/sort_scenarios.rs`, S1).

use super::cost::Cost;
use super::move_manager::MoveManager;
use super::rng::Rng;

/// Stop after this many consecutive non-improving proposals.
const MISS_THRESHOLD: i64 = 10_000;

/// Greedy local-search optimizer.
///
/// Owns its own [`Rng`], seeded explicitly by the caller rather than implicitly reusing an
/// `Annealer`'s stream, since `LocalOpt` is equally often run standalone as chained after one.
pub struct LocalOpt {
  rng: Rng,
}

impl LocalOpt {
  /// Construct a `LocalOpt` whose move generation draws from an `Rng` seeded with `seed`.
  pub fn new(seed: u32) -> Self {
    LocalOpt { rng: Rng::new(seed) }
  }

  /// Repeatedly propose a move; commit it if it strictly improves the cost, otherwise count it
  /// as a miss. Stops once `MISS_THRESHOLD` consecutive misses have accumulated. Termination is
  /// guaranteed in expectation only if improving moves exist somewhere in the neighborhood;
  /// otherwise the miss counter guarantees it deterministically.
  pub fn optimize<M: MoveManager>(&mut self, mm: &mut M) {
    let mut misses = MISS_THRESHOLD;

    loop {
      let mv = mm.generate_move(&mut self.rng);
      let delta = mm.propose_move(&mv);

      if delta.is_negative() {
        mm.make_move(&mv);
        misses = MISS_THRESHOLD;
        log::trace!("improved to {}", mm.score());
      } else {
        misses -= 1;
        if misses < 0 {
          log::trace!("stopping at {} after {} misses", mm.score(), MISS_THRESHOLD);
          return;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::rng::Rng as CoreRng;

  /// A problem with a single guaranteed improving move, then a plateau, to exercise the miss
  /// counter's termination deterministically rather than probabilistically.
  struct OneGoodMoveThenPlateau {
    improved: bool,
    score: i64,
  }

  impl MoveManager for OneGoodMoveThenPlateau {
    type Move = bool;
    type Cost = i64;

    fn generate_move(&mut self, _rng: &mut CoreRng) -> Self::Move {
      !self.improved
    }
    fn propose_move(&mut self, mv: &Self::Move) -> Self::Cost {
      if *mv {
        -1
      } else {
        0
      }
    }
    fn make_move(&mut self, mv: &Self::Move) -> Self::Cost {
      let delta = self.propose_move(mv);
      if *mv {
        self.improved = true;
        self.score += delta;
      }
      delta
    }
    fn score(&self) -> Self::Cost {
      self.score
    }
    fn problem_size(&self) -> u32 {
      1
    }
  }

  #[test]
  fn terminates_after_exhausting_the_miss_budget() {
    let mut opt = LocalOpt::new(1);
    let mut mm = OneGoodMoveThenPlateau {
      improved: false,
      score: 0,
    };
    opt.optimize(&mut mm);
    assert_eq!(mm.score(), -1);
  }
}
