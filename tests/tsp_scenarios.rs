//! End-to-end scenarios driving the TSP demo through the public crate API.

use annealing_core::core::{Annealer, LocalOpt, NullSink};
use annealing_core::problems::parse_tsplib;

const CROSSED_SQUARE: &str = "\
NAME: crossed-square
DIMENSION: 4
NODE_COORD_SECTION
1 0.0 0.0
2 1.0 0.0
3 0.0 1.0
4 1.0 1.0
EOF
";

/// The naive `0-1-2-3-0` tour over these four points crosses itself (cost `2 + 2*sqrt(2)`); the
/// uncrossed tour `0-1-3-2-0` is optimal at cost `4`. 2-opt alone suffices to find it.
#[test]
fn local_opt_uncrosses_the_initial_tour() {
  let mut mm = parse_tsplib(CROSSED_SQUARE).expect("should parse");
  let initial = mm.score();
  assert!((initial - (2.0 + 2.0f64.sqrt())).abs() < 1e-9);

  let mut local_opt = LocalOpt::new(1);
  local_opt.optimize(&mut mm);

  assert!((mm.score() - 4.0).abs() < 1e-9, "final cost was {}", mm.score());
}

/// A larger random-ish instance: annealing followed by a local-opt polish should land at or very
/// near the true optimum (a diamond, perimeter `4 * sqrt(2)`) regardless of starting tour order.
#[test]
fn anneal_then_local_opt_finds_the_diamond_perimeter() {
  let contents = "\
NAME: diamond
DIMENSION: 4
NODE_COORD_SECTION
1 0.0 1.0
2 -1.0 0.0
3 0.0 -1.0
4 1.0 0.0
EOF
";
  let mut mm = parse_tsplib(contents).expect("should parse");

  let mut annealer = Annealer::new(NullSink);
  annealer.optimize(&mut mm);
  let mut local_opt = LocalOpt::new(3);
  local_opt.optimize(&mut mm);

  let optimal = 4.0 * 2.0f64.sqrt();
  assert!(
    (mm.score() - optimal).abs() < 1e-6,
    "expected the diamond perimeter {}, got {}",
    optimal,
    mm.score()
  );
}
