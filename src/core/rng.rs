//! Seedable pseudo-random source shared by the [`Annealer`](super::annealer::Annealer),
//! [`LocalOpt`](super::local_opt::LocalOpt), and every demo `MoveManager`.
//!
//! The reference implementation this crate is built from calls the C library's `srand`/`rand`
//! directly, normalizing `rand()` by the historical `RAND_MAX + 1` of `32768` on the platform it
//! was written for. Reproducing that exact stream is more important here than using a
//! higher-quality generator: the whole point of fixing `RNG_SEED` is that a run is reproducible,
//! and a "better" RNG would just be reproducible with itself instead. So `Rng` is a small
//! linear-congruential generator with the same `/32768` normalization, not `rand`/`rand_chacha`.

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MODULUS: u64 = 1 << 31;

/// A seedable linear-congruential generator normalizing to the historical 16-bit `RAND_MAX`.
#[derive(Debug, Clone)]
pub struct Rng {
  state: u64,
}

impl Rng {
  /// Construct a generator seeded with `seed`.
  pub fn new(seed: u32) -> Self {
    let mut rng = Rng { state: 0 };
    rng.seed(seed);
    rng
  }

  /// Reseed the generator, discarding any prior state.
  pub fn seed(&mut self, seed: u32) {
    self.state = seed as u64;
  }

  fn next_raw(&mut self) -> u32 {
    self.state = (self.state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)) % LCG_MODULUS;
    // Mirrors the classic trick of discarding the low bits of the LCG state, which are far
    // less uniform than the high bits for a modulus-2^k LCG.
    (self.state >> 16) as u32
  }

  /// A uniform double in `[0, 1)`.
  pub fn rand_unit(&mut self) -> f64 {
    (self.next_raw() % 32_768) as f64 / 32_768.0
  }

  /// A uniform integer in `[0, n)`. Panics if `n == 0`.
  pub fn rand_range(&mut self, n: u32) -> u32 {
    assert!(n > 0, "rand_range requires a positive bound");
    self.next_raw() % n
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rand_unit_is_in_unit_interval() {
    let mut rng = Rng::new(5241999);
    for _ in 0..10_000 {
      let x = rng.rand_unit();
      assert!(x >= 0.0 && x < 1.0, "{} out of range", x);
    }
  }

  #[test]
  fn rand_range_respects_bound() {
    let mut rng = Rng::new(42);
    for _ in 0..10_000 {
      let x = rng.rand_range(7);
      assert!(x < 7);
    }
  }

  #[test]
  fn same_seed_is_deterministic() {
    let mut a = Rng::new(123);
    let mut b = Rng::new(123);
    let seq_a: Vec<f64> = (0..50).map(|_| a.rand_unit()).collect();
    let seq_b: Vec<f64> = (0..50).map(|_| b.rand_unit()).collect();
    assert_eq!(seq_a, seq_b);
  }

  #[test]
  fn reseeding_resets_the_stream() {
    let mut rng = Rng::new(1);
    let first: Vec<f64> = (0..20).map(|_| rng.rand_unit()).collect();
    rng.seed(1);
    let second: Vec<f64> = (0..20).map(|_| rng.rand_unit()).collect();
    assert_eq!(first, second);
  }
}
