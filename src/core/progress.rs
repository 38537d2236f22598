//! Diagnostic output is a capability (`ProgressSink`) rather than a hardcoded `println!`, so tests
//! can capture the annealer's trace deterministically instead of scraping stdout.

/// Receives one line of diagnostic text at a time.
pub trait ProgressSink {
  fn line(&mut self, text: &str);
}

/// Forwards every line to the `log` crate at `info` level, the same granularity the reference
/// implementation prints its per-equilibrium trace at. Calibration trial lines are logged at
/// `debug` directly by [`Annealer::measure_temp`](super::annealer::Annealer::measure_temp) rather
/// than through this sink, since they are considerably higher-volume.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
  fn line(&mut self, text: &str) {
    log::info!("{}", text);
  }
}

/// Discards every line. Useful for benchmarks or embedding scenarios that want the annealer's
/// behavior without its trace.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
  fn line(&mut self, _text: &str) {}
}

/// Captures every line in memory, in order. Intended for tests that assert on the shape of the
/// trace (e.g. that calibration ran, or that a convergence line was eventually emitted).
#[derive(Debug, Default, Clone)]
pub struct VecSink(pub Vec<String>);

impl ProgressSink for VecSink {
  fn line(&mut self, text: &str) {
    self.0.push(text.to_string());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vec_sink_records_lines_in_order() {
    let mut sink = VecSink::default();
    sink.line("one");
    sink.line("two");
    assert_eq!(sink.0, vec!["one".to_string(), "two".to_string()]);
  }

  #[test]
  fn null_sink_drops_everything() {
    let mut sink = NullSink;
    sink.line("whatever");
  }
}
