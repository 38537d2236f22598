//! Recoverable errors for the two real boundaries in this crate: parsing an instance file, and
//! validating CLI arguments. Internal contract violations (the delta-consistency invariant between
//! `propose_move`/`make_move`/`score`) are `debug_assert!`-based fatal assertions instead, matching
//! the reference implementation's `assert()` -- they indicate a bug in a `MoveManager`, not a
//! recoverable runtime condition, so they do not get a variant here.

use thiserror::Error;

/// Errors surfaced by this crate's CLI and instance parsers.
#[derive(Debug, Error)]
pub enum AnnealingError {
  #[error("error reading instance file {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed TSPLIB instance: {0}")]
  Parse(String),

  #[error("invalid value for --{arg}: {reason}")]
  InvalidArgument { arg: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AnnealingError>;
