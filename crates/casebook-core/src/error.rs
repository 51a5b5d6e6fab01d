//! Error types for `casebook-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// An identifier string that is not a positive integer.
  #[error("invalid {kind} id: {input:?}")]
  InvalidId { kind: &'static str, input: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
