use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),

  #[error("index {index} out of range for length {len}")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("rule window {window} is wider than the row ({width} cells)")]
  RuleTableMismatch { window: u32, width: usize },

  #[error("invalid rule string {0:?}")]
  InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, Error>;
