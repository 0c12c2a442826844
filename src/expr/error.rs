
use crate::units::Dimension;
use super::var::TryFromStringError;

use thiserror::Error;

/// An error raised while building or combining expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExprError {
  /// Two quantities of different dimension were added or subtracted.
  #[error("Dimension mismatch: cannot add {} to {}", .left.pretty(), .right.pretty())]
  DimensionMismatch { left: Dimension, right: Dimension },
  #[error("Division by zero")]
  DivisionByZero,
  /// An integer power would push an exponent past the range of `i64`.
  #[error("Exponent overflow")]
  ExponentOverflow,
  #[error("Invalid variable name '{0}'")]
  InvalidName(String),
  #[error("Unknown variable '{0}'")]
  UnknownVariable(String),
}

impl From<TryFromStringError> for ExprError {
  fn from(err: TryFromStringError) -> Self {
    ExprError::InvalidName(err.into_original_string())
  }
}
