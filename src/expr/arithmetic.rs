
//! Arithmetic on [`Expr`] values.
//!
//! The fallible operations are available as methods (`try_add`,
//! `try_sub`, `try_div`, and [`TryPow::try_pow`]). The standard
//! operator traits are implemented on top of them for convenience,
//! both for owned and for borrowed expressions, and accept anything
//! that converts into an `Expr` (such as `i64` or `BigRational`) on
//! the right-hand side. Scalars on the left-hand side are supported
//! as well.

use super::{Expr, ExprKind, ExprError};
use super::simplifier::{normalize_sum, normalize_product, normalize_quotient};
use crate::util::TryPow;

use num::BigRational;

use std::cmp::Ordering;
use std::ops::{Add, Sub, Mul, Div, Neg};

impl Expr {
  /// Adds two expressions of the same dimension. Fails with
  /// [`ExprError::DimensionMismatch`] otherwise. Numbers are treated
  /// as dimensionless constants, so `length + 1` is a mismatch.
  pub fn try_add(self, rhs: impl Into<Expr>) -> Result<Expr, ExprError> {
    let rhs = rhs.into();
    if self.dimension != rhs.dimension {
      return Err(ExprError::DimensionMismatch { left: self.dimension, right: rhs.dimension });
    }
    let dimension = self.dimension.clone();
    Ok(normalize_sum(vec![self, rhs], dimension))
  }

  /// Subtracts `rhs` from `self`, as `self + (-rhs)`.
  pub fn try_sub(self, rhs: impl Into<Expr>) -> Result<Expr, ExprError> {
    self.try_add(-rhs.into())
  }

  /// Divides `self` by `rhs`. Fails with [`ExprError::DivisionByZero`]
  /// if `rhs` is a zero constant.
  pub fn try_div(self, rhs: impl Into<Expr>) -> Result<Expr, ExprError> {
    normalize_quotient(self, rhs.into())
  }

  /// Sums any number of expressions of a common dimension. The empty
  /// sum is the dimensionless zero.
  pub fn sum<I>(terms: I) -> Result<Expr, ExprError>
  where I: IntoIterator,
        I::Item: Into<Expr> {
    let terms: Vec<Expr> = terms.into_iter().map(Into::into).collect();
    let Some(first) = terms.first() else {
      return Ok(Expr::zero());
    };
    let dimension = first.dimension.clone();
    if let Some(term) = terms.iter().find(|t| t.dimension != dimension) {
      return Err(ExprError::DimensionMismatch { left: dimension, right: term.dimension.clone() });
    }
    Ok(normalize_sum(terms, dimension))
  }

  /// Multiplies any number of expressions. The empty product is the
  /// dimensionless one.
  pub fn product<I>(factors: I) -> Expr
  where I: IntoIterator,
        I::Item: Into<Expr> {
    normalize_product(factors.into_iter().map(Into::into).collect())
  }
}

fn power_by_squaring(mut base: Expr, mut exponent: u64) -> Expr {
  let mut result = Expr::one();
  while exponent > 0 {
    if exponent & 1 == 1 {
      result = normalize_product(vec![result, base.clone()]);
    }
    exponent >>= 1;
    if exponent > 0 {
      base = normalize_product(vec![base.clone(), base]);
    }
  }
  result
}

// Largest exponent magnitude appearing in the expression or its
// dimension.
fn max_exponent(expr: &Expr) -> i64 {
  let structural = match &expr.kind {
    ExprKind::Constant(_) => 0,
    ExprKind::Power(_, exponent) => exponent.saturating_abs(),
    ExprKind::Product(factors) => factors.iter().map(max_exponent).max().unwrap_or(0),
    ExprKind::Fraction(parts) => parts.iter().map(max_exponent).max().unwrap_or(0),
    ExprKind::Variable(_) | ExprKind::Sum(_) => 1,
  };
  expr.dimension.components()
    .map(|(_, power)| power.saturating_abs())
    .fold(structural, i64::max)
}

/// Integer powers. `x^0` is the dimensionless one (including for a
/// zero `x`), and a negative exponent divides one by the
/// corresponding positive power, which fails for a zero base.
///
/// Fails with [`ExprError::ExponentOverflow`] if any exponent of the
/// result, including those of its dimension, would not fit in an
/// `i64`.
impl TryPow<i64> for Expr {
  type Output = Expr;
  type Error = ExprError;

  fn try_pow(self, exponent: i64) -> Result<Expr, ExprError> {
    let magnitude = exponent.checked_abs().ok_or(ExprError::ExponentOverflow)?;
    if max_exponent(&self).checked_mul(magnitude).is_none() {
      return Err(ExprError::ExponentOverflow);
    }
    match exponent.cmp(&0) {
      Ordering::Equal => Ok(Expr::one()),
      Ordering::Greater => Ok(power_by_squaring(self, exponent.unsigned_abs())),
      Ordering::Less => Expr::one().try_div(power_by_squaring(self, exponent.unsigned_abs())),
    }
  }
}

impl TryPow<i64> for &Expr {
  type Output = Expr;
  type Error = ExprError;

  fn try_pow(self, exponent: i64) -> Result<Expr, ExprError> {
    self.clone().try_pow(exponent)
  }
}

impl From<&Expr> for Expr {
  fn from(expr: &Expr) -> Expr {
    expr.clone()
  }
}

impl<R: Into<Expr>> Add<R> for Expr {
  type Output = Expr;

  /// # Panics
  ///
  /// Panics on a dimension mismatch. Use [`Expr::try_add`] to handle
  /// the error instead.
  fn add(self, rhs: R) -> Expr {
    self.try_add(rhs).unwrap_or_else(|err| panic!("{err}"))
  }
}

impl<R: Into<Expr>> Sub<R> for Expr {
  type Output = Expr;

  /// # Panics
  ///
  /// Panics on a dimension mismatch. Use [`Expr::try_sub`] to handle
  /// the error instead.
  fn sub(self, rhs: R) -> Expr {
    self.try_sub(rhs).unwrap_or_else(|err| panic!("{err}"))
  }
}

impl<R: Into<Expr>> Mul<R> for Expr {
  type Output = Expr;

  fn mul(self, rhs: R) -> Expr {
    normalize_product(vec![self, rhs.into()])
  }
}

impl<R: Into<Expr>> Div<R> for Expr {
  type Output = Expr;

  /// # Panics
  ///
  /// Panics on division by zero. Use [`Expr::try_div`] to handle the
  /// error instead.
  fn div(self, rhs: R) -> Expr {
    self.try_div(rhs).unwrap_or_else(|err| panic!("{err}"))
  }
}

impl Neg for Expr {
  type Output = Expr;

  fn neg(self) -> Expr {
    normalize_product(vec![Expr::from(-1), self])
  }
}

impl Neg for &Expr {
  type Output = Expr;

  fn neg(self) -> Expr {
    -self.clone()
  }
}

macro_rules! impl_borrowed_arith {
  (impl $trait: ident for &Expr { fn $method: ident };) => {
    impl<R: Into<Expr>> $trait<R> for &Expr {
      type Output = Expr;

      fn $method(self, rhs: R) -> Expr {
        $trait::$method(self.clone(), rhs)
      }
    }
  }
}

impl_borrowed_arith! { impl Add for &Expr { fn add }; }
impl_borrowed_arith! { impl Sub for &Expr { fn sub }; }
impl_borrowed_arith! { impl Mul for &Expr { fn mul }; }
impl_borrowed_arith! { impl Div for &Expr { fn div }; }

macro_rules! impl_scalar_arith {
  (impl $trait: ident for $scalar: ty { fn $method: ident };) => {
    impl $trait<Expr> for $scalar {
      type Output = Expr;

      fn $method(self, rhs: Expr) -> Expr {
        $trait::$method(Expr::from(self), rhs)
      }
    }

    impl $trait<&Expr> for $scalar {
      type Output = Expr;

      fn $method(self, rhs: &Expr) -> Expr {
        $trait::$method(Expr::from(self), rhs)
      }
    }
  }
}

impl_scalar_arith! { impl Add for i64 { fn add }; }
impl_scalar_arith! { impl Sub for i64 { fn sub }; }
impl_scalar_arith! { impl Mul for i64 { fn mul }; }
impl_scalar_arith! { impl Div for i64 { fn div }; }
impl_scalar_arith! { impl Add for BigRational { fn add }; }
impl_scalar_arith! { impl Sub for BigRational { fn sub }; }
impl_scalar_arith! { impl Mul for BigRational { fn mul }; }
impl_scalar_arith! { impl Div for BigRational { fn div }; }
