use super::product::normalize_product;
use crate::expr::{Expr, ExprError};
use crate::expr::algebra::factor::{Factorization, common_factor};

use log::trace;
use num::{BigRational, Zero};

use std::iter;

/// Divides `numerator` by `denominator`, producing a canonical
/// result.
///
/// Fractions on either side are unpacked first, so that `(a/b) /
/// (c/d)` is treated as `(a*d) / (b*c)`. The quotient is then reduced
/// by [`reduce_fraction`].
pub fn normalize_quotient(numerator: Expr, denominator: Expr) -> Result<Expr, ExprError> {
  if denominator.is_zero() {
    return Err(ExprError::DivisionByZero);
  }
  let (n1, d1) = split_fraction(numerator);
  let (n2, d2) = split_fraction(denominator);
  let numerator = normalize_product(iter::once(n1).chain(d2).collect());
  let denominator = normalize_product(iter::once(n2).chain(d1).collect());
  Ok(reduce_fraction(numerator, denominator))
}

/// Reduces the quotient of two canonical, fraction-free expressions.
/// The denominator must be nonzero.
///
/// Common factors are cancelled. If what remains of the denominator
/// is a constant, the result is a product with the reciprocal of that
/// constant. Otherwise the denominator's constant coefficient is
/// moved into the numerator and a fraction node is built.
pub(crate) fn reduce_fraction(numerator: Expr, denominator: Expr) -> Expr {
  let dimension = numerator.dimension() - denominator.dimension();
  if numerator.is_zero() {
    return Expr::zero_of(dimension);
  }
  let (common, numerator, denominator) = common_factor(numerator, denominator);
  trace!("cancelled common factor {} from {}/{}", common, numerator, denominator);

  let result = if denominator.is_constant() {
    normalize_product(vec![numerator, reciprocal(&denominator)])
  } else {
    let (coefficient, rest) = Factorization::of(denominator).split_coefficient();
    let numerator = if coefficient.is_one() {
      numerator
    } else {
      normalize_product(vec![numerator, reciprocal(&coefficient)])
    };
    Expr::fraction_node(numerator, rest.into_expr())
  };
  debug_assert_eq!(result.dimension(), &dimension, "Quotient changed dimension");
  result
}

/// Splits an expression into numerator and (optional) denominator.
pub(super) fn split_fraction(expr: Expr) -> (Expr, Option<Expr>) {
  if expr.is_fraction() {
    let mut parts = expr.into_children();
    let denominator = parts.pop();
    let numerator = parts.swap_remove(0);
    (numerator, denominator)
  } else {
    (expr, None)
  }
}

/// The reciprocal of a nonzero constant, with negated dimension.
fn reciprocal(constant: &Expr) -> Expr {
  let value = constant.value().map(|v| v.recip());
  debug_assert!(value.is_some(), "Reciprocal of non-constant {constant}");
  Expr::constant_with_dimension(value.unwrap_or_else(BigRational::zero), -constant.dimension())
}
