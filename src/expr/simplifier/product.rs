use super::flattener::flatten_product;
use super::quotient::{reduce_fraction, split_fraction};
use super::reducer::{reduce_terms, collapse};
use super::sum::normalize_sum;
use crate::expr::Expr;
use crate::expr::algebra::factor::Factor;
use crate::units::Dimension;

use log::trace;
use num::{BigRational, Zero, One};

/// Multiplies canonical operands, producing a canonical result whose
/// dimension is the sum of the operands' dimensions.
///
/// Constants are folded (their dimensions add), repeated factors are
/// merged into powers (`x * x ==> x^2`), and the dimensionless one is
/// dropped. Any zero factor annihilates the product. If any operand
/// is a fraction, the result is the reduced quotient of the product
/// of numerators by the product of denominators.
///
/// A constant times a single sum is distributed over the sum's terms
/// (`2 * (a+b) ==> 2*a + 2*b`), so that scaled and negated sums stay
/// flat and cancel against other sums.
pub fn normalize_product(operands: Vec<Expr>) -> Expr {
  let dimension = operands.iter().fold(Dimension::zero(), |acc, e| acc + e.dimension());
  let factors = flatten_product(operands);

  if factors.iter().any(Expr::is_fraction) {
    let mut numerators = Vec::with_capacity(factors.len());
    let mut denominators = Vec::new();
    for factor in factors {
      let (numerator, denominator) = split_fraction(factor);
      numerators.push(numerator);
      denominators.extend(denominator);
    }
    return reduce_fraction(normalize_product(numerators), normalize_product(denominators));
  }

  if factors.iter().any(Expr::is_zero) {
    return Expr::zero_of(dimension);
  }

  let mut factors = reduce_terms(factors, rewrite_mul, Expr::is_one);
  factors.retain(|f| !f.is_one());
  if let [a, b] = factors.as_slice() {
    if (a.is_constant() && b.is_sum()) || (a.is_sum() && b.is_constant()) {
      return distribute(factors, dimension);
    }
  }
  collapse(
    factors,
    Expr::is_one,
    || Expr::constant_with_dimension(BigRational::one(), dimension.clone()),
    |factors| Expr::product_node(factors, dimension.clone()),
  )
}

/// Multiplies each term of a sum by a constant. `factors` holds
/// exactly the constant and the sum, in either order.
fn distribute(mut factors: Vec<Expr>, dimension: Dimension) -> Expr {
  let sum_index = if factors[0].is_sum() { 0 } else { 1 };
  let sum = factors.swap_remove(sum_index);
  let coefficient = factors.swap_remove(0);
  trace!("distributing {} over {}", coefficient, sum);
  let terms = sum.into_children()
    .into_iter()
    .map(|term| normalize_product(vec![coefficient.clone(), term]))
    .collect();
  normalize_sum(terms, dimension)
}

/// Merges two factors of a product, if they can be merged. Powers
/// whose combined exponent would overflow are left unmerged.
fn rewrite_mul(a: &Expr, b: &Expr) -> Option<Expr> {
  match (a.value(), b.value()) {
    (Some(x), Some(y)) => {
      Some(Expr::constant_with_dimension(x * y, a.dimension() + b.dimension()))
    }
    (None, None) => {
      let (a_base, a_exponent) = Factor::split(a);
      let (b_base, b_exponent) = Factor::split(b);
      if a_base != b_base || a_base.dimension() != b_base.dimension() {
        return None;
      }
      let Some(exponent) = a_exponent.checked_add(b_exponent) else {
        trace!("exponent overflow merging {} with {}", a, b);
        return None;
      };
      Some(Factor { base: a_base.clone(), exponent }.into_expr())
    }
    _ => None,
  }
}
