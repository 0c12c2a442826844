use super::flattener::flatten_sum;
use super::reducer::{reduce_terms, collapse};
use crate::expr::Expr;
use crate::expr::algebra::term::Term;
use crate::units::Dimension;

use num::Zero;

/// Adds canonical operands which all have the given dimension,
/// producing a canonical result. The caller is responsible for
/// checking that the dimensions agree.
///
/// Constants are folded into a single constant, like terms are merged
/// by adding their coefficients (`x + x ==> 2*x`), and zero constants
/// are dropped. An empty result is the zero constant of `dimension`.
pub fn normalize_sum(operands: Vec<Expr>, dimension: Dimension) -> Expr {
  debug_assert!(operands.iter().all(|e| e.dimension() == &dimension), "Sum of mismatched dimensions");
  let terms = flatten_sum(operands);
  let terms = reduce_terms(terms, |a, b| rewrite_add(a, b, &dimension), Expr::is_zero);
  collapse(
    terms,
    Expr::is_zero,
    || Expr::zero_of(dimension.clone()),
    |terms| Expr::sum_node(terms, dimension.clone()),
  )
}

/// Merges two terms of a sum, if they can be merged.
fn rewrite_add(a: &Expr, b: &Expr, dimension: &Dimension) -> Option<Expr> {
  match (a.value(), b.value()) {
    (Some(x), Some(y)) => {
      Some(Expr::constant_with_dimension(x + y, dimension.clone()))
    }
    (None, None) => {
      let a = Term::parse(a)?;
      let b = Term::parse(b)?;
      if a.body() != b.body() {
        return None;
      }
      let (a_coefficient, _) = a.into_parts();
      let (b_coefficient, body) = b.into_parts();
      let coefficient = a_coefficient + b_coefficient;
      if coefficient.is_zero() {
        Some(Expr::zero_of(dimension.clone()))
      } else {
        Some(Term::new(coefficient, body).into_expr(dimension.clone()))
      }
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  use num::BigRational;

  fn x() -> Expr {
    Expr::length("x").unwrap()
  }

  fn y() -> Expr {
    Expr::length("y").unwrap()
  }

  fn metres(n: i64) -> Expr {
    Expr::constant_with_dimension(BigRational::from_integer(n.into()), Dimension::length())
  }

  fn sum(operands: Vec<Expr>) -> Expr {
    normalize_sum(operands, Dimension::length())
  }

  #[test]
  fn test_single_operand() {
    assert_strict_eq!(sum(vec![x()]), x());
  }

  #[test]
  fn test_empty_sum_is_zero_of_dimension() {
    assert_strict_eq!(sum(Vec::new()), Expr::zero_of(Dimension::length()));
  }

  #[test]
  fn test_sorted_output() {
    let result = sum(vec![y(), x()]);
    assert_strict_eq!(result, Expr::sum_node(vec![x(), y()], Dimension::length()));
  }

  #[test]
  fn test_constants_fold() {
    let result = sum(vec![metres(2), x(), metres(3)]);
    assert_strict_eq!(result, Expr::sum_node(vec![metres(5), x()], Dimension::length()));
  }

  #[test]
  fn test_zero_is_stripped() {
    assert_strict_eq!(sum(vec![x(), metres(0)]), x());
    assert_strict_eq!(sum(vec![metres(0), metres(0)]), metres(0));
  }

  #[test]
  fn test_cancelling_constants_vanish() {
    let result = sum(vec![metres(2), x(), metres(-2)]);
    assert_strict_eq!(result, x());
  }

  #[test]
  fn test_like_terms_merge() {
    let result = sum(vec![x(), x()]);
    assert_eq!(result.to_string(), "(2*x)");
    assert!(result.is_product());
    assert_eq!(result.dimension(), &Dimension::length());
  }

  #[test]
  fn test_coefficients_add() {
    let result = sum(vec![Expr::from(2) * x(), x(), Expr::from(3) * x()]);
    assert_eq!(result.to_string(), "(6*x)");
  }

  #[test]
  fn test_like_terms_cancel() {
    let result = sum(vec![x(), y(), -x()]);
    assert_strict_eq!(result, y());
    let result = sum(vec![x(), -x()]);
    assert_strict_eq!(result, Expr::zero_of(Dimension::length()));
  }

  #[test]
  fn test_cancellation_does_not_leave_second_constant() {
    let result = sum(vec![metres(3), x(), -x(), metres(4)]);
    assert_strict_eq!(result, metres(7));
  }

  #[test]
  fn test_nested_sums_flatten() {
    let inner = sum(vec![x(), metres(1)]);
    let result = sum(vec![inner, y(), metres(1)]);
    assert_eq!(result.to_string(), "(2+x+y)");
  }
}
