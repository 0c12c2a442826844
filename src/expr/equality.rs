
//! Structural equality on expressions.
//!
//! Constants compare by value and variables by name; dimensions are
//! not consulted (use [`StrictEq`](crate::util::stricteq::StrictEq)
//! for that). Sums and products are compared as multisets, through a
//! maximum bipartite matching of their children rather than
//! first-fit pairing.

use super::{Expr, ExprKind};
use crate::util::matching::has_perfect_matching;

impl PartialEq for Expr {
  fn eq(&self, other: &Self) -> bool {
    match (&self.kind, &other.kind) {
      (ExprKind::Constant(a), ExprKind::Constant(b)) => a == b,
      (ExprKind::Variable(a), ExprKind::Variable(b)) => a == b,
      (ExprKind::Sum(a), ExprKind::Sum(b)) => multiset_eq(a, b),
      (ExprKind::Product(a), ExprKind::Product(b)) => multiset_eq(a, b),
      (ExprKind::Fraction(a), ExprKind::Fraction(b)) => a[0] == b[0] && a[1] == b[1],
      (ExprKind::Power(a, m), ExprKind::Power(b, n)) => m == n && a == b,
      _ => false,
    }
  }
}

impl Eq for Expr {}

fn multiset_eq(left: &[Expr], right: &[Expr]) -> bool {
  if left.len() != right.len() {
    return false;
  }
  // Canonical order usually lines the children up already.
  if left.iter().zip(right).all(|(a, b)| a == b) {
    return true;
  }
  has_perfect_matching(left.len(), |i, j| left[i] == right[j])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::Dimension;

  use num::{BigRational, Zero};

  fn var(name: &str) -> Expr {
    Expr::variable(name, Dimension::zero()).unwrap()
  }

  fn sum(terms: Vec<Expr>) -> Expr {
    Expr { kind: ExprKind::Sum(terms), dimension: Dimension::zero() }
  }

  fn product(factors: Vec<Expr>) -> Expr {
    Expr { kind: ExprKind::Product(factors), dimension: Dimension::zero() }
  }

  #[test]
  fn test_constants_compare_by_value() {
    assert_eq!(Expr::from(0), Expr::from(0));
    assert_eq!(Expr::ratio(2, 4), Expr::ratio(1, 2));
    assert_ne!(Expr::from(1), Expr::from(2));
  }

  #[test]
  fn test_constants_ignore_dimension() {
    let dimensioned = Expr::constant_with_dimension(BigRational::from_integer(3.into()), Dimension::length());
    assert_eq!(dimensioned, Expr::from(3));
  }

  #[test]
  fn test_variables_compare_by_name() {
    assert_eq!(var("x"), var("x"));
    assert_eq!(var("x"), Expr::length("x").unwrap());
    assert_ne!(var("x"), var("y"));
  }

  #[test]
  fn test_cross_kind_is_unequal() {
    assert_ne!(var("x"), Expr::from(1));
    assert_ne!(sum(vec![var("x"), var("y")]), product(vec![var("x"), var("y")]));
  }

  #[test]
  fn test_sum_is_order_independent() {
    let a = sum(vec![var("x"), var("y"), var("z")]);
    let b = sum(vec![var("z"), var("x"), var("y")]);
    assert_eq!(a, b);
  }

  #[test]
  fn test_sum_with_different_lengths() {
    let a = sum(vec![var("x"), var("y")]);
    let b = sum(vec![var("x"), var("y"), var("z")]);
    assert_ne!(a, b);
  }

  #[test]
  fn test_multiset_counts_duplicates() {
    let a = product(vec![var("x"), var("x"), var("y")]);
    let b = product(vec![var("x"), var("y"), var("y")]);
    assert_ne!(a, b);
    let c = product(vec![var("y"), var("x"), var("x")]);
    assert_eq!(a, c);
  }

  #[test]
  fn test_nested_multisets() {
    let a = sum(vec![product(vec![var("a"), var("b")]), product(vec![var("c"), var("d")])]);
    let b = sum(vec![product(vec![var("d"), var("c")]), product(vec![var("b"), var("a")])]);
    assert_eq!(a, b);
  }

  #[test]
  fn test_fraction_is_ordered() {
    let a = Expr::fraction_node(var("x"), var("y"));
    let b = Expr::fraction_node(var("y"), var("x"));
    assert_eq!(a, Expr::fraction_node(var("x"), var("y")));
    assert_ne!(a, b);
  }

  #[test]
  fn test_power_compares_exponent() {
    assert_eq!(Expr::power_node(var("x"), 2), Expr::power_node(var("x"), 2));
    assert_ne!(Expr::power_node(var("x"), 2), Expr::power_node(var("x"), 3));
    assert_ne!(Expr::power_node(var("x"), 2), Expr::power_node(var("y"), 2));
  }
}
