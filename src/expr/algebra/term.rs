use crate::expr::{Expr, ExprKind};
use crate::expr::simplifier::normalize_product;
use crate::units::Dimension;

use num::{BigRational, One};

/// A `Term` is a non-constant [`Expr`], viewed as an exact rational
/// coefficient multiplied by a body. Like terms of a sum are those
/// whose bodies are equal, and they merge by adding coefficients.
///
/// The coefficient is a bare number. Any dimension carried by the
/// constant it came from is restored by [`Term::into_expr`], which
/// assigns the constant whatever dimension the body lacks.
///
/// * A product with a constant factor `c` has coefficient `c` and the
/// remaining factors as its body.
///
/// * A fraction has the coefficient of its numerator, and its body is
/// the fraction with that coefficient removed (so `(3*x)/y` has body
/// `x/y`, and `5/y` has body `1/y`).
///
/// * Any other non-constant expression has coefficient one and is its
/// own body.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
  coefficient: BigRational,
  body: Expr,
}

impl Term {
  pub fn new(coefficient: BigRational, body: Expr) -> Term {
    Term { coefficient, body }
  }

  /// Splits an expression into coefficient and body. Returns `None`
  /// for constants, which have no body.
  pub fn parse(expr: &Expr) -> Option<Term> {
    match expr.kind() {
      ExprKind::Constant(_) => None,
      ExprKind::Product(factors) => {
        let Some((index, coefficient)) = factors.iter()
          .enumerate()
          .find_map(|(i, f)| f.value().map(|v| (i, v.clone()))) else {
            return Some(Term::trivial(expr.clone()));
          };
        let mut rest = factors.clone();
        let constant = rest.remove(index);
        let body_dimension = expr.dimension() - constant.dimension();
        let body = if rest.len() == 1 {
          rest.swap_remove(0)
        } else {
          Expr::product_node(rest, body_dimension)
        };
        Some(Term { coefficient, body })
      }
      ExprKind::Fraction(parts) => {
        let [numerator, denominator] = &**parts;
        let (coefficient, numerator_body) = match Term::parse(numerator) {
          Some(term) => (term.coefficient, term.body),
          None => (numerator.value().cloned().unwrap_or_else(BigRational::one), Expr::one()),
        };
        if coefficient.is_one() {
          return Some(Term::trivial(expr.clone()));
        }
        Some(Term {
          coefficient,
          body: Expr::fraction_node(numerator_body, denominator.clone()),
        })
      }
      _ => Some(Term::trivial(expr.clone())),
    }
  }

  fn trivial(body: Expr) -> Term {
    Term { coefficient: BigRational::one(), body }
  }

  pub fn coefficient(&self) -> &BigRational {
    &self.coefficient
  }

  pub fn body(&self) -> &Expr {
    &self.body
  }

  pub fn into_parts(self) -> (BigRational, Expr) {
    (self.coefficient, self.body)
  }

  /// Rebuilds the expression `coefficient * body`, with the result
  /// having the given dimension.
  pub fn into_expr(self, dimension: Dimension) -> Expr {
    if self.coefficient.is_one() && self.body.dimension() == &dimension {
      return self.body;
    }
    let coefficient_dimension = &dimension - self.body.dimension();
    normalize_product(vec![
      Expr::constant_with_dimension(self.coefficient, coefficient_dimension),
      self.body,
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  use num::Zero;

  fn var(name: &str) -> Expr {
    Expr::variable(name, Dimension::zero()).unwrap()
  }

  fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
  }

  #[test]
  fn test_constant_has_no_term() {
    assert_eq!(Term::parse(&Expr::from(3)), None);
  }

  #[test]
  fn test_variable_is_trivial_term() {
    let term = Term::parse(&var("x")).unwrap();
    assert_eq!(term.coefficient(), &BigRational::one());
    assert_eq!(term.body(), &var("x"));
  }

  #[test]
  fn test_product_with_coefficient() {
    let expr = Expr::from(3) * var("x") * var("y");
    let term = Term::parse(&expr).unwrap();
    assert_eq!(term.coefficient(), &ratio(3, 1));
    assert_strict_eq!(*term.body(), var("x") * var("y"));
  }

  #[test]
  fn test_product_with_single_remaining_factor() {
    let expr = Expr::ratio(-1, 2) * var("x");
    let term = Term::parse(&expr).unwrap();
    assert_eq!(term.coefficient(), &ratio(-1, 2));
    assert_strict_eq!(*term.body(), var("x"));
  }

  #[test]
  fn test_product_without_coefficient() {
    let expr = var("x") * var("y");
    let term = Term::parse(&expr).unwrap();
    assert_eq!(term.coefficient(), &BigRational::one());
    assert_strict_eq!(*term.body(), expr);
  }

  #[test]
  fn test_fraction_with_coefficient() {
    let expr = (Expr::from(3) * var("x")) / var("y");
    let term = Term::parse(&expr).unwrap();
    assert_eq!(term.coefficient(), &ratio(3, 1));
    assert_strict_eq!(*term.body(), var("x") / var("y"));
  }

  #[test]
  fn test_fraction_with_constant_numerator() {
    let expr = Expr::from(5) / var("y");
    let term = Term::parse(&expr).unwrap();
    assert_eq!(term.coefficient(), &ratio(5, 1));
    assert_strict_eq!(*term.body(), Expr::from(1) / var("y"));
  }

  #[test]
  fn test_roundtrip() {
    let exprs = vec![
      var("x"),
      Expr::from(4) * var("x"),
      Expr::from(4) * var("x") * var("z"),
      (Expr::from(2) * var("x")) / var("y"),
      Expr::from(7) / var("y"),
    ];
    for expr in exprs {
      let dimension = expr.dimension().clone();
      let term = Term::parse(&expr).unwrap();
      assert_strict_eq!(term.into_expr(dimension), expr);
    }
  }

  #[test]
  fn test_into_expr_restores_coefficient_dimension() {
    let l = Expr::length("l").unwrap();
    let expr = Expr::constant_with_dimension(ratio(2, 1), Dimension::time()) * l.clone();
    let term = Term::parse(&expr).unwrap();
    assert_strict_eq!(*term.body(), l);
    let rebuilt = term.into_expr(Dimension::new(0, 1, 1));
    assert_strict_eq!(rebuilt, expr);
  }
}
