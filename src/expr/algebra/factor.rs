use super::term::Term;
use crate::expr::Expr;
use crate::expr::simplifier::normalize_product;
use crate::units::Dimension;

use num::{BigRational, Integer, Signed, Zero, One};

/// A factor consists of a base expression and a positive integer
/// exponent.
///
/// Invariant: The base of a factor is not a power, a product, or a
/// constant.
///
/// Every non-constant factor of a product can be interpreted as a
/// `Factor`. Powers are treated as nontrivial factors with an
/// explicit exponent, while any other expression is its own base with
/// exponent one.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
  pub base: Expr,
  pub exponent: i64,
}

/// An expression viewed as a rational coefficient (with the dimension
/// of the constant it came from) times a list of factors with
/// pairwise distinct bases.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
  coefficient: BigRational,
  coefficient_dimension: Dimension,
  factors: Vec<Factor>,
}

impl Factor {
  /// Borrowing variant of [`Factor::parse`].
  pub fn split(expr: &Expr) -> (&Expr, i64) {
    expr.as_power().unwrap_or((expr, 1))
  }

  pub fn parse(expr: Expr) -> Factor {
    if expr.is_power() {
      let (_, exponent) = Factor::split(&expr);
      let base = expr.into_children().swap_remove(0);
      Factor { base, exponent }
    } else {
      Factor { base: expr, exponent: 1 }
    }
  }

  /// Converts back to an expression. An exponent of zero yields the
  /// dimensionless one, and an exponent of one yields the bare base.
  pub fn into_expr(self) -> Expr {
    match self.exponent {
      0 => Expr::one(),
      1 => self.base,
      n => Expr::power_node(self.base, n),
    }
  }
}

impl Factorization {
  /// The empty factorization, representing the dimensionless one.
  pub fn one() -> Factorization {
    Factorization {
      coefficient: BigRational::one(),
      coefficient_dimension: Dimension::zero(),
      factors: Vec::new(),
    }
  }

  pub fn of(expr: Expr) -> Factorization {
    let mut result = Factorization::one();
    if expr.is_product() {
      for factor in expr.into_children() {
        result.push(factor);
      }
    } else {
      result.push(expr);
    }
    result
  }

  fn push(&mut self, expr: Expr) {
    if let Some(value) = expr.value() {
      self.coefficient *= value;
      self.coefficient_dimension = &self.coefficient_dimension + expr.dimension();
      return;
    }
    if expr.is_sum() {
      // Pull the common rational factor out of the terms, so that
      // `2*a + 2*b` factors as `2 * (a+b)`.
      let content = sum_content(expr.children());
      if !content.is_one() {
        let base = normalize_product(vec![Expr::constant(content.recip()), expr]);
        self.coefficient *= content;
        self.factors.push(Factor::parse(base));
        return;
      }
    }
    self.factors.push(Factor::parse(expr));
  }

  pub fn coefficient(&self) -> &BigRational {
    &self.coefficient
  }

  pub fn factors(&self) -> &[Factor] {
    &self.factors
  }

  /// Splits off the constant coefficient, returning it (as a
  /// dimensioned constant) together with the factorization of the
  /// remaining factors.
  pub fn split_coefficient(self) -> (Expr, Factorization) {
    let coefficient = Expr::constant_with_dimension(self.coefficient, self.coefficient_dimension);
    let rest = Factorization { factors: self.factors, ..Factorization::one() };
    (coefficient, rest)
  }

  pub fn into_expr(self) -> Expr {
    let mut operands = Vec::with_capacity(self.factors.len() + 1);
    operands.push(Expr::constant_with_dimension(self.coefficient, self.coefficient_dimension));
    operands.extend(self.factors.into_iter().map(Factor::into_expr));
    normalize_product(operands)
  }
}

/// The [`rational_gcd`] of the coefficients of the terms of a sum.
///
/// The sign is taken from the term whose body sorts first (a constant
/// term, if any), so that a sum and its negation factor into the same
/// base with opposite coefficients.
fn sum_content(terms: &[Expr]) -> BigRational {
  let coefficients: Vec<(Option<String>, BigRational)> = terms.iter()
    .map(|term| match Term::parse(term) {
      Some(term) => {
        let (coefficient, body) = term.into_parts();
        (Some(body.to_string()), coefficient)
      }
      None => (None, term.value().cloned().unwrap_or_else(BigRational::one)),
    })
    .collect();
  let Some((_, leading)) = coefficients.iter().min_by(|a, b| a.0.cmp(&b.0)) else {
    return BigRational::one();
  };
  let gcd = coefficients.iter().fold(leading.abs(), |acc, (_, c)| rational_gcd(&acc, c));
  if leading.is_negative() { -gcd } else { gcd }
}

/// Greatest common divisor of two rational numbers, defined as the
/// largest positive rational `g` such that both `a / g` and `b / g`
/// are integers. Concretely, `gcd(p/q, r/s) = gcd(p, r) / lcm(q, s)`.
///
/// Returns one if both arguments are zero.
pub fn rational_gcd(a: &BigRational, b: &BigRational) -> BigRational {
  let numer = a.numer().gcd(b.numer());
  if numer.is_zero() {
    return BigRational::one();
  }
  let denom = a.denom().lcm(b.denom());
  BigRational::new(numer, denom)
}

/// Factors two expressions, finding their greatest common divisor.
/// Returns `(g, n, d)` such that `numerator = g * n` and `denominator
/// = g * d`.
///
/// The rational coefficients contribute their [`rational_gcd`]. Every
/// base occurring in both expressions contributes the smaller of its
/// two exponents. Bases are compared structurally and must agree in
/// dimension, so sums are treated as opaque factors (`(x+y)*z` and
/// `(x+y)*w` share `x+y`).
/// The common factor is dimensionless in its coefficient; any
/// dimension on the coefficients stays with `n` and `d`.
pub fn common_factor(numerator: Expr, denominator: Expr) -> (Expr, Expr, Expr) {
  let mut numerator = Factorization::of(numerator);
  let mut denominator = Factorization::of(denominator);

  let gcd = rational_gcd(&numerator.coefficient, &denominator.coefficient);
  numerator.coefficient /= &gcd;
  denominator.coefficient /= &gcd;
  let mut common = Factorization { coefficient: gcd, ..Factorization::one() };

  for factor in &mut numerator.factors {
    let Some(other) = denominator.factors.iter_mut().find(|f| f.exponent > 0 && f.base == factor.base && f.base.dimension() == factor.base.dimension()) else {
      continue;
    };
    let shared = factor.exponent.min(other.exponent);
    factor.exponent -= shared;
    other.exponent -= shared;
    common.factors.push(Factor { base: factor.base.clone(), exponent: shared });
  }
  numerator.factors.retain(|f| f.exponent != 0);
  denominator.factors.retain(|f| f.exponent != 0);

  (common.into_expr(), numerator.into_expr(), denominator.into_expr())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  fn var(name: &str) -> Expr {
    Expr::variable(name, Dimension::zero()).unwrap()
  }

  fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
  }

  #[test]
  fn test_rational_gcd_of_integers() {
    assert_eq!(rational_gcd(&ratio(6, 1), &ratio(4, 1)), ratio(2, 1));
    assert_eq!(rational_gcd(&ratio(-6, 1), &ratio(3, 1)), ratio(3, 1));
    assert_eq!(rational_gcd(&ratio(7, 1), &ratio(5, 1)), ratio(1, 1));
  }

  #[test]
  fn test_rational_gcd_of_fractions() {
    assert_eq!(rational_gcd(&ratio(1, 2), &ratio(1, 3)), ratio(1, 6));
    assert_eq!(rational_gcd(&ratio(3, 4), &ratio(9, 8)), ratio(3, 8));
  }

  #[test]
  fn test_rational_gcd_with_zero() {
    assert_eq!(rational_gcd(&ratio(0, 1), &ratio(5, 2)), ratio(5, 2));
    assert_eq!(rational_gcd(&ratio(0, 1), &ratio(0, 1)), ratio(1, 1));
  }

  #[test]
  fn test_factor_parse() {
    let factor = Factor::parse(var("x") * var("x") * var("x"));
    assert_eq!(factor, Factor { base: var("x"), exponent: 3 });
    let factor = Factor::parse(var("x"));
    assert_eq!(factor, Factor { base: var("x"), exponent: 1 });
  }

  #[test]
  fn test_factor_into_expr() {
    assert_strict_eq!(Factor { base: var("x"), exponent: 0 }.into_expr(), Expr::one());
    assert_strict_eq!(Factor { base: var("x"), exponent: 1 }.into_expr(), var("x"));
    assert_strict_eq!(Factor { base: var("x"), exponent: 2 }.into_expr(), var("x") * var("x"));
  }

  #[test]
  fn test_factorization_of_product() {
    let expr = Expr::from(6) * var("x") * var("y") * var("y");
    let factorization = Factorization::of(expr);
    assert_eq!(factorization.coefficient(), &ratio(6, 1));
    // Canonical order puts the parenthesized `(y^2)` before `x`.
    assert_eq!(factorization.factors(), &[
      Factor { base: var("y"), exponent: 2 },
      Factor { base: var("x"), exponent: 1 },
    ]);
  }

  #[test]
  fn test_factorization_of_constant() {
    let factorization = Factorization::of(Expr::ratio(3, 2));
    assert_eq!(factorization.coefficient(), &ratio(3, 2));
    assert!(factorization.factors().is_empty());
  }

  #[test]
  fn test_factorization_roundtrip() {
    let expr = Expr::from(6) * var("x") * var("y") * var("y");
    assert_strict_eq!(Factorization::of(expr.clone()).into_expr(), expr);
  }

  #[test]
  fn test_split_coefficient() {
    let expr = Expr::from(4) * var("x") * var("y");
    let (coefficient, rest) = Factorization::of(expr).split_coefficient();
    assert_strict_eq!(coefficient, Expr::from(4));
    assert_strict_eq!(rest.into_expr(), var("x") * var("y"));
  }

  #[test]
  fn test_common_factor_of_constants() {
    let (g, n, d) = common_factor(Expr::from(6), Expr::from(3));
    assert_strict_eq!(g, Expr::from(3));
    assert_strict_eq!(n, Expr::from(2));
    assert_strict_eq!(d, Expr::from(1));
  }

  #[test]
  fn test_common_factor_of_symbols() {
    let (g, n, d) = common_factor(var("x") * var("y"), var("x") * var("z"));
    assert_strict_eq!(g, var("x"));
    assert_strict_eq!(n, var("y"));
    assert_strict_eq!(d, var("z"));
  }

  #[test]
  fn test_common_factor_takes_smaller_exponent() {
    let x = var("x");
    let x3 = x.clone() * x.clone() * x.clone();
    let x2 = x.clone() * x.clone();
    let (g, n, d) = common_factor(x3 * Expr::from(4), x2 * var("y") * Expr::from(10));
    assert_strict_eq!(g, Expr::from(2) * x.clone() * x.clone());
    assert_strict_eq!(n, Expr::from(2) * x);
    assert_strict_eq!(d, Expr::from(5) * var("y"));
  }

  #[test]
  fn test_common_factor_with_opaque_sum() {
    let s = var("a") + var("b");
    let (g, n, d) = common_factor(s.clone() * var("z"), s.clone() * var("w"));
    assert_strict_eq!(g, s);
    assert_strict_eq!(n, var("z"));
    assert_strict_eq!(d, var("w"));
  }

  #[test]
  fn test_factorization_extracts_sum_content() {
    let sum = Expr::from(4) * var("a") + Expr::from(6) * var("b");
    assert!(sum.is_sum());
    let factorization = Factorization::of(sum);
    assert_eq!(factorization.coefficient(), &ratio(2, 1));
    assert_eq!(factorization.factors(), &[
      Factor { base: Expr::from(2) * var("a") + Expr::from(3) * var("b"), exponent: 1 },
    ]);
  }

  #[test]
  fn test_common_factor_of_scaled_sums() {
    let s = var("a") + var("b");
    let (g, n, d) = common_factor(Expr::from(2) * s.clone(), s.clone());
    assert_strict_eq!(g, s);
    assert_strict_eq!(n, Expr::from(2));
    assert_strict_eq!(d, Expr::one());
  }

  #[test]
  fn test_negated_sum_factors_out_sign() {
    let s = var("a") + var("b");
    let factorization = Factorization::of(-s.clone());
    assert_eq!(factorization.coefficient(), &ratio(-1, 1));
    assert_eq!(factorization.factors(), &[Factor { base: s, exponent: 1 }]);
  }

  #[test]
  fn test_sum_content_sign_is_stable_under_negation() {
    let difference = var("a") - var("b");
    let negated = -difference.clone();
    let (c1, rest1) = Factorization::of(difference).split_coefficient();
    let (c2, rest2) = Factorization::of(negated).split_coefficient();
    assert_strict_eq!(c1, Expr::from(1));
    assert_strict_eq!(c2, Expr::from(-1));
    assert_strict_eq!(rest1.into_expr(), rest2.into_expr());
  }

  #[test]
  fn test_common_factor_with_nothing_shared() {
    let (g, n, d) = common_factor(var("x"), var("y"));
    assert_strict_eq!(g, Expr::one());
    assert_strict_eq!(n, var("x"));
    assert_strict_eq!(d, var("y"));
  }
}
