
//! Symbolic expressions over dimensioned quantities.
//!
//! An [`Expr`] is always kept in canonical form: the arithmetic
//! operators defined in [`arithmetic`] run the normalization passes
//! in [`simplifier`] on every result, so there is no way to observe a
//! nested sum, an unfolded constant, or an unreduced fraction from
//! outside this module.

pub mod algebra;
pub mod arithmetic;
pub mod error;
pub mod ordering;
pub mod simplifier;
pub mod var;
pub mod walker;

mod equality;

pub use error::ExprError;

use var::Var;
use crate::units::Dimension;
use crate::util::stricteq::StrictEq;

use itertools::Itertools;
use num::{BigInt, BigRational, Zero, One};
use num::pow::Pow;
use serde::Serialize;

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::slice;

/// A symbolic expression together with its physical dimension.
///
/// Expressions are immutable. Every operator returns a new tree, and
/// `Clone` produces a fully independent copy.
#[derive(Debug, Clone, Serialize)]
pub struct Expr {
  kind: ExprKind,
  dimension: Dimension,
}

/// The shape of an [`Expr`].
///
/// Values of this type can only be inspected from outside the crate;
/// expressions are built through the constructors and operators on
/// `Expr`, which maintain the canonical form.
#[derive(Debug, Clone, Serialize)]
pub enum ExprKind {
  /// An exact rational constant.
  Constant(BigRational),
  /// A named quantity.
  Variable(Var),
  /// Two or more terms, all of the same dimension. Never contains a
  /// nested sum, more than one constant, or a zero constant.
  Sum(Vec<Expr>),
  /// Two or more factors. Never contains a nested product, a
  /// fraction, more than one constant, or the dimensionless one.
  Product(Vec<Expr>),
  /// Numerator and denominator, in that order. The denominator is
  /// never a constant and carries no constant coefficient.
  Fraction(Box<[Expr; 2]>),
  /// A repeated factor `base^exponent`, with `exponent >= 2`.
  Power(Box<Expr>, i64),
}

impl Expr {
  /// A dimensionless constant.
  pub fn constant(value: BigRational) -> Expr {
    Expr::constant_with_dimension(value, Dimension::zero())
  }

  /// A constant carrying a dimension, such as a conversion factor.
  pub fn constant_with_dimension(value: BigRational, dimension: Dimension) -> Expr {
    Expr { kind: ExprKind::Constant(value), dimension }
  }

  /// A dimensionless rational constant `numer / denom`.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Expr {
    Expr::constant(BigRational::new(numer.into(), denom.into()))
  }

  pub fn zero() -> Expr {
    Expr::constant(BigRational::zero())
  }

  pub fn one() -> Expr {
    Expr::constant(BigRational::one())
  }

  /// The zero constant of the given dimension.
  pub fn zero_of(dimension: Dimension) -> Expr {
    Expr::constant_with_dimension(BigRational::zero(), dimension)
  }

  /// A named quantity of the given dimension. Fails if the name is
  /// not a valid [`Var`].
  pub fn variable(name: impl Into<String>, dimension: Dimension) -> Result<Expr, ExprError> {
    let var = Var::try_from(name.into())?;
    Ok(Expr::from_var(var, dimension))
  }

  pub fn from_var(var: Var, dimension: Dimension) -> Expr {
    Expr { kind: ExprKind::Variable(var), dimension }
  }

  /// A variable with the dimension of mass.
  pub fn mass(name: impl Into<String>) -> Result<Expr, ExprError> {
    Expr::variable(name, Dimension::mass())
  }

  /// A variable with the dimension of length.
  pub fn length(name: impl Into<String>) -> Result<Expr, ExprError> {
    Expr::variable(name, Dimension::length())
  }

  /// A variable with the dimension of time.
  pub fn time(name: impl Into<String>) -> Result<Expr, ExprError> {
    Expr::variable(name, Dimension::time())
  }

  pub fn kind(&self) -> &ExprKind {
    &self.kind
  }

  pub fn dimension(&self) -> &Dimension {
    &self.dimension
  }

  pub fn into_parts(self) -> (ExprKind, Dimension) {
    (self.kind, self.dimension)
  }

  /// The immediate subexpressions. Empty for constants and variables.
  /// A fraction yields its numerator and then its denominator, and a
  /// power yields its base.
  pub fn children(&self) -> &[Expr] {
    match &self.kind {
      ExprKind::Constant(_) | ExprKind::Variable(_) => &[],
      ExprKind::Sum(terms) => terms,
      ExprKind::Product(factors) => factors,
      ExprKind::Fraction(parts) => parts.as_slice(),
      ExprKind::Power(base, _) => slice::from_ref(base.as_ref()),
    }
  }

  /// Owned copy of the immediate subexpressions, which the caller is
  /// free to modify.
  pub fn into_children(self) -> Vec<Expr> {
    match self.kind {
      ExprKind::Constant(_) | ExprKind::Variable(_) => Vec::new(),
      ExprKind::Sum(terms) => terms,
      ExprKind::Product(factors) => factors,
      ExprKind::Fraction(parts) => {
        let [numerator, denominator] = *parts;
        vec![numerator, denominator]
      }
      ExprKind::Power(base, _) => vec![*base],
    }
  }

  /// The value of a constant.
  pub fn value(&self) -> Option<&BigRational> {
    match &self.kind {
      ExprKind::Constant(value) => Some(value),
      _ => None,
    }
  }

  /// The name of a variable.
  pub fn name(&self) -> Option<&Var> {
    match &self.kind {
      ExprKind::Variable(var) => Some(var),
      _ => None,
    }
  }

  pub fn as_fraction(&self) -> Option<(&Expr, &Expr)> {
    match &self.kind {
      ExprKind::Fraction(parts) => Some((&parts[0], &parts[1])),
      _ => None,
    }
  }

  pub fn as_power(&self) -> Option<(&Expr, i64)> {
    match &self.kind {
      ExprKind::Power(base, exponent) => Some((base, *exponent)),
      _ => None,
    }
  }

  pub fn is_constant(&self) -> bool {
    matches!(self.kind, ExprKind::Constant(_))
  }

  pub fn is_variable(&self) -> bool {
    matches!(self.kind, ExprKind::Variable(_))
  }

  pub fn is_sum(&self) -> bool {
    matches!(self.kind, ExprKind::Sum(_))
  }

  pub fn is_product(&self) -> bool {
    matches!(self.kind, ExprKind::Product(_))
  }

  pub fn is_fraction(&self) -> bool {
    matches!(self.kind, ExprKind::Fraction(_))
  }

  pub fn is_power(&self) -> bool {
    matches!(self.kind, ExprKind::Power(_, _))
  }

  /// True for a zero constant of any dimension.
  pub fn is_zero(&self) -> bool {
    self.value().map_or(false, BigRational::is_zero)
  }

  /// True for the dimensionless constant one, the multiplicative
  /// identity. A dimensioned constant with value one is not an
  /// identity and returns false.
  pub fn is_one(&self) -> bool {
    self.value().map_or(false, BigRational::is_one) && self.dimension.is_zero()
  }

  /// The distinct variables occurring anywhere in this expression,
  /// in sorted order.
  pub fn variables(&self) -> BTreeSet<&Var> {
    let mut vars = BTreeSet::new();
    walker::postorder_walk_borrowed(self, |e| {
      if let Some(var) = e.name() {
        vars.insert(var);
      }
    });
    vars
  }

  /// Builds a sum node from already-normalized terms.
  pub(crate) fn sum_node(terms: Vec<Expr>, dimension: Dimension) -> Expr {
    debug_assert!(terms.len() >= 2, "Sum node with fewer than two terms");
    debug_assert!(terms.iter().all(|t| t.dimension == dimension), "Sum node with mismatched term dimensions");
    Expr { kind: ExprKind::Sum(terms), dimension }
  }

  /// Builds a product node from already-normalized factors.
  pub(crate) fn product_node(factors: Vec<Expr>, dimension: Dimension) -> Expr {
    debug_assert!(factors.len() >= 2, "Product node with fewer than two factors");
    debug_assert_eq!(
      factors.iter().fold(Dimension::zero(), |acc, f| acc + f.dimension.clone()),
      dimension,
      "Product node with inconsistent dimension",
    );
    Expr { kind: ExprKind::Product(factors), dimension }
  }

  pub(crate) fn fraction_node(numerator: Expr, denominator: Expr) -> Expr {
    debug_assert!(!denominator.is_constant(), "Fraction node with constant denominator");
    let dimension = &numerator.dimension - &denominator.dimension;
    Expr { kind: ExprKind::Fraction(Box::new([numerator, denominator])), dimension }
  }

  pub(crate) fn power_node(base: Expr, exponent: i64) -> Expr {
    debug_assert!(exponent >= 2, "Power node with trivial exponent {exponent}");
    let dimension = base.dimension.pow(exponent);
    Expr { kind: ExprKind::Power(Box::new(base), exponent), dimension }
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::constant(BigRational::from_integer(BigInt::from(n)))
  }
}

impl From<BigInt> for Expr {
  fn from(n: BigInt) -> Expr {
    Expr::constant(BigRational::from_integer(n))
  }
}

impl From<BigRational> for Expr {
  fn from(r: BigRational) -> Expr {
    Expr::constant(r)
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      ExprKind::Constant(value) => write!(f, "{value}"),
      ExprKind::Variable(var) => write!(f, "{var}"),
      ExprKind::Sum(terms) => write!(f, "({})", terms.iter().join("+")),
      ExprKind::Product(factors) => write!(f, "({})", factors.iter().join("*")),
      ExprKind::Fraction(parts) => write!(f, "({}/{})", parts[0], parts[1]),
      ExprKind::Power(base, exponent) => write!(f, "({base}^{exponent})"),
    }
  }
}

impl StrictEq for Expr {
  fn strict_eq(&self, other: &Self) -> bool {
    if self.dimension != other.dimension {
      return false;
    }
    match (&self.kind, &other.kind) {
      (ExprKind::Constant(a), ExprKind::Constant(b)) => a == b,
      (ExprKind::Variable(a), ExprKind::Variable(b)) => a == b,
      (ExprKind::Power(a, m), ExprKind::Power(b, n)) => m == n && a.strict_eq(b),
      (ExprKind::Sum(_), ExprKind::Sum(_)) |
      (ExprKind::Product(_), ExprKind::Product(_)) |
      (ExprKind::Fraction(_), ExprKind::Fraction(_)) => {
        let (a, b) = (self.children(), other.children());
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
      }
      _ => false,
    }
  }
}
