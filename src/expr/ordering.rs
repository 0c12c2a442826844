//! This module defines the canonical ordering used when sorting the
//! children of sums and products. The ordering has the following
//! properties.
//!
//! * All constants sort before all other expressions. (A sum or
//! product contains at most one constant, so constants need no
//! ordering among themselves.)
//!
//! * Non-constant expressions sort by their rendered form.
//!
//! The ordering carries no algebraic meaning. It exists so that equal
//! sums and products render identically and usually compare equal
//! child-by-child, without falling back to multiset matching.

use super::Expr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum OrderedExpr {
  Constant,
  Named(String),
}

impl OrderedExpr {
  fn new(e: &Expr) -> Self {
    if e.is_constant() {
      OrderedExpr::Constant
    } else {
      OrderedExpr::Named(e.to_string())
    }
  }
}

/// Sorts terms into canonical order. The sort is stable.
pub fn sort_canonical(terms: &mut [Expr]) {
  terms.sort_by_cached_key(OrderedExpr::new);
}
