
//! Symbolic physical quantities.
//!
//! Quantities are [`Expr`] trees whose nodes carry a [`Dimension`]
//! (exponents of mass, length, and time). Expressions are combined
//! with the usual arithmetic operators and are kept in a canonical
//! simplified form after every operation, so that algebraically
//! identical expressions built in different ways compare equal.

pub mod expr;
pub mod units;
pub mod util;

pub use expr::{Expr, ExprKind, ExprError};
pub use expr::var::Var;
pub use expr::var::table::{VarTable, SharedVarTable};
pub use units::{Dimension, BaseDimension};
pub use util::TryPow;
