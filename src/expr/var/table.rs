
//! Registries of declared quantities.

use super::Var;
use crate::expr::{Expr, ExprError};
use crate::units::Dimension;

use log::debug;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, LockResult, PoisonError};

/// A table of declared variables, keyed by name.
///
/// Definitions are first-writer-wins: once a name is bound, later
/// attempts to define it return the original binding unchanged,
/// regardless of the dimension they ask for.
#[derive(Debug, Clone, Default)]
pub struct VarTable {
  data: HashMap<Var, Expr>,
}

/// A [`VarTable`] that can be shared between threads.
#[derive(Debug, Default)]
pub struct SharedVarTable {
  table: Mutex<VarTable>,
}

impl VarTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self { data: HashMap::with_capacity(capacity) }
  }

  /// Declares a variable with the given dimension, or returns the
  /// existing declaration if the name is already bound. Fails if the
  /// name is invalid.
  pub fn define(&mut self, name: impl Into<String>, dimension: Dimension) -> Result<Expr, ExprError> {
    let var = Var::try_from(name.into())?;
    if let Some(existing) = self.data.get(&var) {
      if existing.dimension() != &dimension {
        debug!("'{}' already defined with dimension {}, ignoring {}", var, existing.dimension(), dimension);
      }
      return Ok(existing.clone());
    }
    let expr = Expr::from_var(var.clone(), dimension);
    self.data.insert(var, expr.clone());
    Ok(expr)
  }

  pub fn get(&self, name: &str) -> Result<&Expr, ExprError> {
    self.data.get(name).ok_or_else(|| ExprError::UnknownVariable(name.to_owned()))
  }

  pub fn contains_key(&self, name: &str) -> bool {
    self.data.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Var, &Expr)> {
    self.data.iter()
  }
}

impl SharedVarTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lock(&self) -> LockResult<MutexGuard<'_, VarTable>> {
    self.table.lock()
  }

  // Bindings are only ever added, so a table left behind by a
  // panicking thread is still consistent.
  fn lock_table(&self) -> MutexGuard<'_, VarTable> {
    self.table.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// As [`VarTable::define`].
  pub fn define(&self, name: impl Into<String>, dimension: Dimension) -> Result<Expr, ExprError> {
    self.lock_table().define(name, dimension)
  }

  /// As [`VarTable::get`], but returns an owned copy of the binding.
  pub fn get(&self, name: &str) -> Result<Expr, ExprError> {
    self.lock_table().get(name).cloned()
  }

  pub fn len(&self) -> usize {
    self.lock_table().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock_table().is_empty()
  }
}

impl From<VarTable> for SharedVarTable {
  fn from(table: VarTable) -> Self {
    Self { table: Mutex::new(table) }
  }
}
