
//! Utility functions for walking an expression tree.

use super::Expr;

pub fn postorder_walk_borrowed<'a, F>(expr: &'a Expr, mut f: F)
where F: FnMut(&'a Expr) {
  postorder_walk_borrowed_impl(expr, &mut f);
}

fn postorder_walk_borrowed_impl<'a, F>(expr: &'a Expr, f: &mut F)
where F: FnMut(&'a Expr) {
  for child in expr.children() {
    postorder_walk_borrowed_impl(child, f);
  }
  f(expr);
}
