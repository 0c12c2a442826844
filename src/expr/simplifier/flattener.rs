use crate::expr::Expr;

/// Flattens nested sums into a single list of terms.
///
/// Examples:
///
/// ```text
/// [x, (y+z), t] ==> [x, y, z, t]
/// [(x+y)] ==> [x, y]
/// ```
pub fn flatten_sum(operands: Vec<Expr>) -> Vec<Expr> {
  flatten_nested(operands, Expr::is_sum)
}

/// Flattens nested products into a single list of factors. Powers,
/// fractions, and all other kinds are left alone.
pub fn flatten_product(operands: Vec<Expr>) -> Vec<Expr> {
  flatten_nested(operands, Expr::is_product)
}

fn flatten_nested<F>(operands: Vec<Expr>, is_nested: F) -> Vec<Expr>
where F: Fn(&Expr) -> bool + Copy {
  let mut result = Vec::with_capacity(operands.len());
  for operand in operands {
    if is_nested(&operand) {
      result.extend(flatten_nested(operand.into_children(), is_nested));
    } else {
      result.push(operand);
    }
  }
  result
}
