use crate::expr::Expr;
use crate::expr::ordering::sort_canonical;

use log::trace;

/// Pairwise reduction of a flat list of terms.
///
/// Each incoming term is offered to the accepted buckets in order via
/// `rewrite`; the first bucket that produces a merged result is
/// replaced by it, and if no bucket accepts the term, the term opens
/// a new bucket. A merged result satisfying `is_identity` is dropped
/// outright, so that, for instance, a cancelled term does not linger
/// as a second constant.
///
/// This is greedy and quadratic in the number of terms.
pub(super) fn reduce_terms<R, I>(terms: Vec<Expr>, mut rewrite: R, is_identity: I) -> Vec<Expr>
where R: FnMut(&Expr, &Expr) -> Option<Expr>,
      I: Fn(&Expr) -> bool {
  let mut buckets: Vec<Expr> = Vec::with_capacity(terms.len());
  for term in terms {
    let merged = buckets.iter()
      .enumerate()
      .find_map(|(index, bucket)| rewrite(bucket, &term).map(|m| (index, m)));
    match merged {
      Some((index, merged)) => {
        trace!("merged {} with {} into {}", buckets[index], term, merged);
        if is_identity(&merged) {
          buckets.remove(index);
        } else {
          buckets[index] = merged;
        }
      }
      None => {
        buckets.push(term);
      }
    }
  }
  buckets
}

/// Strips identity elements, sorts the survivors canonically, and
/// collapses the list: no survivors yields `empty()`, a single
/// survivor is returned as-is, and anything more is passed to
/// `build`.
pub(super) fn collapse<I, E, B>(terms: Vec<Expr>, is_identity: I, empty: E, build: B) -> Expr
where I: Fn(&Expr) -> bool,
      E: FnOnce() -> Expr,
      B: FnOnce(Vec<Expr>) -> Expr {
  let mut terms: Vec<Expr> = terms.into_iter().filter(|t| !is_identity(t)).collect();
  sort_canonical(&mut terms);
  match terms.len() {
    0 => empty(),
    1 => terms.swap_remove(0),
    _ => build(terms),
  }
}
