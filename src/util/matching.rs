//! Maximum bipartite matching, used to compare commutative multisets
//! whose elements are only known through a pairwise compatibility
//! predicate.

/// Returns true if there is a perfect matching between two sets of
/// `n` elements, where left element `i` may be paired with right
/// element `j` only if `compatible(i, j)` holds.
///
/// This is Kuhn's augmenting-path algorithm, which runs in `O(n * e)`
/// for `e` compatible pairs. Unlike greedy first-fit pairing, it never
/// reports a false negative when an element has several compatible
/// partners.
pub fn has_perfect_matching<F>(n: usize, mut compatible: F) -> bool
where F: FnMut(usize, usize) -> bool {
  let mut adjacency: Vec<Vec<usize>> = Vec::with_capacity(n);
  for left in 0..n {
    let mut row = Vec::new();
    for right in 0..n {
      if compatible(left, right) {
        row.push(right);
      }
    }
    if row.is_empty() {
      return false;
    }
    adjacency.push(row);
  }

  let mut matched_right: Vec<Option<usize>> = vec![None; n];
  for left in 0..n {
    let mut visited = vec![false; n];
    if !augment(left, &adjacency, &mut matched_right, &mut visited) {
      return false;
    }
  }
  true
}

fn augment(
  left: usize,
  adjacency: &[Vec<usize>],
  matched_right: &mut [Option<usize>],
  visited: &mut [bool],
) -> bool {
  for &right in &adjacency[left] {
    if visited[right] {
      continue;
    }
    visited[right] = true;
    let free = match matched_right[right] {
      None => true,
      Some(previous) => augment(previous, adjacency, matched_right, visited),
    };
    if free {
      matched_right[right] = Some(left);
      return true;
    }
  }
  false
}
