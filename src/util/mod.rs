//! Various utility functions.

pub mod matching;
pub mod stricteq;

/// `try_traits`-style variant of [`Pow`](num::pow::Pow) trait.
pub trait TryPow<RHS> {
  type Output;
  type Error;

  fn try_pow(self, rhs: RHS) -> Result<Self::Output, Self::Error>;
}

/// Zips two arrays of the same length together, using the given
/// function.
pub fn zip_with<const C: usize, T, S, U, F>(left: [T; C], right: [S; C], mut f: F) -> [U; C]
where F: FnMut(T, S) -> U {
  let res = left.into_iter().zip(right)
    .map(|(x, y)| f(x, y))
    .collect::<Vec<_>>()
    .try_into();
  match res {
    Ok(res) => res,
    Err(_) => panic!("Invalid array length"),
  }
}
