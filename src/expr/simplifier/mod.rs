
//! Normalization passes run by the arithmetic operators.
//!
//! Each pass takes operands that are already in canonical form and
//! produces a canonical result: nested sums and products are
//! flattened, like terms and repeated factors are merged, identity
//! elements are stripped, the survivors are sorted, and the result
//! collapses to a single term when possible.

mod flattener;
mod product;
mod quotient;
mod reducer;
mod sum;

pub use flattener::{flatten_sum, flatten_product};
pub use product::normalize_product;
pub use quotient::normalize_quotient;
pub use sum::normalize_sum;
