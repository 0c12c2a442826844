
//! Physical dimensions of quantities.

pub mod dimension;

pub use dimension::{Dimension, BaseDimension};
