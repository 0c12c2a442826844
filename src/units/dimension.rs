use crate::util::zip_with;

use num::Zero;
use num::pow::Pow;
use serde::{Serialize, Deserialize};

use std::ops::{Add, Sub, Neg};
use std::fmt::{self, Formatter, Display};

/// A dimension is a formal product and quotient of zero or more
/// [`BaseDimension`] values, stored as a vector of integer exponents.
///
/// Dimensions are combined additively: the dimension of a product is
/// the sum of the dimensions of its factors, and the dimension of a
/// quotient is the difference. The zero vector is the dimension of a
/// dimensionless quantity.
///
/// Serializes as the three-element array `[mass, length, time]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension {
  dims: [i64; NDIMS],
}

/// The base dimensions of a mass-length-time unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDimension {
  Mass,
  Length,
  Time,
}

/// Human-readable rendering of a [`Dimension`], such as `length /
/// time^2`. See [`Dimension::pretty`].
#[derive(Debug, Clone, Copy)]
pub struct PrettyDimension<'a>(&'a Dimension);

pub const NDIMS: usize = 3;

impl Dimension {
  pub fn new(mass: i64, length: i64, time: i64) -> Self {
    Self { dims: [mass, length, time] }
  }

  pub fn singleton(base: BaseDimension) -> Self {
    let mut dims = [0; NDIMS];
    dims[base.dimension_index()] = 1;
    Self { dims }
  }

  pub fn mass() -> Self {
    Self::singleton(BaseDimension::Mass)
  }

  pub fn length() -> Self {
    Self::singleton(BaseDimension::Length)
  }

  pub fn time() -> Self {
    Self::singleton(BaseDimension::Time)
  }

  pub fn get(&self, base: BaseDimension) -> i64 {
    self.dims[base.dimension_index()]
  }

  pub fn components(&self) -> impl Iterator<Item = (BaseDimension, i64)> + '_ {
    BaseDimension::ALL.iter()
      .copied()
      .zip(self.dims.iter().copied())
      .filter(|(_, x)| *x != 0)
  }

  /// True if every exponent is zero.
  pub fn is_dimensionless(&self) -> bool {
    self.is_zero()
  }

  pub fn pretty(&self) -> PrettyDimension<'_> {
    PrettyDimension(self)
  }
}

impl BaseDimension {
  pub const ALL: [BaseDimension; NDIMS] = [
    BaseDimension::Mass,
    BaseDimension::Length,
    BaseDimension::Time,
  ];

  fn dimension_index(self) -> usize {
    match self {
      BaseDimension::Mass => 0,
      BaseDimension::Length => 1,
      BaseDimension::Time => 2,
    }
  }
}

impl From<BaseDimension> for Dimension {
  fn from(base: BaseDimension) -> Self {
    Dimension::singleton(base)
  }
}

impl Pow<i64> for &Dimension {
  type Output = Dimension;

  fn pow(self, power: i64) -> Dimension {
    Dimension {
      dims: self.dims.map(|x| x * power),
    }
  }
}

impl Add for Dimension {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    Dimension {
      dims: zip_with(self.dims, rhs.dims, |a, b| a + b),
    }
  }
}

impl Add<&Dimension> for Dimension {
  type Output = Dimension;

  fn add(self, rhs: &Dimension) -> Dimension {
    self + rhs.clone()
  }
}

impl Add<&Dimension> for &Dimension {
  type Output = Dimension;

  fn add(self, rhs: &Dimension) -> Dimension {
    self.clone() + rhs.clone()
  }
}

impl Sub for Dimension {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    Dimension {
      dims: zip_with(self.dims, rhs.dims, |a, b| a - b),
    }
  }
}

impl Sub<&Dimension> for &Dimension {
  type Output = Dimension;

  fn sub(self, rhs: &Dimension) -> Dimension {
    self.clone() - rhs.clone()
  }
}

impl Neg for Dimension {
  type Output = Self;

  fn neg(self) -> Self {
    Dimension {
      dims: self.dims.map(|x| -x),
    }
  }
}

impl Neg for &Dimension {
  type Output = Dimension;

  fn neg(self) -> Dimension {
    -self.clone()
  }
}

impl Zero for Dimension {
  fn zero() -> Self {
    Self { dims: [0; NDIMS] }
  }

  fn is_zero(&self) -> bool {
    self.dims.iter().all(|x| *x == 0)
  }
}

impl Display for BaseDimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      BaseDimension::Mass => write!(f, "mass"),
      BaseDimension::Length => write!(f, "length"),
      BaseDimension::Time => write!(f, "time"),
    }
  }
}

impl Display for Dimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let [mass, length, time] = self.dims;
    write!(f, "[{mass},{length},{time}]")
  }
}

impl Display for PrettyDimension<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut numerator: Vec<String> = Vec::new();
    let mut denominator: Vec<String> = Vec::new();
    for (dim, power) in self.0.components() {
      match power {
        1 => {
          numerator.push(dim.to_string());
        }
        -1 => {
          denominator.push(dim.to_string());
        }
        power if power > 0 => {
          numerator.push(format!("{}^{}", dim, power));
        }
        power => {
          denominator.push(format!("{}^{}", dim, -power));
        }
      }
    }
    if numerator.is_empty() {
      write!(f, "1")?;
    } else {
      write!(f, "{}", numerator.join(" "))?;
    }
    if !denominator.is_empty() {
      write!(f, " / {}", denominator.join(" "))?;
    }
    Ok(())
  }
}
