
pub mod table;

use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

use std::borrow::Borrow;
use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};

/// The name of a symbolic quantity.
///
/// Any nonempty name is accepted, as long as it renders unambiguously
/// inside an expression: it may not contain whitespace or any of the
/// operator characters `( ) + * / ^`, and it may not begin with a
/// digit or `-` (which would read as a constant). This structure
/// enforces these constraints.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Var(String);

#[derive(Clone, Debug)]
pub struct TryFromStringError {
  original_string: String,
}

pub static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[^\s\d\-()+*/^][^\s()+*/^]*$").unwrap()
});

impl Var {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFromStringError {
  pub fn into_original_string(self) -> String {
    self.original_string
  }
}

impl TryFrom<String> for Var {
  type Error = TryFromStringError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(TryFromStringError { original_string: name })
    }
  }
}

impl From<Var> for String {
  fn from(v: Var) -> Self {
    v.0
  }
}

impl Borrow<str> for Var {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl Display for Var {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", &self.0)
  }
}

impl Display for TryFromStringError {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "Invalid variable name '{}'", self.original_string)
  }
}

impl StdError for TryFromStringError {}
