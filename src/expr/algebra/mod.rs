
//! Helpers for viewing expressions algebraically: as a rational
//! coefficient times a body ([`term::Term`]), or as a product of
//! powers ([`factor::Factorization`]).

pub mod factor;
pub mod term;
