//! Clinic identifiers.

mod vn;

pub use vn::*;
