//! Clinical derivations over intake vital signs.
//!
//! - [`vitals`]: warnings for readings outside the reference ranges
//! - [`bmi`]: body mass index and category

pub mod bmi;
pub mod vitals;

pub use bmi::*;
pub use vitals::*;
