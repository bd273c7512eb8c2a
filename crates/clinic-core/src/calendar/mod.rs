//! Thailand civil time and Buddhist-era dates.
//!
//! Dates cross the backend boundary in Gregorian `YYYY-MM-DD`; the Buddhist
//! era (B.E. = C.E. + 543) is a presentation concern handled here.

mod age;
mod buddhist;
mod thai;

pub use age::*;
pub use buddhist::*;
pub use thai::*;
