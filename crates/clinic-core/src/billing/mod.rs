//! Payment and receipt derivation from editable price lines.

mod currency;
mod payment;
mod receipt;

pub use currency::*;
pub use payment::*;
pub use receipt::*;
