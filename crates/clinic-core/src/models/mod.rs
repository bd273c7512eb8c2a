//! Domain models for the clinic core.

mod billing;
mod loose;
mod patient;
mod treatment;
mod vitals;

pub use billing::*;
pub use loose::*;
pub use patient::*;
pub use treatment::*;
pub use vitals::*;
