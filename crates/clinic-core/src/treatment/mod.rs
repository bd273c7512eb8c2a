//! Treatment payload handling.
//!
//! Pipeline: Form/backend JSON → [`RawTreatment`] → key canonicalization →
//! validation ([`TreatmentValidator`]) → normalization ([`Normalizer`]) →
//! strict [`Treatment`] sent to the backend.
//!
//! [`RawTreatment`]: crate::models::RawTreatment
//! [`Treatment`]: crate::models::Treatment

mod normalizer;
mod reconcile;
mod validator;

pub use normalizer::*;
pub use reconcile::*;
pub use validator::*;
