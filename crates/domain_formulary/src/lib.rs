//! Formulary Domain
//!
//! This crate models the set of drugs a plan covers and the cost-share rules
//! attached to them: tier assignments, copays, prior-authorization flags, and
//! quantity limits, together with plan-specific date-ranged overrides.
//!
//! Benefit resolution is a pure function of (drug, active override); the
//! override interval index enforces the at-most-one-active invariant at read
//! time.

pub mod drug;
pub mod error;
pub mod overrides;
pub mod resolver;

pub use drug::{Drug, Tier};
pub use error::FormularyError;
pub use overrides::{FormularyIndex, FormularyOverride};
pub use resolver::{resolve, ResolvedBenefit};
