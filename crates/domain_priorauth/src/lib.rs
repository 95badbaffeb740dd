//! Prior Authorization Domain
//!
//! Certain drugs are covered only after the plan approves them for a specific
//! member. This crate holds the authorization record and the read-only gate
//! the adjudication engine consults.

pub mod authorization;
pub mod error;
pub mod gate;

pub use authorization::{AuthorizationStatus, PriorAuthorization};
pub use error::PriorAuthError;
pub use gate::authorized;
