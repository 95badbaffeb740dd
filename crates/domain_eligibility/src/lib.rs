//! Member Eligibility Domain
//!
//! This crate holds the membership record and the service-date eligibility
//! rules applied before any claim is priced.

pub mod error;
pub mod evaluator;
pub mod member;

pub use error::EligibilityError;
pub use evaluator::{evaluate, EligibilityOutcome};
pub use member::{EligibilityStatus, Member};
