//! Core Kernel - Foundational types for the pharmacy benefit system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money with precise decimal arithmetic for claim financials
//! - Benefit validity windows over calendar dates
//! - Strongly-typed identifiers
//! - Industry code value objects (NPI, NDC)

pub mod codes;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod temporal;

pub use codes::{CodeError, Ndc, Npi};
pub use error::CoreError;
pub use identifiers::{ClaimId, DrugId, MemberId, OverrideId, PharmacyId, PlanId, PriorAuthId};
pub use money::{Money, MoneyError};
pub use temporal::{CoverageWindow, TemporalError};
