//! Claims Adjudication Domain
//!
//! This crate decides whether a pharmacy claim is paid and how the cost is
//! split between the plan and the member. One adjudication call runs:
//!
//! ```text
//! validate request -> eligibility -> formulary resolution -> prior-auth gate
//!                  -> financial split -> persist exactly one decision
//! ```
//!
//! Business rejections (eligibility, prior authorization) are successful
//! outcomes persisted as rejected decisions; only input and infrastructure
//! failures surface as errors, and those persist nothing.

pub mod decision;
pub mod engine;
pub mod error;
pub mod memory;
pub mod pharmacy;
pub mod ports;
pub mod request;

pub use decision::{ClaimDecision, ClaimStatus, Disposition, RejectionCode, StatusSummary};
pub use engine::AdjudicationEngine;
pub use error::AdjudicationError;
pub use pharmacy::Pharmacy;
pub use ports::{
    ClaimStore, DrugCatalog, FormularyStore, MemberDirectory, PharmacyDirectory, PortError,
    PriorAuthRegistry,
};
pub use request::{AdjudicationRequest, ScreeningNote};
