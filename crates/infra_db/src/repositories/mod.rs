//! Entity repositories
//!
//! Each module owns the row type and SQL for one entity. Query functions are
//! generic over the executor so the adjudication gateway can run them inside
//! its transaction while read-side callers use the pool directly.

pub mod claims;
pub mod drugs;
pub mod formulary;
pub mod members;
pub mod pharmacies;
pub mod prior_auth;
