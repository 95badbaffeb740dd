//! Test Utilities
//!
//! Shared fixtures, builders, generators, and assertion helpers for the
//! adjudication test suite. Builders give every entity sensible defaults so
//! tests only spell out the fields they actually exercise.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use builders::{
    AuthorizationBuilder, DrugBuilder, MemberBuilder, OverrideBuilder, RequestBuilder,
};
