//! Database Infrastructure Layer
//!
//! PostgreSQL adapters for the adjudication ports using SQLx.
//!
//! # Architecture
//!
//! - **Repositories**: row mapping and queries per entity, generic over any
//!   executor so the same SQL runs against a pool or a transaction
//! - **Gateway**: a single repeatable-read transaction implementing every
//!   engine port, giving one adjudication call one consistent snapshot
//! - **Pool**: connection pool configuration and creation

pub mod error;
pub mod gateway;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use gateway::PgAdjudicationGateway;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::claims::ClaimsRepository;
