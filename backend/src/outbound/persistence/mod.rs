//! Persistence adapters implementing the repository ports.
//!
//! Two backends share identical semantics:
//!
//! - **Diesel**: PostgreSQL via the Diesel ORM with async support through
//!   `diesel-async` and `bb8` connection pooling. Row structs
//!   (`models.rs`) and schema definitions (`schema.rs`) are internal
//!   implementation details, never exposed to the domain layer.
//! - **Memory**: mutex-guarded maps for local development and HTTP
//!   adapter tests.
//!
//! Repositories are thin translators between storage rows and domain
//! types; no business logic resides here. All database errors are mapped
//! to the domain repository error types.

mod diesel_job_repository;
mod diesel_proposal_repository;
mod diesel_user_repository;
mod error_mapping;
pub mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_job_repository::DieselJobRepository;
pub use diesel_proposal_repository::DieselProposalRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
