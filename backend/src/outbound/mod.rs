//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories via Diesel, plus in-memory
//!   equivalents for development and tests
//! - **cache**: listing invalidation sinks
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod persistence;
