//! Freelance-marketplace backend library.
//!
//! Hexagonal layout: `domain` holds the use-case services and ports,
//! `inbound` the HTTP adapter, `outbound` the PostgreSQL and in-memory
//! adapters, and `server` the wiring that assembles them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Correlate;
