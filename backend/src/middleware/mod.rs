//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns
//! such as correlation identifiers.

pub mod request_id;

pub use request_id::Correlate;
