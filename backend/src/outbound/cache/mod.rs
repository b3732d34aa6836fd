//! Listing invalidation sinks.
//!
//! Mutating services emit [`ListingTag`]s naming the read-side views they
//! may have staled. Until an edge cache sits in front of the API the only
//! production sink logs the tags, which keeps the contract observable and
//! gives a cache adapter a ready-made seam.

use tracing::debug;

use crate::domain::ports::{ListingInvalidation, ListingTag};

/// Invalidation sink that records tags in the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInvalidation;

impl LoggingInvalidation {
    /// Create a new logging sink.
    pub fn new() -> Self {
        Self
    }
}

impl ListingInvalidation for LoggingInvalidation {
    fn invalidate(&self, tags: &[ListingTag]) {
        debug!(?tags, "listing views invalidated");
    }
}
