//! Invalidation port for cached or derived listing views.
//!
//! Mutating operations emit tags describing which read-side listings
//! changed; any cache layer subscribes to the tags rather than the domain
//! depending on a concrete cache. This is a refetch contract, not a strict
//! consistency guarantee.

use uuid::Uuid;

/// A read-side view a mutation may stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingTag {
    /// One client's own job list.
    ClientJobs(Uuid),
    /// The freelancer-facing browse/recommended listing of open jobs.
    OpenJobs,
    /// One job's detail view, including its proposal list.
    Job(Uuid),
}

/// Driven port notified after every successful mutation.
#[cfg_attr(test, mockall::automock)]
pub trait ListingInvalidation: Send + Sync {
    /// Report that the given listings may be stale.
    ///
    /// Implementations must not fail the mutation; invalidation is
    /// best-effort by contract.
    fn invalidate(&self, tags: &[ListingTag]);
}
