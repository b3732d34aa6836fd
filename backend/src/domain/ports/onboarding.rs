//! Driving port for the identity bridge (onboarding).

use async_trait::async_trait;

use crate::domain::{Error, ExternalId, OnboardingInput, User};

/// Request to bind a verified subject to a local profile.
#[derive(Debug, Clone)]
pub struct OnboardRequest {
    /// Verified identity-provider subject.
    pub subject: ExternalId,
    /// Profile claims supplied with the submission.
    pub input: OnboardingInput,
}

/// Result of an onboarding call.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardOutcome {
    /// The profile after the call.
    pub user: User,
    /// True when the subject already had a role; the call was a no-op.
    pub already_onboarded: bool,
    /// True when a new record was created rather than updated.
    pub created: bool,
}

/// Domain use-case port for onboarding.
#[async_trait]
pub trait OnboardingCommand: Send + Sync {
    /// Create or update the local profile for a verified subject.
    ///
    /// Idempotent: a subject with a role already set gets its existing
    /// profile back with `already_onboarded = true` and no stored change.
    async fn onboard(&self, request: OnboardRequest) -> Result<OnboardOutcome, Error>;
}
