//! Proposal entity and its state machine.
//!
//! `Pending` is the only initial state. `Accepted`, `Rejected`, and
//! `Withdrawn` are terminal; no transition leaves a terminal state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    /// Awaiting a client decision.
    Pending,
    /// Accepted by the client; the job was assigned to the submitter.
    Accepted,
    /// Declined by the client, or superseded by an accepted sibling.
    Rejected,
    /// Pulled back by the submitting freelancer.
    Withdrawn,
}

impl ProposalStatus {
    /// Storage representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Withdrawn => "WITHDRAWN",
        }
    }

    /// Whether this status permits no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Check a transition against the state machine.
    pub fn transition_to(self, next: Self) -> Result<Self, ProposalTransitionError> {
        if self == Self::Pending && next != Self::Pending {
            Ok(next)
        } else {
            Err(ProposalTransitionError { from: self, to: next })
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = ProposalValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "WITHDRAWN" => Ok(Self::Withdrawn),
            other => Err(ProposalValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// A transition the state machine forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("proposal cannot move from {from} to {to}")]
pub struct ProposalTransitionError {
    /// State the proposal is currently in.
    pub from: ProposalStatus,
    /// State the caller attempted to reach.
    pub to: ProposalStatus,
}

/// Validation failures for proposal fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProposalValidationError {
    /// The cover letter was empty once trimmed.
    #[error("cover letter must not be empty")]
    EmptyCoverLetter,
    /// The proposed price must be a positive, finite number.
    #[error("proposed price must be a positive number")]
    InvalidPrice,
    /// The status string is not a modeled status.
    #[error("unknown proposal status: {value}")]
    UnknownStatus {
        /// Offending input value.
        value: String,
    },
}

/// A freelancer's proposal against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Stable local identifier.
    pub id: Uuid,
    /// Job the proposal targets.
    pub job_id: Uuid,
    /// Submitting freelancer. Immutable.
    pub freelancer_id: Uuid,
    /// Pitch text shown to the client.
    pub cover_letter: String,
    /// Price the freelancer asks for. Always positive and finite.
    pub proposed_price: f64,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Record creation time; listings order newest-first by this.
    pub created_at: DateTime<Utc>,
}

impl Proposal {
    /// Whether the proposal still counts against the one-active-proposal
    /// rule: anything not rejected or withdrawn.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ProposalStatus::Pending | ProposalStatus::Accepted
        )
    }
}

/// Validated submission fields for a new proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalFields {
    cover_letter: String,
    proposed_price: f64,
}

impl ProposalFields {
    /// Validate raw submission fields.
    pub fn try_new(cover_letter: &str, proposed_price: f64) -> Result<Self, ProposalValidationError> {
        let cover_letter = cover_letter.trim().to_owned();
        if cover_letter.is_empty() {
            return Err(ProposalValidationError::EmptyCoverLetter);
        }
        if !proposed_price.is_finite() || proposed_price <= 0.0 {
            return Err(ProposalValidationError::InvalidPrice);
        }
        Ok(Self {
            cover_letter,
            proposed_price,
        })
    }

    /// Pitch text.
    pub fn cover_letter(&self) -> &str {
        &self.cover_letter
    }

    /// Validated positive price.
    pub fn proposed_price(&self) -> f64 {
        self.proposed_price
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ProposalStatus::Pending, ProposalStatus::Accepted)]
    #[case(ProposalStatus::Pending, ProposalStatus::Rejected)]
    #[case(ProposalStatus::Pending, ProposalStatus::Withdrawn)]
    fn pending_may_reach_every_terminal_state(
        #[case] from: ProposalStatus,
        #[case] to: ProposalStatus,
    ) {
        assert_eq!(from.transition_to(to).expect("legal transition"), to);
    }

    #[rstest]
    #[case(ProposalStatus::Accepted, ProposalStatus::Rejected)]
    #[case(ProposalStatus::Rejected, ProposalStatus::Accepted)]
    #[case(ProposalStatus::Withdrawn, ProposalStatus::Pending)]
    #[case(ProposalStatus::Accepted, ProposalStatus::Withdrawn)]
    #[case(ProposalStatus::Pending, ProposalStatus::Pending)]
    fn terminal_states_are_absorbing(#[case] from: ProposalStatus, #[case] to: ProposalStatus) {
        let err = from.transition_to(to).expect_err("illegal transition");
        assert_eq!(err, ProposalTransitionError { from, to });
    }

    #[rstest]
    #[case(0.0)]
    #[case(-450.0)]
    #[case(f64::NAN)]
    fn price_must_be_positive_and_finite(#[case] price: f64) {
        let err = ProposalFields::try_new("I can build this.", price).expect_err("must fail");
        assert_eq!(err, ProposalValidationError::InvalidPrice);
    }

    #[test]
    fn accepted_and_pending_proposals_are_active() {
        let mut proposal = Proposal {
            id: uuid::Uuid::new_v4(),
            job_id: uuid::Uuid::new_v4(),
            freelancer_id: uuid::Uuid::new_v4(),
            cover_letter: "I can build this in 3 days.".into(),
            proposed_price: 450.0,
            status: ProposalStatus::Pending,
            created_at: chrono::Utc::now(),
        };
        assert!(proposal.is_active());
        proposal.status = ProposalStatus::Accepted;
        assert!(proposal.is_active());
        proposal.status = ProposalStatus::Withdrawn;
        assert!(!proposal.is_active());
    }
}
