//! Shared entity builders for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use uuid::Uuid;

use crate::domain::{
    ExternalId, Job, JobStatus, Proposal, ProposalStatus, User, UserRole,
};

/// Deterministic timestamp used across fixtures.
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid fixture time")
}

/// Clock pinned to [`fixed_now`].
pub(crate) fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(fixed_now);
    Arc::new(clock)
}

pub(crate) fn subject(raw: &str) -> ExternalId {
    ExternalId::new(raw).expect("valid fixture subject")
}

pub(crate) fn client_user(raw_subject: &str) -> User {
    User {
        id: Uuid::new_v4(),
        external_id: subject(raw_subject),
        email: "client@example.com".into(),
        name: "John Client".into(),
        profile_picture: None,
        role: Some(UserRole::Client),
        bio: None,
        skills: Vec::new(),
        hourly_rate: None,
        balance: 0.0,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub(crate) fn freelancer_user(raw_subject: &str, skills: &[&str]) -> User {
    User {
        id: Uuid::new_v4(),
        external_id: subject(raw_subject),
        email: "freelancer@example.com".into(),
        name: "Jane Freelancer".into(),
        profile_picture: None,
        role: Some(UserRole::Freelancer),
        bio: Some("Experienced full-stack developer.".into()),
        skills: skills.iter().map(|s| (*s).to_owned()).collect(),
        hourly_rate: Some(50.0),
        balance: 0.0,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub(crate) fn open_job(client_id: Uuid, skills: &[&str]) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: "Portfolio Website".into(),
        description: "Need help building a portfolio website.".into(),
        budget: 500.0,
        required_skills: skills.iter().map(|s| (*s).to_owned()).collect(),
        status: JobStatus::Open,
        deadline: None,
        client_id,
        assigned_freelancer_id: None,
        created_at: fixed_now(),
    }
}

pub(crate) fn pending_proposal(job_id: Uuid, freelancer_id: Uuid) -> Proposal {
    Proposal {
        id: Uuid::new_v4(),
        job_id,
        freelancer_id,
        cover_letter: "I can build this in 3 days.".into(),
        proposed_price: 450.0,
        status: ProposalStatus::Pending,
        created_at: fixed_now(),
    }
}
