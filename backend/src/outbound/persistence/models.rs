//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations, and to convert between
//! stored text statuses and the typed domain enums.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{ExternalId, Job, JobStatus, Proposal, ProposalStatus, User, UserRole};

use super::schema::{jobs, proposals, users};

fn decode_status<T: std::str::FromStr>(raw: &str, column: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|err| format!("corrupt {column} value {raw:?}: {err}"))
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let role = self
            .role
            .as_deref()
            .map(|raw| decode_status::<UserRole>(raw, "users.role"))
            .transpose()?;
        let external_id = ExternalId::new(&self.external_id)
            .map_err(|err| format!("corrupt users.external_id: {err}"))?;
        Ok(User {
            id: self.id,
            external_id,
            email: self.email,
            name: self.name,
            profile_picture: self.profile_picture,
            role,
            bio: self.bio,
            skills: self.skills,
            hourly_rate: self.hourly_rate,
            balance: self.balance,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable and upsert changeset for user records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserWriteRow<'a> {
    pub id: Uuid,
    pub external_id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub profile_picture: Option<&'a str>,
    pub role: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub skills: &'a [String],
    pub hourly_rate: Option<f64>,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserWriteRow<'a> {
    pub(crate) fn from_domain(user: &'a User) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id.as_str(),
            email: &user.email,
            name: &user.name,
            profile_picture: user.profile_picture.as_deref(),
            role: user.role.map(UserRole::as_str),
            bio: user.bio.as_deref(),
            skills: &user.skills,
            hourly_rate: user.hourly_rate,
            balance: user.balance,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Job models
// ---------------------------------------------------------------------------

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub required_skills: Vec<String>,
    pub status: String,
    pub deadline: Option<NaiveDate>,
    pub client_id: Uuid,
    pub assigned_freelancer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub(crate) fn into_domain(self) -> Result<Job, String> {
        let status = decode_status::<JobStatus>(&self.status, "jobs.status")?;
        Ok(Job {
            id: self.id,
            title: self.title,
            description: self.description,
            budget: self.budget,
            required_skills: self.required_skills,
            status,
            deadline: self.deadline,
            client_id: self.client_id,
            assigned_freelancer_id: self.assigned_freelancer_id,
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for creating new job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub budget: f64,
    pub required_skills: &'a [String],
    pub status: &'a str,
    pub deadline: Option<NaiveDate>,
    pub client_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewJobRow<'a> {
    pub(crate) fn from_domain(job: &'a Job) -> Self {
        Self {
            id: job.id,
            title: &job.title,
            description: &job.description,
            budget: job.budget,
            required_skills: &job.required_skills,
            status: job.status.as_str(),
            deadline: job.deadline,
            client_id: job.client_id,
            created_at: job.created_at,
        }
    }
}

/// Changeset for the full-field job update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct JobUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub budget: f64,
    pub required_skills: &'a [String],
    pub status: &'a str,
    pub deadline: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Proposal models
// ---------------------------------------------------------------------------

/// Row struct for reading from the proposals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = proposals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProposalRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub freelancer_id: Uuid,
    pub cover_letter: String,
    pub proposed_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ProposalRow {
    pub(crate) fn into_domain(self) -> Result<Proposal, String> {
        let status = decode_status::<ProposalStatus>(&self.status, "proposals.status")?;
        Ok(Proposal {
            id: self.id,
            job_id: self.job_id,
            freelancer_id: self.freelancer_id,
            cover_letter: self.cover_letter,
            proposed_price: self.proposed_price,
            status,
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for creating new proposal records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = proposals)]
pub(crate) struct NewProposalRow<'a> {
    pub id: Uuid,
    pub job_id: Uuid,
    pub freelancer_id: Uuid,
    pub cover_letter: &'a str,
    pub proposed_price: f64,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewProposalRow<'a> {
    pub(crate) fn from_domain(proposal: &'a Proposal) -> Self {
        Self {
            id: proposal.id,
            job_id: proposal.job_id,
            freelancer_id: proposal.freelancer_id,
            cover_letter: &proposal.cover_letter,
            proposed_price: proposal.proposed_price,
            status: proposal.status.as_str(),
            created_at: proposal.created_at,
        }
    }
}
