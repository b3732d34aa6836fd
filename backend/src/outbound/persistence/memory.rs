//! In-memory repository adapters backed by a shared mutex-guarded store.
//!
//! Used for local development without PostgreSQL and by HTTP adapter
//! tests. Semantics mirror the Diesel adapters: newest-first ordering,
//! cascade deletion of proposals with their job, and a compare-and-set
//! assignment evaluated under the store lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AcceptanceOutcome, JobRepository, JobRepositoryError, ProposalRepository,
    ProposalRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{ExternalId, Job, JobFields, JobStatus, Proposal, ProposalStatus, User};

/// Shared backing store for the in-memory adapters.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    jobs: Mutex<HashMap<Uuid, Job>>,
    proposals: Mutex<HashMap<Uuid, Proposal>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

// A poisoned lock only means another test thread panicked mid-write;
// recover the guard rather than propagating the poison.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn newest_first<T, K>(mut items: Vec<T>, key: K) -> Vec<T>
where
    K: Fn(&T) -> (chrono::DateTime<chrono::Utc>, Uuid),
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

/// In-memory implementation of the user repository port.
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = lock(&self.store.users);
        // Keyed on the unique external id, like the SQL adapter: a repeat
        // upsert for the same subject updates the existing profile, keeping
        // its `id` and `created_at`.
        let existing = users
            .values()
            .find(|stored| stored.external_id == user.external_id)
            .map(|stored| (stored.id, stored.created_at));
        match existing {
            Some((id, created_at)) => {
                let mut replacement = user.clone();
                replacement.id = id;
                replacement.created_at = created_at;
                users.insert(id, replacement);
            }
            None => {
                users.insert(user.id, user.clone());
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.store.users).get(&id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.store.users)
            .values()
            .find(|user| &user.external_id == external_id)
            .cloned())
    }
}

/// In-memory implementation of the job repository port.
#[derive(Clone)]
pub struct MemoryJobRepository {
    store: Arc<MemoryStore>,
}

impl MemoryJobRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        lock(&self.store.jobs).insert(job.id, job.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobRepositoryError> {
        Ok(lock(&self.store.jobs).get(&id).cloned())
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, JobRepositoryError> {
        let jobs = lock(&self.store.jobs)
            .values()
            .filter(|job| job.client_id == client_id)
            .cloned()
            .collect();
        Ok(newest_first(jobs, |job: &Job| (job.created_at, job.id)))
    }

    async fn update_fields(
        &self,
        job_id: Uuid,
        fields: &JobFields,
        status: JobStatus,
    ) -> Result<Job, JobRepositoryError> {
        let mut jobs = lock(&self.store.jobs);
        let job = jobs
            .get_mut(&job_id)
            .ok_or_else(|| JobRepositoryError::query("record not found"))?;
        job.title = fields.title().to_owned();
        job.description = fields.description().to_owned();
        job.budget = fields.budget();
        job.required_skills = fields.required_skills().to_vec();
        job.status = status;
        job.deadline = fields.deadline();
        Ok(job.clone())
    }

    async fn delete(&self, job_id: Uuid) -> Result<bool, JobRepositoryError> {
        let removed = lock(&self.store.jobs).remove(&job_id).is_some();
        if removed {
            // Cascade, matching the foreign key in the SQL schema.
            lock(&self.store.proposals).retain(|_, proposal| proposal.job_id != job_id);
        }
        Ok(removed)
    }

    async fn list_recommended(
        &self,
        skills: &[String],
        freelancer_id: Uuid,
    ) -> Result<Vec<Job>, JobRepositoryError> {
        let proposed: Vec<Uuid> = lock(&self.store.proposals)
            .values()
            .filter(|proposal| proposal.freelancer_id == freelancer_id)
            .map(|proposal| proposal.job_id)
            .collect();
        let jobs = lock(&self.store.jobs)
            .values()
            .filter(|job| {
                job.status == JobStatus::Open
                    && job.assigned_freelancer_id.is_none()
                    && job.required_skills.iter().any(|skill| skills.contains(skill))
                    && !proposed.contains(&job.id)
            })
            .cloned()
            .collect();
        Ok(newest_first(jobs, |job: &Job| (job.created_at, job.id)))
    }

    async fn list_assigned(&self, freelancer_id: Uuid) -> Result<Vec<Job>, JobRepositoryError> {
        let jobs = lock(&self.store.jobs)
            .values()
            .filter(|job| job.assigned_freelancer_id == Some(freelancer_id))
            .cloned()
            .collect();
        Ok(newest_first(jobs, |job: &Job| (job.created_at, job.id)))
    }
}

/// In-memory implementation of the proposal repository port.
#[derive(Clone)]
pub struct MemoryProposalRepository {
    store: Arc<MemoryStore>,
}

impl MemoryProposalRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProposalRepository for MemoryProposalRepository {
    async fn insert(&self, proposal: &Proposal) -> Result<(), ProposalRepositoryError> {
        lock(&self.store.proposals).insert(proposal.id, proposal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Proposal>, ProposalRepositoryError> {
        Ok(lock(&self.store.proposals).get(&id).cloned())
    }

    async fn has_active_for(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<bool, ProposalRepositoryError> {
        Ok(lock(&self.store.proposals).values().any(|proposal| {
            proposal.job_id == job_id
                && proposal.freelancer_id == freelancer_id
                && proposal.is_active()
        }))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, ProposalRepositoryError> {
        let mut proposals = lock(&self.store.proposals);
        let proposal = proposals
            .get_mut(&id)
            .ok_or_else(|| ProposalRepositoryError::not_found(id))?;
        proposal.status = status;
        Ok(proposal.clone())
    }

    async fn accept_and_assign(
        &self,
        winner_id: Uuid,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<AcceptanceOutcome, ProposalRepositoryError> {
        // Both guards held for the whole update, mirroring the SQL
        // adapter's transaction. Lock order matches `delete`: jobs first.
        let mut jobs = lock(&self.store.jobs);
        let mut proposals = lock(&self.store.proposals);

        let Some(job) = jobs.get_mut(&job_id) else {
            return Ok(AcceptanceOutcome::JobNotFound);
        };
        if job.assigned_freelancer_id.is_some() || job.status != JobStatus::Open {
            return Ok(AcceptanceOutcome::JobUnavailable);
        }
        if !proposals.contains_key(&winner_id) {
            return Err(ProposalRepositoryError::not_found(winner_id));
        }

        job.assigned_freelancer_id = Some(freelancer_id);
        job.status = JobStatus::InProgress;
        let assigned = job.clone();

        let mut rejected_siblings = 0_u64;
        let mut accepted = None;
        for proposal in proposals.values_mut() {
            if proposal.id == winner_id {
                proposal.status = ProposalStatus::Accepted;
                accepted = Some(proposal.clone());
            } else if proposal.job_id == job_id && proposal.status == ProposalStatus::Pending {
                proposal.status = ProposalStatus::Rejected;
                rejected_siblings += 1;
            }
        }
        let proposal = accepted.ok_or_else(|| ProposalRepositoryError::not_found(winner_id))?;

        Ok(AcceptanceOutcome::Accepted {
            proposal,
            job: assigned,
            rejected_siblings,
        })
    }

    async fn list_by_freelancer_with_jobs(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<(Proposal, Job)>, ProposalRepositoryError> {
        let jobs = lock(&self.store.jobs);
        let rows: Vec<(Proposal, Job)> = lock(&self.store.proposals)
            .values()
            .filter(|proposal| proposal.freelancer_id == freelancer_id)
            .filter_map(|proposal| {
                jobs.get(&proposal.job_id)
                    .map(|job| (proposal.clone(), job.clone()))
            })
            .collect();
        Ok(newest_first(rows, |(proposal, _): &(Proposal, Job)| {
            (proposal.created_at, proposal.id)
        }))
    }

    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, ProposalRepositoryError> {
        let proposals = lock(&self.store.proposals)
            .values()
            .filter(|proposal| proposal.job_id == job_id)
            .cloned()
            .collect();
        Ok(newest_first(proposals, |proposal: &Proposal| {
            (proposal.created_at, proposal.id)
        }))
    }
}
