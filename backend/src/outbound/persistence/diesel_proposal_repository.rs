//! PostgreSQL-backed `ProposalRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AcceptanceOutcome, ProposalRepository, ProposalRepositoryError};
use crate::domain::{Job, JobStatus, Proposal, ProposalStatus};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JobRow, NewProposalRow, ProposalRow};
use super::pool::{DbPool, PoolError};
use super::schema::{jobs, proposals};

/// Diesel-backed implementation of the proposal repository port.
#[derive(Clone)]
pub struct DieselProposalRepository {
    pool: DbPool,
}

impl DieselProposalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProposalRepositoryError {
    map_pool_error(error, ProposalRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProposalRepositoryError {
    map_diesel_error(
        error,
        ProposalRepositoryError::query,
        ProposalRepositoryError::connection,
    )
}

fn row_to_proposal(row: ProposalRow) -> Result<Proposal, ProposalRepositoryError> {
    row.into_domain().map_err(ProposalRepositoryError::query)
}

const ACTIVE_STATUSES: [&str; 2] = ["PENDING", "ACCEPTED"];

#[async_trait]
impl ProposalRepository for DieselProposalRepository {
    async fn insert(&self, proposal: &Proposal) -> Result<(), ProposalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(proposals::table)
            .values(NewProposalRow::from_domain(proposal))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Proposal>, ProposalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = proposals::table
            .filter(proposals::id.eq(id))
            .select(ProposalRow::as_select())
            .first::<ProposalRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_proposal).transpose()
    }

    async fn has_active_for(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<bool, ProposalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::select(exists(
            proposals::table.filter(
                proposals::job_id
                    .eq(job_id)
                    .and(proposals::freelancer_id.eq(freelancer_id))
                    .and(proposals::status.eq_any(ACTIVE_STATUSES)),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(diesel_error)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, ProposalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = diesel::update(proposals::table.filter(proposals::id.eq(id)))
            .set(proposals::status.eq(status.as_str()))
            .returning(ProposalRow::as_returning())
            .get_result::<ProposalRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .ok_or_else(|| ProposalRepositoryError::not_found(id))?;

        row_to_proposal(row)
    }

    async fn accept_and_assign(
        &self,
        winner_id: Uuid,
        job_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<AcceptanceOutcome, ProposalRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        enum TxState {
            Accepted {
                job: JobRow,
                proposal: ProposalRow,
                rejected: usize,
            },
            JobUnavailable,
            JobNotFound,
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // The conditional job update, the winner's status change, and the
        // sibling rejection must commit together: a fault after the
        // assignment alone would leave the job taken while its winning
        // proposal still reads as pending.
        let state = conn
            .transaction(|conn| {
                async move {
                    let assigned = diesel::update(
                        jobs::table.filter(
                            jobs::id
                                .eq(job_id)
                                .and(jobs::assigned_freelancer_id.is_null())
                                .and(jobs::status.eq(JobStatus::Open.as_str())),
                        ),
                    )
                    .set((
                        jobs::assigned_freelancer_id.eq(Some(freelancer_id)),
                        jobs::status.eq(JobStatus::InProgress.as_str()),
                    ))
                    .returning(JobRow::as_returning())
                    .get_result::<JobRow>(conn)
                    .await
                    .optional()?;

                    let Some(job) = assigned else {
                        // Condition failed: distinguish an absent job from
                        // a lost race.
                        let exists = jobs::table
                            .filter(jobs::id.eq(job_id))
                            .select(jobs::id)
                            .first::<Uuid>(conn)
                            .await
                            .optional()?;
                        return Ok(if exists.is_some() {
                            TxState::JobUnavailable
                        } else {
                            TxState::JobNotFound
                        });
                    };

                    // A vanished winner aborts the transaction so the
                    // assignment above rolls back with it.
                    let proposal = diesel::update(proposals::table.filter(proposals::id.eq(winner_id)))
                        .set(proposals::status.eq(ProposalStatus::Accepted.as_str()))
                        .returning(ProposalRow::as_returning())
                        .get_result::<ProposalRow>(conn)
                        .await?;

                    let rejected = diesel::update(
                        proposals::table.filter(
                            proposals::job_id
                                .eq(job_id)
                                .and(proposals::id.ne(winner_id))
                                .and(proposals::status.eq(ProposalStatus::Pending.as_str())),
                        ),
                    )
                    .set(proposals::status.eq(ProposalStatus::Rejected.as_str()))
                    .execute(conn)
                    .await?;

                    Ok(TxState::Accepted {
                        job,
                        proposal,
                        rejected,
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| match error {
                diesel::result::Error::NotFound => ProposalRepositoryError::not_found(winner_id),
                other => diesel_error(other),
            })?;

        match state {
            TxState::Accepted {
                job,
                proposal,
                rejected,
            } => {
                let job = job.into_domain().map_err(ProposalRepositoryError::query)?;
                let proposal = row_to_proposal(proposal)?;
                #[expect(clippy::expect_used, reason = "usize row count always fits in u64")]
                let rejected_siblings: u64 =
                    rejected.try_into().expect("row count fits in u64");
                Ok(AcceptanceOutcome::Accepted {
                    proposal,
                    job,
                    rejected_siblings,
                })
            }
            TxState::JobUnavailable => Ok(AcceptanceOutcome::JobUnavailable),
            TxState::JobNotFound => Ok(AcceptanceOutcome::JobNotFound),
        }
    }

    async fn list_by_freelancer_with_jobs(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<(Proposal, Job)>, ProposalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = proposals::table
            .inner_join(jobs::table)
            .filter(proposals::freelancer_id.eq(freelancer_id))
            .order((proposals::created_at.desc(), proposals::id.desc()))
            .select((ProposalRow::as_select(), JobRow::as_select()))
            .load::<(ProposalRow, JobRow)>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|(proposal_row, job_row)| {
                let proposal = row_to_proposal(proposal_row)?;
                let job = job_row
                    .into_domain()
                    .map_err(ProposalRepositoryError::query)?;
                Ok((proposal, job))
            })
            .collect()
    }

    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, ProposalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = proposals::table
            .filter(proposals::job_id.eq(job_id))
            .order((proposals::created_at.desc(), proposals::id.desc()))
            .select(ProposalRow::as_select())
            .load::<ProposalRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_proposal).collect()
    }
}
