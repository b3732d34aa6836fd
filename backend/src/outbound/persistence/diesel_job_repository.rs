//! PostgreSQL-backed `JobRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobFields, JobStatus};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JobRow, JobUpdate, NewJobRow};
use super::pool::{DbPool, PoolError};
use super::schema::{jobs, proposals};

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> JobRepositoryError {
    map_pool_error(error, JobRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> JobRepositoryError {
    map_diesel_error(
        error,
        JobRepositoryError::query,
        JobRepositoryError::connection,
    )
}

fn row_to_job(row: JobRow) -> Result<Job, JobRepositoryError> {
    row.into_domain().map_err(JobRepositoryError::query)
}

fn rows_to_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, JobRepositoryError> {
    rows.into_iter().map(row_to_job).collect()
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(jobs::table)
            .values(NewJobRow::from_domain(job))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = jobs::table
            .filter(jobs::id.eq(id))
            .select(JobRow::as_select())
            .first::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_job).transpose()
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = jobs::table
            .filter(jobs::client_id.eq(client_id))
            .order((jobs::created_at.desc(), jobs::id.desc()))
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_jobs(rows)
    }

    async fn update_fields(
        &self,
        job_id: Uuid,
        fields: &JobFields,
        status: JobStatus,
    ) -> Result<Job, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changeset = JobUpdate {
            title: fields.title(),
            description: fields.description(),
            budget: fields.budget(),
            required_skills: fields.required_skills(),
            status: status.as_str(),
            deadline: fields.deadline(),
        };

        let row = diesel::update(jobs::table.filter(jobs::id.eq(job_id)))
            .set(changeset)
            .returning(JobRow::as_returning())
            .get_result::<JobRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_job(row)
    }

    async fn delete(&self, job_id: Uuid) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(jobs::table.filter(jobs::id.eq(job_id)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_recommended(
        &self,
        skills: &[String],
        freelancer_id: Uuid,
    ) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let already_proposed = proposals::table
            .filter(proposals::freelancer_id.eq(freelancer_id))
            .select(proposals::job_id);

        let rows = jobs::table
            .filter(
                jobs::status
                    .eq(JobStatus::Open.as_str())
                    .and(jobs::assigned_freelancer_id.is_null())
                    .and(jobs::required_skills.overlaps_with(skills))
                    .and(jobs::id.ne_all(already_proposed)),
            )
            .order((jobs::created_at.desc(), jobs::id.desc()))
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_jobs(rows)
    }

    async fn list_assigned(&self, freelancer_id: Uuid) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = jobs::table
            .filter(jobs::assigned_freelancer_id.eq(freelancer_id))
            .order((jobs::created_at.desc(), jobs::id.desc()))
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_jobs(rows)
    }
}
