//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ExternalId, User};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserRow, UserWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    row.into_domain().map_err(UserRepositoryError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = UserWriteRow::from_domain(user);

        // Keyed on the unique external id: a concurrent onboarding call
        // for the same subject updates the existing profile instead of
        // dying on the uniqueness constraint. The stored `id` and
        // `created_at` survive so job and proposal references stay valid.
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::external_id)
            .do_update()
            .set((
                users::email.eq(excluded(users::email)),
                users::name.eq(excluded(users::name)),
                users::profile_picture.eq(excluded(users::profile_picture)),
                users::role.eq(excluded(users::role)),
                users::bio.eq(excluded(users::bio)),
                users::skills.eq(excluded(users::skills)),
                users::hourly_rate.eq(excluded(users::hourly_rate)),
                users::balance.eq(excluded(users::balance)),
                users::updated_at.eq(excluded(users::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = users::table
            .filter(users::external_id.eq(external_id.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
