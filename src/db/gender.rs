//! Gender repository
//!
//! Storage seam for the gender resource. Every operation borrows exactly one
//! pooled client, runs one statement and hands the client back when the
//! guard drops, on the error paths as well as the success path.

use super::queries::{
    GET_GENDER_BY_ID, INSERT_GENDER, LIST_GENDERS_BY_ACTIVE, SET_GENDER_ACTIVE, UPDATE_GENDER,
};
use crate::error::AppError;
use crate::models::Gender;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::debug;

#[async_trait]
pub trait GenderRepository: Send + Sync {
    /// All records with `isActive = true`, in storage order
    async fn list_active(&self) -> Result<Vec<Gender>, AppError>;

    /// Insert a new, always active, record
    async fn create(&self, name: &str) -> Result<Gender, AppError>;

    /// Look up a record by id whatever its activity flag
    async fn find_by_id(&self, id: i32) -> Result<Option<Gender>, AppError>;

    /// Overwrite name and flag; returns the number of rows touched
    async fn update(&self, id: i32, name: &str, is_active: bool) -> Result<u64, AppError>;

    /// Soft delete; returns the number of rows touched
    async fn deactivate(&self, id: i32) -> Result<u64, AppError>;
}

/// PostgreSQL-backed repository
pub struct PgGenderRepository {
    pool: Pool,
}

impl PgGenderRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn gender_from_row(row: &Row) -> Result<Gender, AppError> {
    Ok(Gender {
        id: row.try_get(0)?,
        name: row.try_get(1)?,
        is_active: row.try_get(2)?,
    })
}

#[async_trait]
impl GenderRepository for PgGenderRepository {
    async fn list_active(&self) -> Result<Vec<Gender>, AppError> {
        let client = self.pool.get().await?;
        let rows = client.query(LIST_GENDERS_BY_ACTIVE, &[&true]).await?;

        rows.iter().map(gender_from_row).collect()
    }

    async fn create(&self, name: &str) -> Result<Gender, AppError> {
        let client = self.pool.get().await?;
        let row = client.query_one(INSERT_GENDER, &[&name, &true]).await?;

        gender_from_row(&row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Gender>, AppError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(GET_GENDER_BY_ID, &[&id]).await?;
        // Release before mapping so the not-found branch never holds a client
        drop(client);

        row.as_ref().map(gender_from_row).transpose()
    }

    async fn update(&self, id: i32, name: &str, is_active: bool) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client
            .execute(UPDATE_GENDER, &[&name, &is_active, &id])
            .await?;

        debug!("UPDATE gender id={} affected {} rows", id, affected);
        Ok(affected)
    }

    async fn deactivate(&self, id: i32) -> Result<u64, AppError> {
        let client = self.pool.get().await?;
        let affected = client.execute(SET_GENDER_ACTIVE, &[&false, &id]).await?;

        debug!("Soft delete gender id={} affected {} rows", id, affected);
        Ok(affected)
    }
}
