//! In-memory repository used by the router tests
//!
//! Mirrors the PostgreSQL semantics: serial ids starting at 1, rows kept in
//! insertion order, soft delete only.

use super::gender::GenderRepository;
use crate::error::AppError;
use crate::models::Gender;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
struct Table {
    rows: Vec<Gender>,
    next_id: i32,
}

#[derive(Default)]
pub struct MemoryGenderRepository {
    table: Mutex<Table>,
}

impl MemoryGenderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw view of every stored row, active or not
    pub fn rows(&self) -> Vec<Gender> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl GenderRepository for MemoryGenderRepository {
    async fn list_active(&self) -> Result<Vec<Gender>, AppError> {
        Ok(self
            .lock()
            .rows
            .iter()
            .filter(|g| g.is_active)
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str) -> Result<Gender, AppError> {
        let mut table = self.lock();
        table.next_id += 1;
        let gender = Gender {
            id: table.next_id,
            name: name.to_string(),
            is_active: true,
        };
        table.rows.push(gender.clone());
        Ok(gender)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Gender>, AppError> {
        Ok(self.lock().rows.iter().find(|g| g.id == id).cloned())
    }

    async fn update(&self, id: i32, name: &str, is_active: bool) -> Result<u64, AppError> {
        let mut table = self.lock();
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|g| g.id == id) {
            row.name = name.to_string();
            row.is_active = is_active;
            affected += 1;
        }
        Ok(affected)
    }

    async fn deactivate(&self, id: i32) -> Result<u64, AppError> {
        let mut table = self.lock();
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|g| g.id == id) {
            row.is_active = false;
            affected += 1;
        }
        Ok(affected)
    }
}

/// Repository whose every call fails as if the pool were unreachable
pub struct UnavailableGenderRepository;

#[async_trait]
impl GenderRepository for UnavailableGenderRepository {
    async fn list_active(&self) -> Result<Vec<Gender>, AppError> {
        Err(AppError::Pool(deadpool_postgres::PoolError::Closed))
    }

    async fn create(&self, _name: &str) -> Result<Gender, AppError> {
        Err(AppError::Pool(deadpool_postgres::PoolError::Closed))
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Gender>, AppError> {
        Err(AppError::Pool(deadpool_postgres::PoolError::Closed))
    }

    async fn update(&self, _id: i32, _name: &str, _is_active: bool) -> Result<u64, AppError> {
        Err(AppError::Pool(deadpool_postgres::PoolError::Closed))
    }

    async fn deactivate(&self, _id: i32) -> Result<u64, AppError> {
        Err(AppError::Pool(deadpool_postgres::PoolError::Closed))
    }
}
