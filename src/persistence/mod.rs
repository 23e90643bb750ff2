//! Persistence layer: the `students` table behind a [`StudentStore`] trait.
//!
//! [`PostgresStudentStore`] talks to PostgreSQL through a shared
//! `sqlx::PgPool`; [`MemoryStudentStore`] keeps rows in-process for local
//! runs and tests. Both enforce `student_id` uniqueness at insert time and
//! nowhere else.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Student, StudentId};

pub use memory::MemoryStudentStore;
pub use postgres::PostgresStudentStore;

/// Failure reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error raised by the database driver (connectivity, constraint
    /// violation, malformed statement, pool timeout).
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// In-process uniqueness violation on `student_id`.
    #[error("duplicate key value violates unique constraint \"students_pkey\": student_id {0} already exists")]
    Duplicate(StudentId),
}

/// Access to the `students` table.
///
/// Every call is a single statement; no transaction spans several calls.
#[async_trait]
pub trait StudentStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a duplicate `student_id` or when the store
    /// cannot be reached.
    async fn insert(&self, student: &Student) -> Result<(), StoreError>;

    /// Returns every row in store order. An empty table yields an empty vec.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be reached.
    async fn list_all(&self) -> Result<Vec<Student>, StoreError>;

    /// Looks a row up by id. Absence is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be reached.
    async fn get_by_id(&self, student_id: &StudentId) -> Result<Option<Student>, StoreError>;
}
