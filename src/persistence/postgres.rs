//! PostgreSQL implementation of [`StudentStore`].
//!
//! Expects a table shaped like:
//!
//! ```sql
//! CREATE TABLE students (
//!     student_id    TEXT PRIMARY KEY,
//!     name          TEXT NOT NULL,
//!     profile_image TEXT NOT NULL,
//!     qr_code       TEXT NOT NULL
//! );
//! ```
//!
//! Creating and migrating that table is left to the deployment.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{StoreError, StudentStore};
use crate::config::DatabaseConfig;
use crate::domain::{Student, StudentId};

type StudentRow = (String, String, String, String);

fn into_student((student_id, name, profile_image, qr_code): StudentRow) -> Student {
    Student {
        student_id: StudentId::new(student_id),
        name,
        profile_image,
        qr_code,
    }
}

/// PostgreSQL-backed store sharing one bounded `sqlx::PgPool` across all
/// requests.
#[derive(Debug, Clone)]
pub struct PostgresStudentStore {
    pool: PgPool,
}

impl PostgresStudentStore {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool from `config` and opens the first connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection options are invalid
    /// or the store cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(config.connect_options()?)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "connected to postgres"
        );
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn insert(&self, student: &Student) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO students (student_id, name, profile_image, qr_code) VALUES ($1, $2, $3, $4)",
        )
        .bind(student.student_id.as_str())
        .bind(&student.name)
        .bind(&student.profile_image)
        .bind(&student.qr_code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            "SELECT student_id, name, profile_image, qr_code FROM students",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(into_student).collect())
    }

    async fn get_by_id(&self, student_id: &StudentId) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT student_id, name, profile_image, qr_code FROM students WHERE student_id = $1",
        )
        .bind(student_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(into_student))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // Run with: DATABASE_URL=postgres://... cargo test -- --ignored

    async fn connect() -> PostgresStudentStore {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            panic!("DATABASE_URL required");
        };
        let Ok(pool) = PgPoolOptions::new().max_connections(2).connect(&url).await else {
            panic!("pool creation failed");
        };
        let created = sqlx::query(
            "CREATE TABLE IF NOT EXISTS students (student_id TEXT PRIMARY KEY, name TEXT NOT NULL, \
             profile_image TEXT NOT NULL, qr_code TEXT NOT NULL)",
        )
        .execute(&pool)
        .await;
        if let Err(e) = created {
            panic!("create table failed: {e}");
        }
        PostgresStudentStore::new(pool)
    }

    fn student(id: &str) -> Student {
        Student {
            student_id: StudentId::from(id),
            name: "Ana".to_string(),
            profile_image: "img.png".to_string(),
            qr_code: format!("QR-{id}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_get_round_trips() {
        let store = connect().await;
        let id = uuid::Uuid::new_v4().to_string();
        let s = student(&id);

        if let Err(e) = store.insert(&s).await {
            panic!("insert failed: {e}");
        }
        let Ok(found) = store.get_by_id(&s.student_id).await else {
            panic!("select failed");
        };
        assert_eq!(found, Some(s));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_insert_is_rejected() {
        let store = connect().await;
        let id = uuid::Uuid::new_v4().to_string();

        if let Err(e) = store.insert(&student(&id)).await {
            panic!("first insert failed: {e}");
        }
        let mut other = student(&id);
        other.name = "Other".to_string();
        assert!(store.insert(&other).await.is_err());

        let Ok(Some(found)) = store.get_by_id(&StudentId::from(id.as_str())).await else {
            panic!("original row missing");
        };
        assert_eq!(found.name, "Ana");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_id_is_none() {
        let store = connect().await;
        let id = StudentId::new(uuid::Uuid::new_v4().to_string());
        let Ok(found) = store.get_by_id(&id).await else {
            panic!("select failed");
        };
        assert!(found.is_none());
    }
}
