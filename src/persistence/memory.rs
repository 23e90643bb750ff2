//! In-process [`StudentStore`] keeping rows in insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StudentStore};
use crate::domain::{Student, StudentId};

/// Volatile student table used for local runs (`STORE_BACKEND=memory`) and
/// tests. Rows are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    rows: RwLock<Vec<Student>>,
}

impl MemoryStudentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn insert(&self, student: &Student) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.student_id == student.student_id) {
            return Err(StoreError::Duplicate(student.student_id.clone()));
        }
        rows.push(student.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn get_by_id(&self, student_id: &StudentId) -> Result<Option<Student>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|r| &r.student_id == student_id)
            .cloned())
    }
}
