//! Student service: persists records and fans out creation events.

use std::sync::Arc;

use crate::domain::{NotificationHub, Student, StudentEvent, StudentId};
use crate::error::GatewayError;
use crate::persistence::{StoreError, StudentStore};

/// Message returned on store failures when raw errors are not exposed.
pub const STORE_FAILURE_MESSAGE: &str = "Erreur interne de la base de données";

/// Orchestration layer for the student registry.
///
/// Owns a handle to the [`StudentStore`] and to the [`NotificationHub`].
/// Creation follows: insert → broadcast → return, so listeners are notified
/// before the HTTP response for that request is produced.
#[derive(Debug, Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
    hub: NotificationHub,
    expose_store_errors: bool,
}

impl StudentService {
    /// Creates a new `StudentService`.
    ///
    /// When `expose_store_errors` is `false`, store failures reach clients
    /// as [`STORE_FAILURE_MESSAGE`] and the raw error is only logged.
    #[must_use]
    pub fn new(
        store: Arc<dyn StudentStore>,
        hub: NotificationHub,
        expose_store_errors: bool,
    ) -> Self {
        Self {
            store,
            hub,
            expose_store_errors,
        }
    }

    /// Returns a reference to the inner [`NotificationHub`].
    #[must_use]
    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    /// Persists `student`, then broadcasts the creation event.
    ///
    /// Returns the number of listeners the event was queued for.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Store`] if the insert fails, including on a
    /// duplicate `student_id`. Nothing is broadcast in that case.
    pub async fn create_student(&self, student: Student) -> Result<usize, GatewayError> {
        self.store
            .insert(&student)
            .await
            .map_err(|e| self.store_failure("insert", e))?;

        let notified = self
            .hub
            .broadcast(&StudentEvent::student_added(&student))
            .await;

        tracing::info!(student_id = %student.student_id, notified, "student created");
        Ok(notified)
    }

    /// Returns every student in store order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Store`] if the store cannot be queried.
    pub async fn list_students(&self) -> Result<Vec<Student>, GatewayError> {
        self.store
            .list_all()
            .await
            .map_err(|e| self.store_failure("list", e))
    }

    /// Returns the student with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotFound`] if no row matches, or
    /// [`GatewayError::Store`] if the store cannot be queried.
    pub async fn get_student(&self, student_id: &StudentId) -> Result<Student, GatewayError> {
        self.store
            .get_by_id(student_id)
            .await
            .map_err(|e| self.store_failure("get", e))?
            .ok_or_else(|| GatewayError::StudentNotFound(student_id.clone()))
    }

    fn store_failure(&self, operation: &'static str, err: StoreError) -> GatewayError {
        tracing::error!(operation, error = %err, "store operation failed");
        if self.expose_store_errors {
            GatewayError::Store(err.to_string())
        } else {
            GatewayError::Store(STORE_FAILURE_MESSAGE.to_string())
        }
    }
}
