//! Real-time notification pushed to listeners.

use serde::{Deserialize, Serialize};

use super::{Student, StudentId};

/// Text carried in the `message` field of a creation event.
pub const STUDENT_ADDED_MESSAGE: &str = "Nouvel étudiant ajouté";

/// Transient event broadcast after a successful student insert.
///
/// Serialized as `{"message": ..., "student_id": ..., "name": ...}`. Never
/// persisted and never replayed to listeners that connect later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEvent {
    /// Human-readable event label.
    pub message: String,
    /// Identifier of the created student.
    pub student_id: StudentId,
    /// Name of the created student.
    pub name: String,
}

impl StudentEvent {
    /// Builds the creation event for `student`.
    #[must_use]
    pub fn student_added(student: &Student) -> Self {
        Self {
            message: STUDENT_ADDED_MESSAGE.to_string(),
            student_id: student.student_id.clone(),
            name: student.name.clone(),
        }
    }
}
