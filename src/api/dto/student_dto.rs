//! Student DTOs for the create endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Student, StudentId};
use crate::error::GatewayError;

/// Confirmation text returned by `POST /add-student`.
pub const STUDENT_CREATED_MESSAGE: &str = "Étudiant ajouté avec succès";

/// Request body for `POST /add-student`.
///
/// Fields are decoded as raw JSON so that only presence is checked: absent,
/// `null` and `""` are missing, any other value is kept as text (strings
/// verbatim, numbers/booleans/composites in their JSON form).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    /// Caller-chosen identifier.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "S1")]
    pub student_id: Option<serde_json::Value>,
    /// Display name.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Ana")]
    pub name: Option<serde_json::Value>,
    /// Profile picture URI or reference.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "img.png")]
    pub profile_image: Option<serde_json::Value>,
    /// QR code payload.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "QR1")]
    pub qr_code: Option<serde_json::Value>,
}

impl CreateStudentRequest {
    /// Checks that all four fields are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingFields`] naming every absent field.
    pub fn into_student(self) -> Result<Student, GatewayError> {
        let student_id = present(self.student_id).map(StudentId::new);
        let name = present(self.name);
        let profile_image = present(self.profile_image);
        let qr_code = present(self.qr_code);

        match (student_id, name, profile_image, qr_code) {
            (Some(student_id), Some(name), Some(profile_image), Some(qr_code)) => Ok(Student {
                student_id,
                name,
                profile_image,
                qr_code,
            }),
            (student_id, name, profile_image, qr_code) => {
                let missing = [
                    ("student_id", student_id.is_none()),
                    ("name", name.is_none()),
                    ("profile_image", profile_image.is_none()),
                    ("qr_code", qr_code.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(GatewayError::MissingFields(missing))
            }
        }
    }
}

fn present(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Response body for `POST /add-student` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateStudentResponse {
    /// Confirmation message.
    #[schema(example = "Étudiant ajouté avec succès")]
    pub message: String,
}

impl Default for CreateStudentResponse {
    fn default() -> Self {
        Self {
            message: STUDENT_CREATED_MESSAGE.to_string(),
        }
    }
}
