//! Service layer: business logic orchestration.
//!
//! [`StudentService`] runs every store operation and emits creation events
//! through the [`super::domain::NotificationHub`].

pub mod student_service;

pub use student_service::StudentService;
