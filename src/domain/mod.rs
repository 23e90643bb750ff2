//! Domain layer: student records, notification events, listener registry.
//!
//! Holds the server-side model shared by the REST handlers, the WebSocket
//! layer and the store backends.

pub mod listener_id;
pub mod notification_hub;
pub mod student;
pub mod student_event;

pub use listener_id::ListenerId;
pub use notification_hub::NotificationHub;
pub use student::{Student, StudentId};
pub use student_event::StudentEvent;
