//! # gatekeeper-gateway
//!
//! REST API and WebSocket gateway over the school gatekeeper student
//! registry.
//!
//! Students are created through `POST /add-student` and read back through
//! `GET /students` and `GET /student/{student_id}`. Every successful
//! creation is pushed to all connected WebSocket listeners.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── StudentService (service/)
//!     ├── NotificationHub (domain/)
//!     │
//!     └── StudentStore (persistence/)
//!           ├── PostgreSQL (sqlx pool)
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
pub mod ws;
