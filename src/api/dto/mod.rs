//! Data Transfer Objects for REST request/response serialization.

pub mod student_dto;

pub use student_dto::*;
