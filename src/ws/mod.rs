//! WebSocket layer: upgrade handler and per-connection loop.
//!
//! Listeners connect on `/` or `/ws`, receive a welcome text, then every
//! student creation event as JSON text. Inbound frames are only logged.

pub mod connection;
pub mod handler;
