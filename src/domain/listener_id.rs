//! Identifier for a connected real-time listener.
//!
//! [`ListenerId`] wraps a [`uuid::Uuid`] (v4) so listener handles cannot be
//! mixed up with any other identifier flowing through the gateway.

use std::fmt;

/// Handle of one open WebSocket listener in the [`super::NotificationHub`].
///
/// Allocated when the connection is registered and dropped from the
/// registry on disconnect. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(uuid::Uuid);

impl ListenerId {
    /// Creates a new random `ListenerId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
