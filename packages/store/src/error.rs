//! # Backend failures and their user-facing classification
//!
//! Every call across the [`crate::RecordSource`] seam fails with a [`BackendError`]:
//! the HTTP status the backend answered with (or `0` when it could not be reached)
//! plus the backend's own message. Views never propagate these; they turn them into
//! a [`Banner`] through [`BackendError::describe`].
//!
//! | Status | [`ErrorKind`] | Banner text | Retry offered |
//! |--------|---------------|-------------|---------------|
//! | `0` | `Connectivity` | "Cannot connect to the database server..." | yes |
//! | `403` | `Permission` | "You do not have permission to {action}." | no |
//! | other | `Other` | backend message verbatim | yes |

use serde::{Deserialize, Serialize};

/// Banner text for an unreachable backend.
pub const CONNECTIVITY_MESSAGE: &str =
    "Cannot connect to the database server. Please make sure PocketBase is running.";

/// A failed backend request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("backend request failed ({status}): {message}")]
pub struct BackendError {
    /// HTTP status, `0` when the server was unreachable.
    pub status: u16,
    /// Message reported by the backend or the transport.
    pub message: String,
}

/// Coarse classification of a [`BackendError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    Permission,
    Other,
}

impl ErrorKind {
    /// Whether retrying the same request can change the outcome.
    pub const fn retryable(self) -> bool {
        !matches!(self, Self::Permission)
    }
}

impl BackendError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The server could not be reached at all.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            0 => ErrorKind::Connectivity,
            403 => ErrorKind::Permission,
            _ => ErrorKind::Other,
        }
    }

    /// Human-readable text for a failed `action` ("view these dreams", "add letters", ...).
    pub fn describe(&self, action: &str) -> String {
        match self.kind() {
            ErrorKind::Connectivity => CONNECTIVITY_MESSAGE.to_string(),
            ErrorKind::Permission => format!("You do not have permission to {action}."),
            ErrorKind::Other if self.message.trim().is_empty() => format!("Failed to {action}"),
            ErrorKind::Other => self.message.clone(),
        }
    }

    /// Banner for this failure, carrying whether a retry control should be shown.
    pub fn banner(&self, action: &str) -> Banner {
        Banner {
            message: self.describe(action),
            retryable: self.kind().retryable(),
        }
    }
}

/// An inline error banner as rendered by the views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub retryable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_zero_is_connectivity_and_retryable() {
        let err = BackendError::unreachable("connection refused");
        assert_eq!(err.kind(), ErrorKind::Connectivity);
        let banner = err.banner("view these letters");
        assert_eq!(banner.message, CONNECTIVITY_MESSAGE);
        assert!(banner.retryable);
    }

    #[test]
    fn forbidden_names_the_action_without_retry() {
        let err = BackendError::new(403, "Only admins can perform this action.");
        let banner = err.banner("view these dreams");
        assert_eq!(banner.message, "You do not have permission to view these dreams.");
        assert!(!banner.retryable);
    }

    #[test]
    fn other_failures_show_backend_message() {
        let err = BackendError::new(400, "Failed to create record.");
        assert_eq!(err.describe("add dreams"), "Failed to create record.");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn blank_message_falls_back_to_action() {
        let err = BackendError::new(500, "  ");
        assert_eq!(err.describe("load letters"), "Failed to load letters");
    }
}
