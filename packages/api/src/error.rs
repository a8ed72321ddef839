//! Auth flow errors and the mapping from transport failures to [`BackendError`].

use serde::Deserialize;
use store::BackendError;
use thiserror::Error;

/// Signing in failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// Wrong email or password.
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{}", .0.describe("sign in"))]
    Backend(BackendError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        if err.status == 400 {
            Self::InvalidCredentials(err.message)
        } else {
            Self::Backend(err)
        }
    }
}

/// Creating an account failed, either at sign-up or at the login that follows it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// Duplicate email, weak password and other validation failures.
    #[error("{}", .0.describe("create an account"))]
    Rejected(BackendError),
    #[error("Account created, but signing in failed: {0}")]
    Login(AuthError),
}

/// Error body the backend sends with non-2xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: serde_json::Map<String, serde_json::Value>,
}

/// Build a [`BackendError`] from a non-2xx answer.
pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> BackendError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let mut message = parsed
        .as_ref()
        .map(|b| b.message.trim().to_string())
        .unwrap_or_default();
    if let Some(detail) = parsed.as_ref().and_then(field_detail) {
        message = if message.is_empty() {
            detail
        } else {
            format!("{message} {detail}")
        };
    }
    if message.is_empty() {
        message = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }
    BackendError::new(status.as_u16(), message)
}

/// First per-field validation message, e.g. `email: The email is invalid or already in use.`
fn field_detail(body: &ErrorBody) -> Option<String> {
    body.data.iter().find_map(|(field, value)| {
        value
            .get("message")
            .and_then(|m| m.as_str())
            .map(|m| format!("{field}: {m}"))
    })
}

/// The request never got an HTTP answer.
pub(crate) fn from_transport(err: reqwest::Error) -> BackendError {
    BackendError::unreachable(err.to_string())
}
