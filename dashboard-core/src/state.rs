//! Observable resource state and the canonical error shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error code the backend uses when the session is missing or expired.
pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The single error shape consumers see, whatever went wrong underneath.
///
/// Server-reported envelopes map onto it field by field; transport failures,
/// undecodable bodies and unrecognized payloads all become
/// [`NormalizedError::internal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{name} ({status} {code}): {message}")]
pub struct NormalizedError {
    pub name: String,
    pub status: i64,
    pub message: String,
    pub code: String,
}

impl NormalizedError {
    /// The fixed fallback used for every failure the server did not describe.
    pub fn internal() -> Self {
        Self {
            name: "InternalServerError".to_string(),
            status: 500,
            message: "InternalServerError".to_string(),
            code: "INTERNAL_SERVER_ERROR".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == UNAUTHORIZED_CODE
    }
}

/// Error envelope as sent by the backend:
/// `{ statusCode: number, code: string, error: string, message: string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: i64,
    pub code: String,
    pub error: String,
    pub message: String,
}

impl ErrorEnvelope {
    /// Structural check for the envelope. Returns `None` for anything else,
    /// including non-objects; never fails loudly.
    ///
    /// Any JSON number is accepted for `statusCode`; fractional values are
    /// truncated.
    pub fn from_value(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        let status = object.get("statusCode")?;
        let status_code = status
            .as_i64()
            .or_else(|| status.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .or_else(|| status.as_f64().map(|f| f as i64))?;
        Some(Self {
            status_code,
            code: object.get("code")?.as_str()?.to_string(),
            error: object.get("error")?.as_str()?.to_string(),
            message: object.get("message")?.as_str()?.to_string(),
        })
    }
}

impl From<ErrorEnvelope> for NormalizedError {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self {
            name: envelope.error,
            status: envelope.status_code,
            message: envelope.message,
            code: envelope.code,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle position of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceStatus::Idle => write!(f, "idle"),
            ResourceStatus::Loading => write!(f, "loading"),
            ResourceStatus::Ready => write!(f, "ready"),
            ResourceStatus::Failed => write!(f, "failed"),
        }
    }
}

/// What consumers observe. Data and error are carried by the variant, so they
/// can never be present together.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(NormalizedError),
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::Idle
    }
}

impl<T> ResourceState<T> {
    pub fn status(&self) -> ResourceStatus {
        match self {
            ResourceState::Idle => ResourceStatus::Idle,
            ResourceState::Loading => ResourceStatus::Loading,
            ResourceState::Ready(_) => ResourceStatus::Ready,
            ResourceState::Failed(_) => ResourceStatus::Failed,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&NormalizedError> {
        match self {
            ResourceState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// `true` until the resource has settled into `Ready` or `Failed`.
    pub fn is_pending(&self) -> bool {
        matches!(self, ResourceState::Idle | ResourceState::Loading)
    }

    /// Convert a settled state into a `Result`; `None` while pending.
    pub fn into_result(self) -> Option<Result<T, NormalizedError>> {
        match self {
            ResourceState::Ready(data) => Some(Ok(data)),
            ResourceState::Failed(error) => Some(Err(error)),
            ResourceState::Idle | ResourceState::Loading => None,
        }
    }
}

/// How `write` reconciles local state with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteBackMode {
    /// Apply the caller's value locally at once; POST in the background.
    Optimistic,
    /// Await the POST and hand the decoded response to the caller; local
    /// state is left alone.
    Confirmed,
}

impl fmt::Display for WriteBackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteBackMode::Optimistic => write!(f, "optimistic"),
            WriteBackMode::Confirmed => write!(f, "confirmed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
