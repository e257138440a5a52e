//! Relay Events
//!
//! Outcomes emitted by the relay alongside its log lines. Embedders and
//! tests read these from the channel handed to `CommandRelay::new`.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::command::Command;
use crate::error::Error;

/// Correlation ID tying a command to its outcome in the logs
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct RequestId(pub Arc<str>);

impl RequestId {
    /// Generate a new random request ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure summary carried on the outcome channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Error class (e.g. "HttpStatusError")
    pub kind: &'static str,
    /// Rendered log message
    pub message: Arc<str>,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string().into(),
        }
    }
}

/// Events emitted by the relay
#[derive(Clone, Debug)]
pub enum RelayEvent {
    /// Device runtime reported ready
    Ready { at: DateTime<Utc> },

    /// A command request was dispatched
    Dispatched {
        id: RequestId,
        command: Command,
        /// Serialized envelope that was posted
        body: Arc<str>,
    },

    /// Service reported success; `response` is the re-serialized reply
    Succeeded {
        id: RequestId,
        command: Command,
        response: Arc<str>,
    },

    /// Invocation ended in failure. `id`/`command` are absent when the
    /// payload never yielded a command.
    Failed {
        id: Option<RequestId>,
        command: Option<Command>,
        failure: Failure,
    },
}

impl RelayEvent {
    /// Whether this event ends an invocation
    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayEvent::Succeeded { .. } | RelayEvent::Failed { .. })
    }
}
