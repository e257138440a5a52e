//! Command - Device Command and Request Envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{COMMAND_INDEX, ENVELOPE_RESULT};
use crate::error::{Error, Result};

/// An opaque switch command taken from a device payload (e.g. "ON", "OFF")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Command(pub Value);

impl Command {
    /// Extract the command from a payload at the default command index
    pub fn from_payload(payload: &Value) -> Result<Self> {
        Self::from_payload_at(payload, COMMAND_INDEX)
    }

    /// Extract the command at `index`.
    ///
    /// Arrays are indexed by position. Objects are indexed by the stringified
    /// key, which is how app-message dictionaries arrive (`{"1": "ON"}`).
    pub fn from_payload_at(payload: &Value, index: usize) -> Result<Self> {
        let found = match payload {
            Value::Array(items) => items.get(index),
            Value::Object(map) => map.get(&index.to_string()),
            _ => None,
        };

        match found {
            Some(value) => Ok(Self(value.clone())),
            None => Err(Error::MalformedCommand {
                index,
                payload: payload.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Strings print bare so the intent line reads "Turning ON light(s)."
        match &self.0 {
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

/// Request body sent to the control service
///
/// `result` is always "success"; the service expects the field on requests.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope<'a> {
    pub data: &'a Command,
    pub result: &'static str,
}

impl<'a> RequestEnvelope<'a> {
    pub fn new(command: &'a Command) -> Self {
        Self {
            data: command,
            result: ENVELOPE_RESULT,
        }
    }

    /// Serialize to the JSON request body
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
