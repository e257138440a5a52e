//! Response - Control Service Reply

use serde_json::Value;

use crate::constants::{READY_STATE_DONE, RESULT_SUCCESS};

/// Progress of an outbound request, mirroring the five request states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    HeadersReceived = 2,
    Loading = 3,
    Done = 4,
}

impl ReadyState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_done(self) -> bool {
        self.code() == READY_STATE_DONE
    }
}

/// What the transport saw when the request finished loading
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub ready_state: ReadyState,
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// A fully loaded response
    pub fn done(status: u16, body: impl Into<String>) -> Self {
        Self {
            ready_state: ReadyState::Done,
            status,
            body: body.into(),
        }
    }
}

/// Parsed JSON reply from the control service
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceResponse(pub Value);

impl ServiceResponse {
    /// Whether `result` equals "success"
    pub fn is_success(&self) -> bool {
        self.0.get("result").and_then(Value::as_str) == Some(RESULT_SUCCESS)
    }

    /// The `success` field as it would print, or "undefined" if absent.
    ///
    /// The failure branch reports this field even though the check reads
    /// `result`; both reads are kept for wire compatibility.
    pub fn success_field(&self) -> String {
        match self.0.get("success") {
            Some(Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => "undefined".to_string(),
        }
    }

    /// Re-serialize the full response for logging
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}
