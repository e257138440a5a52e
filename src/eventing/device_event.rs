//! DeviceEvent - Inbound Events from the Device Runtime
//!
//! One JSON object per line:
//!
//! ```text
//! {"type":"ready"}
//! {"type":"appmessage","payload":{"1":"ON"}}
//! {"type":"command","payload":["x","off"]}
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Events delivered by the device runtime
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeviceEvent {
    /// Companion app finished starting
    Ready,

    /// Button press carrying a command payload. A missing payload decodes
    /// as null so the relay reports it as a malformed command.
    #[serde(rename = "appmessage", alias = "command")]
    Command {
        #[serde(default)]
        payload: Value,
    },
}

impl DeviceEvent {
    /// Decode one line of the event stream
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Create a command event
    pub fn command(payload: Value) -> Self {
        Self::Command { payload }
    }
}
