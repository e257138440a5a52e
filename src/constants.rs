//! Relay Constants
//!
//! Defaults for the light control endpoint and the device event protocol.

/// Default control service host
pub const DEFAULT_HOST: &str = "192.168.2.56";

/// Default control service port
pub const DEFAULT_PORT: u16 = 8045;

/// Command execution path on the control service
pub const EXEC_PATH: &str = "/RubiksService.svc/exec";

/// Payload position holding the command (app-message key 1 on the watch)
pub const COMMAND_INDEX: usize = 1;

/// Literal sent in the envelope's `result` field
pub const ENVELOPE_RESULT: &str = "success";

/// Response `result` value that marks a successful call
pub const RESULT_SUCCESS: &str = "success";

/// Transport ready state for a fully loaded response
pub const READY_STATE_DONE: u8 = 4;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SWITCH_RELAY_CONFIG";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "relay.toml";

/// Prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "switch-relay.log";
