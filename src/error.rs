//! Error types for Switch Relay
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! Every relay failure is terminal for the invocation that produced it and
//! is only ever logged; nothing here is fatal to the process.

use snafu::Snafu;

/// Main error type for the relay
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Inbound payload had no command at the expected position
    #[snafu(display("Malformed command: no element at index {index} in payload {payload}"))]
    MalformedCommand { index: usize, payload: String },

    /// Service answered 200 but `result` was not "success"
    #[snafu(display("API didn't return success. Received {success} instead."))]
    ApiResult { success: String },

    /// Service answered with a status other than 200
    #[snafu(display("HTTP status returned was not 200. Received {status} instead."))]
    HttpStatus { status: u16 },

    /// Transport stopped before the response body was fully loaded
    #[snafu(display("Didn't receive ready status of 4. Received {ready_state} instead."))]
    IncompleteResponse { ready_state: u8 },

    /// Request never completed (connection refused, DNS, timeout)
    #[snafu(display("Network error contacting {url}: {message}"))]
    Network { url: String, message: String },

    /// Status 200 but the body was not JSON
    #[snafu(display("Malformed response body: {source}"))]
    MalformedResponse { source: serde_json::Error },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (event stream, config files)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },
}

impl Error {
    /// Short name of the failure class, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedCommand { .. } => "MalformedCommandError",
            Error::ApiResult { .. } => "ApiResultError",
            Error::HttpStatus { .. } => "HttpStatusError",
            Error::IncompleteResponse { .. } => "IncompleteResponseError",
            Error::Network { .. } => "NetworkError",
            Error::MalformedResponse { .. } => "MalformedResponseError",
            Error::Invalid { .. } => "InvalidError",
            Error::Io { .. } => "IoError",
            Error::Json { .. } => "JsonError",
            Error::TomlDe { .. } => "TomlError",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
