//! Command Relay
//!
//! Translates one inbound device command into one outbound HTTP call and
//! reports the outcome through tracing and the `RelayEvent` channel.
//!
//! ## Flow
//!
//! ```text
//! on_command(payload)
//!       │  payload[1]
//!       ▼
//! send_command(command) ──spawn──► execute ──► Transport::post_json
//!                                      │
//!                                      ▼
//!                         classify: ready state → status → JSON → result
//!                                      │
//!                                      ▼
//!                            log + RelayEvent (Succeeded / Failed)
//! ```
//!
//! Each command is its own task. Nothing is shared between tasks besides the
//! transport and the outcome sender, so completions may arrive in any order.

use crossbeam_channel::Sender;
use reqwest::StatusCode;
use serde_json::Value;
use snafu::ResultExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::command::{Command, RequestEnvelope};
use crate::domain::config::EndpointConfig;
use crate::domain::response::{ServiceResponse, TransportResponse};
use crate::error::{Error, MalformedResponseSnafu, Result};
use crate::services::events::{Failure, RelayEvent, RequestId};
use crate::services::runtime::spawn_named_in_tokio;
use crate::services::transport::Transport;

/// Relay from device commands to the light control service
pub struct CommandRelay<T: Transport> {
    /// Full exec URL
    url: Arc<str>,
    /// Outbound POST primitive
    transport: T,
    /// Outcome sender
    tx: Sender<RelayEvent>,
}

impl<T: Transport> CommandRelay<T> {
    /// Create a new relay posting to `endpoint`
    pub fn new(endpoint: &EndpointConfig, transport: T, tx: Sender<RelayEvent>) -> Arc<Self> {
        Arc::new(Self {
            url: endpoint.url().into(),
            transport,
            tx,
        })
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Device runtime finished starting
    pub fn on_ready(&self) {
        tracing::info!("App is ready.");
        let _ = self.tx.send(RelayEvent::Ready {
            at: chrono::Utc::now(),
        });
    }

    /// Handle a command event.
    ///
    /// Returns the request task, or `None` when the payload carried no
    /// command (logged as `MalformedCommandError`; later events are
    /// unaffected).
    pub fn on_command(self: &Arc<Self>, payload: &Value) -> Option<JoinHandle<()>> {
        tracing::info!("Received command from device:");
        tracing::info!("{}", payload);

        match Command::from_payload(payload) {
            Ok(command) => Some(self.send_command(command)),
            Err(err) => {
                self.report_failure(None, None, &err);
                None
            }
        }
    }

    /// Start one request for `command` and return immediately.
    ///
    /// The handle may be dropped; the request still runs to completion.
    pub fn send_command(self: &Arc<Self>, command: Command) -> JoinHandle<()> {
        let id = RequestId::generate();
        tracing::info!(request_id = %id, "Turning {} light(s).", command);

        let relay = Arc::clone(self);
        spawn_named_in_tokio("command", async move {
            let outcome = relay.execute(&id, &command).await;
            relay.report(id, command, outcome);
        })
    }

    /// Post the envelope for `command` and classify the reply
    pub async fn execute(&self, id: &RequestId, command: &Command) -> Result<ServiceResponse> {
        let body = RequestEnvelope::new(command).to_body()?;

        let _ = self.tx.send(RelayEvent::Dispatched {
            id: id.clone(),
            command: command.clone(),
            body: body.as_str().into(),
        });

        let response = self.transport.post_json(&self.url, body).await?;
        tracing::info!(request_id = %id, "Response received.");

        classify(response)
    }

    /// Log and emit the outcome of one request
    fn report(&self, id: RequestId, command: Command, outcome: Result<ServiceResponse>) {
        match outcome {
            Ok(response) => {
                let json = response.to_json();
                tracing::info!(request_id = %id, "{}", json);
                let _ = self.tx.send(RelayEvent::Succeeded {
                    id,
                    command,
                    response: json.into(),
                });
            }
            Err(err) => self.report_failure(Some(id), Some(command), &err),
        }
    }

    fn report_failure(&self, id: Option<RequestId>, command: Option<Command>, err: &Error) {
        match &id {
            Some(id) => tracing::error!(request_id = %id, kind = err.kind(), "{}", err),
            None => tracing::error!(kind = err.kind(), "{}", err),
        }

        let _ = self.tx.send(RelayEvent::Failed {
            id,
            command,
            failure: Failure::from(err),
        });
    }
}

impl<T: Transport> std::fmt::Debug for CommandRelay<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRelay")
            .field("url", &self.url)
            .finish()
    }
}

/// Ready state first, then status, then the body's `result`
fn classify(response: TransportResponse) -> Result<ServiceResponse> {
    if !response.ready_state.is_done() {
        return Err(Error::IncompleteResponse {
            ready_state: response.ready_state.code(),
        });
    }

    if response.status != StatusCode::OK.as_u16() {
        return Err(Error::HttpStatus {
            status: response.status,
        });
    }

    tracing::info!("Received response from web service:");
    let value: Value = serde_json::from_str(&response.body).context(MalformedResponseSnafu)?;
    let parsed = ServiceResponse(value);

    if parsed.is_success() {
        Ok(parsed)
    } else {
        Err(Error::ApiResult {
            success: parsed.success_field(),
        })
    }
}
