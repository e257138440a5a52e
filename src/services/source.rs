//! Event Source
//!
//! Reads line-delimited device events and dispatches them to the relay.
//! Handlers are bound once when the loop starts; events are handled in
//! arrival order while request tasks run on their own.

use futures::future::join_all;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::eventing::DeviceEvent;
use crate::services::relay::CommandRelay;
use crate::services::transport::Transport;
use std::sync::Arc;

/// Counters for one event-loop run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events decoded and dispatched
    pub events: usize,
    /// Requests started
    pub requests: usize,
    /// Lines that did not decode
    pub skipped: usize,
}

/// Route one event to its handler
pub fn dispatch<T: Transport>(
    relay: &Arc<CommandRelay<T>>,
    event: DeviceEvent,
) -> Option<JoinHandle<()>> {
    match event {
        DeviceEvent::Ready => {
            relay.on_ready();
            None
        }
        DeviceEvent::Command { payload } => relay.on_command(&payload),
    }
}

/// Drive the relay from `reader` until EOF.
///
/// Bad lines (invalid UTF-8 or undecodable JSON) are logged and skipped.
/// Before returning, even on a read error, waits for every request started
/// by this run so their outcomes are logged.
pub async fn run<R, T>(mut reader: R, relay: Arc<CommandRelay<T>>) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    T: Transport,
{
    let mut buf = Vec::new();
    let mut summary = RunSummary::default();
    let mut in_flight = Vec::new();

    let read_error = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break None,
            Ok(_) => {}
            Err(e) => break Some(e),
        }

        // Bad bytes only cost this line
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::warn!("Skipping non-UTF-8 event line: {}", e);
                summary.skipped += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let event = match DeviceEvent::parse(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Skipping undecodable event {:?}: {}", line, e);
                summary.skipped += 1;
                continue;
            }
        };

        summary.events += 1;
        if let Some(handle) = dispatch(&relay, event) {
            summary.requests += 1;
            in_flight.push(handle);
        }

        // Drop finished handles so long sessions don't accumulate them
        in_flight.retain(|handle| !handle.is_finished());
    };

    tracing::debug!("Event stream closed, waiting for {} request(s)", in_flight.len());
    for joined in join_all(in_flight).await {
        if let Err(e) = joined {
            tracing::error!("Request task failed: {}", e);
        }
    }

    if let Some(e) = read_error {
        tracing::error!("Event stream read failed: {}", e);
        return Err(e.into());
    }

    Ok(summary)
}
