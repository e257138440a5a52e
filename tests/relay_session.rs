//! End-to-end relay sessions: event stream in, HTTP requests out.

use async_trait::async_trait;
use crossbeam_channel::{Receiver, unbounded};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use switch_relay::domain::config::EndpointConfig;
use switch_relay::domain::response::TransportResponse;
use switch_relay::error::Result;
use switch_relay::services::{CommandRelay, HttpTransport, RelayEvent, Transport, run};

/// Answers every request with the same reply and records the bodies
#[derive(Clone, Default)]
struct RecordingTransport {
    bodies: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post_json(&self, _url: &str, body: String) -> Result<TransportResponse> {
        let body: Value = serde_json::from_str(&body)?;
        self.bodies.lock().expect("lock").push(body);
        Ok(TransportResponse::done(200, r#"{"result":"success"}"#))
    }
}

fn outcomes(rx: &Receiver<RelayEvent>) -> (usize, Vec<&'static str>) {
    let mut ready = 0;
    let mut terminal = Vec::new();
    for event in rx.try_iter() {
        match event {
            RelayEvent::Ready { .. } => ready += 1,
            RelayEvent::Succeeded { .. } => terminal.push("ok"),
            RelayEvent::Failed { failure, .. } => terminal.push(failure.kind),
            RelayEvent::Dispatched { .. } => {}
        }
    }
    (ready, terminal)
}

#[tokio::test]
async fn session_relays_each_command_once() {
    let transport = RecordingTransport::default();
    let (tx, rx) = unbounded();
    let relay = CommandRelay::new(&EndpointConfig::default(), transport.clone(), tx);

    let input = concat!(
        "{\"type\":\"ready\"}\n",
        "\n",
        "{\"type\":\"appmessage\",\"payload\":{\"1\":\"ON\"}}\n",
        "garbage\n",
        "{\"type\":\"command\",\"payload\":[\"x\"]}\n",
        "{\"type\":\"command\",\"payload\":[\"x\",\"off\"]}\n",
    );

    let summary = run(input.as_bytes(), relay).await.expect("run");

    assert_eq!(summary.events, 4);
    assert_eq!(summary.requests, 2);
    assert_eq!(summary.skipped, 1);

    let mut bodies = transport.bodies.lock().expect("lock").clone();
    bodies.sort_by_key(|b| b["data"].to_string());
    assert_eq!(
        bodies,
        vec![
            json!({"data": "ON", "result": "success"}),
            json!({"data": "off", "result": "success"}),
        ]
    );

    let (ready, mut terminal) = outcomes(&rx);
    terminal.sort();
    assert_eq!(ready, 1);
    assert_eq!(terminal, vec!["MalformedCommandError", "ok", "ok"]);
}

#[tokio::test]
async fn non_utf8_line_is_skipped_and_session_continues() {
    let transport = RecordingTransport::default();
    let (tx, rx) = unbounded();
    let relay = CommandRelay::new(&EndpointConfig::default(), transport.clone(), tx);

    let mut input = b"{\"type\":\"ready\"}\n".to_vec();
    input.extend_from_slice(b"\xff\xfe garbage\n");
    input.extend_from_slice(b"{\"type\":\"command\",\"payload\":[\"x\",\"on\"]}\n");

    let summary = run(&input[..], relay).await.expect("run");

    assert_eq!(summary.events, 2);
    assert_eq!(summary.requests, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        *transport.bodies.lock().expect("lock"),
        vec![json!({"data": "on", "result": "success"})]
    );
    assert_eq!(outcomes(&rx), (1, vec!["ok"]));
}

#[tokio::test]
async fn command_without_payload_reports_malformed_command() {
    let transport = RecordingTransport::default();
    let (tx, rx) = unbounded();
    let relay = CommandRelay::new(&EndpointConfig::default(), transport.clone(), tx);

    let input = "{\"type\":\"appmessage\"}\n";
    let summary = run(input.as_bytes(), relay).await.expect("run");

    assert_eq!(summary.events, 1);
    assert_eq!(summary.requests, 0);
    assert_eq!(summary.skipped, 0);
    assert!(transport.bodies.lock().expect("lock").is_empty());
    assert_eq!(outcomes(&rx), (0, vec!["MalformedCommandError"]));
}

/// Accept one connection, capture the raw request, send `reply`
async fn serve_once(reply: &'static str) -> (EndpointConfig, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];

        // Read headers, then Content-Length bytes of body
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let length = text[..split]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= split + 4 + length {
                    break;
                }
            }
        }

        socket.write_all(reply.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).to_string()
    });

    let endpoint = EndpointConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..EndpointConfig::default()
    };
    (endpoint, handle)
}

async fn relay_against(reply: &'static str) -> (String, Vec<&'static str>) {
    let (endpoint, server) = serve_once(reply).await;
    let (tx, rx) = unbounded();
    let transport = HttpTransport::new(None).expect("client");
    let relay = CommandRelay::new(&endpoint, transport, tx);

    relay
        .on_command(&json!(["x", "on"]))
        .expect("task")
        .await
        .expect("join");

    let request = server.await.expect("server");
    (request, outcomes(&rx).1)
}

#[tokio::test]
async fn http_request_has_json_envelope() {
    let (request, terminal) = relay_against(
        concat!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n",
            "Content-Length: 30\r\nConnection: close\r\n\r\n",
            "{\"result\":\"success\",\"count\":1}",
        ),
    )
    .await;

    assert!(request.starts_with("POST /RubiksService.svc/exec HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));

    let body = request.split("\r\n\r\n").nth(1).expect("body");
    let body: Value = serde_json::from_str(body).expect("json body");
    assert_eq!(body, json!({"data": "on", "result": "success"}));

    assert_eq!(terminal, vec!["ok"]);
}

#[tokio::test]
async fn http_500_is_reported_once() {
    let (_request, terminal) = relay_against(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert_eq!(terminal, vec!["HttpStatusError"]);
}
