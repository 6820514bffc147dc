use std::io::{Cursor, Empty};

use tiny_http::{Header, Request, Response, StatusCode};
use tungstenite::handshake::derive_accept_key;

const WEBSOCKET_VERSION: &str = "13";

/// What to do with an incoming HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upgrade {
    /// A valid WebSocket upgrade carrying its `Sec-WebSocket-Key`.
    Accept(String),
    /// Anything else, with the reason it was turned away.
    Reject(&'static str),
}

fn header_value<'r>(request: &'r Request, name: &'static str) -> Option<&'r str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str())
}

pub fn classify(request: &Request) -> Upgrade {
    classify_headers(
        header_value(request, "Upgrade"),
        header_value(request, "Sec-WebSocket-Version"),
        header_value(request, "Sec-WebSocket-Key"),
    )
}

fn classify_headers(upgrade: Option<&str>, version: Option<&str>, key: Option<&str>) -> Upgrade {
    if !upgrade.is_some_and(|v| v.trim().eq_ignore_ascii_case("websocket")) {
        return Upgrade::Reject("not a websocket upgrade");
    }
    if version.map(str::trim) != Some(WEBSOCKET_VERSION) {
        return Upgrade::Reject("unsupported websocket version");
    }
    match key.map(str::trim) {
        Some(key) if !key.is_empty() => Upgrade::Accept(key.to_owned()),
        _ => Upgrade::Reject("missing Sec-WebSocket-Key"),
    }
}

fn header(name: &str, value: &str) -> Header {
    // Names are constants and values are ASCII (base64 or literals).
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("valid ASCII header")
}

/// The `101 Switching Protocols` reply for a client `key`.
pub fn switching_protocols(key: &str) -> Response<Empty> {
    Response::new_empty(StatusCode(101))
        .with_header(header("Upgrade", "websocket"))
        .with_header(header("Connection", "Upgrade"))
        .with_header(header("Sec-WebSocket-Accept", &derive_accept_key(key.as_bytes())))
}

/// `426 Upgrade Required` for plain HTTP requests.
pub fn upgrade_required(reason: &str) -> Response<Cursor<Vec<u8>>> {
    Response::from_string(format!("426 Upgrade Required: {reason}\nconnect with a websocket client\n"))
        .with_status_code(StatusCode(426))
        .with_header(header("Sec-WebSocket-Version", WEBSOCKET_VERSION))
}
