use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::*;
use crate::config::ApiSettings;

/// One-shot HTTP stub: accepts a single connection, captures the raw
/// request, answers with a canned status line and body.
struct StubServer {
    addr: SocketAddr,
    requests: Receiver<String>,
    join: Option<JoinHandle<()>>,
}

impl StubServer {
    fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (req_tx, requests) = mpsc::channel();
        let status = status.to_string();
        let body = body.to_string();

        let join = thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let request = read_request(&mut stream);
            let _ = req_tx.send(request);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        });

        Self {
            addr,
            requests,
            join: Some(join),
        }
    }

    fn request(&mut self) -> String {
        let req = self
            .requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub served no request");
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
        req
    }
}

/// Read one HTTP request: headers plus a `Content-Length` body when present.
fn read_request(stream: &mut TcpStream) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                let Some(end) = header_end(&buf) else {
                    continue;
                };
                let headers = String::from_utf8_lossy(&buf[..end]);
                let content_length = headers
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn settings_for(addr: SocketAddr) -> ApiSettings {
    ApiSettings {
        base_url: format!("http://{addr}"),
        csrf_token: Some("tok-123".to_string()),
        timeout_ms: 2_000,
    }
}

#[test]
fn get_sends_default_headers_and_csrf_token() {
    let mut stub = StubServer::start("200 OK", r#"{"status": "healthy"}"#);
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let health = client.health().unwrap();
    assert!(health.is_ok());

    let request = stub.request();
    assert!(request.starts_with("GET /api/health HTTP/1.1"));
    let lower = request.to_lowercase();
    assert!(lower.contains("accept: application/json"));
    assert!(lower.contains("content-type: application/json"));
    assert!(lower.contains("x-requested-with: xmlhttprequest"));
    assert!(lower.contains("x-csrf-token: tok-123"));
}

#[test]
fn post_omits_csrf_token_and_sends_rating_body() {
    let mut stub = StubServer::start("200 OK", r#"{"new_rating": 4.2}"#);
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let update = client.rate(7, 4.0).unwrap();
    assert_eq!(update.new_rating, 4.2);

    let request = stub.request();
    assert!(request.starts_with("POST /api/songs/7/rate HTTP/1.1"));
    // The token rides on GETs only.
    assert!(!request.to_lowercase().contains("x-csrf-token"));
    assert!(request.contains(r#"{"rating":4.0}"#));
}

#[test]
fn search_query_is_percent_encoded() {
    let mut stub = StubServer::start("200 OK", "[]");
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let tracks = client.search("miles davis & co").unwrap();
    assert!(tracks.is_empty());

    let request = stub.request();
    assert!(request.starts_with("GET /api/search?q=miles%20davis%20%26%20co HTTP/1.1"));
}

#[test]
fn error_body_message_becomes_the_error_message() {
    let mut stub = StubServer::start("500 Internal Server Error", r#"{"message": "x"}"#);
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let err = client.health().unwrap_err();
    match &err {
        ApiError::Http { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "x");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "x");
    stub.request();
}

#[test]
fn error_without_message_falls_back_to_status_code() {
    let mut stub = StubServer::start("404 Not Found", "not json");
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let err = client.health().unwrap_err();
    assert_eq!(err.to_string(), "request failed (HTTP 404)");
    stub.request();
}

#[test]
fn invalid_json_on_success_is_malformed() {
    let mut stub = StubServer::start("200 OK", "{not json");
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let err = client.health().unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
    stub.request();
}

#[test]
fn tracks_deserialize_with_optional_fields_absent() {
    let body = r#"[
        {"id": 1, "title": "So What", "artist": "Miles Davis", "duration": 545.0},
        {"id": 2, "title": "Naima", "artist": "John Coltrane", "genre": "Jazz", "score": 0.93}
    ]"#;
    let mut stub = StubServer::start("200 OK", body);
    let client = ApiClient::new(&settings_for(stub.addr)).unwrap();

    let tracks = client.search("ja").unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].duration, Some(545.0));
    assert_eq!(tracks[0].genre, None);
    assert_eq!(tracks[1].score, Some(0.93));
    assert_eq!(tracks[1].avg_rating, None);
    stub.request();
}

/// A client pointed at a port nothing listens on: every call fails fast
/// with a network error.
fn unreachable_client() -> ApiClient {
    let settings = ApiSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        csrf_token: None,
        timeout_ms: 2_000,
    };
    ApiClient::new(&settings).unwrap()
}

#[test]
fn failing_search_emits_exactly_one_failed_event() {
    let handle = ApiHandle::new(unreachable_client());
    handle.send(ApiCmd::Search("query".into())).unwrap();

    let event = handle.events.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(
        event,
        ApiEvent::Failed {
            context: "search failed",
            ..
        }
    ));
    assert!(
        handle
            .events
            .recv_timeout(Duration::from_millis(200))
            .is_err()
    );
    handle.quit();
}

#[test]
fn failing_play_record_emits_no_event() {
    let handle = ApiHandle::new(unreachable_client());
    handle.send(ApiCmd::RecordPlay(42)).unwrap();

    assert!(
        handle
            .events
            .recv_timeout(Duration::from_millis(500))
            .is_err()
    );
    handle.quit();
}

#[test]
fn health_check_reports_service_and_storage_separately() {
    let handle = ApiHandle::new(unreachable_client());
    handle.send(ApiCmd::HealthCheck).unwrap();

    let first = handle.events.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(first, ApiEvent::ServiceHealth(Err(_))));
    let second = handle.events.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(second, ApiEvent::StorageHealth(Err(_))));
    handle.quit();
}
