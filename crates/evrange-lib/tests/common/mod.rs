//! Common test utilities: fixture loading, a counting stub calculator, and a
//! one-shot HTTP responder for exercising the real client.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use evrange_lib::{Error, GeoPosition, Result, RouteCalculator, RouteRequest, RouteResponse};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn fixture_json(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).expect("fixture readable")
}

#[allow(dead_code)]
pub fn new_york() -> GeoPosition {
    GeoPosition::new(40.7128, -74.0060).expect("valid position")
}

#[allow(dead_code)]
pub fn los_angeles() -> GeoPosition {
    GeoPosition::new(34.0522, -118.2437).expect("valid position")
}

/// Calculator double that replays scripted outcomes and counts calls.
#[allow(dead_code)]
pub struct StubCalculator {
    outcomes: RefCell<Vec<Result<RouteResponse>>>,
    calls: Cell<usize>,
    last_request: Cell<Option<RouteRequest>>,
}

#[allow(dead_code)]
impl StubCalculator {
    /// Outcomes are returned in order, one per call.
    pub fn new(outcomes: Vec<Result<RouteResponse>>) -> Self {
        let mut outcomes = outcomes;
        outcomes.reverse();
        Self {
            outcomes: RefCell::new(outcomes),
            calls: Cell::new(0),
            last_request: Cell::new(None),
        }
    }

    pub fn distance(distance_km: f64) -> Self {
        Self::new(vec![Ok(RouteResponse::with_distance_km(distance_km))])
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_request(&self) -> Option<RouteRequest> {
        self.last_request.get()
    }
}

impl RouteCalculator for StubCalculator {
    fn name(&self) -> &str {
        "StubCalculator"
    }

    fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        self.calls.set(self.calls.get() + 1);
        self.last_request.set(Some(*request));
        self.outcomes
            .borrow_mut()
            .pop()
            .expect("stub calculator called more often than scripted")
    }
}

/// Build a transport-style failure without a network round trip.
#[allow(dead_code)]
pub fn unavailable(message: &str) -> Error {
    Error::BackendUnavailable {
        message: message.to_string(),
        source: None,
    }
}

/// A single request captured by [`respond_once`].
#[allow(dead_code)]
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: String,
}

/// Local HTTP endpoint that answers exactly one request.
#[allow(dead_code)]
pub struct OneShotServer {
    pub endpoint: String,
    handle: JoinHandle<CapturedRequest>,
}

#[allow(dead_code)]
impl OneShotServer {
    /// Wait for the request to be served and return what the client sent.
    pub fn captured(self) -> CapturedRequest {
        self.handle.join().expect("server thread panicked")
    }
}

/// Serve one request with the given status line (e.g. `200 OK`) and body.
#[allow(dead_code)]
pub fn respond_once(status: &str, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let endpoint = format!("http://{}", listener.local_addr().expect("local addr"));
    let status = status.to_string();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let captured = read_request(&stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        stream.flush().expect("flush response");
        captured
    });

    OneShotServer { endpoint, handle }
}

/// Accept one connection and never answer within `hold`.
#[allow(dead_code)]
pub fn stall_once(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let endpoint = format!("http://{}", listener.local_addr().expect("local addr"));
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });
    endpoint
}

/// Endpoint on a port with nothing listening.
#[allow(dead_code)]
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
fn read_request(stream: &TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().expect("numeric content-length");
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).expect("read body");

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        body: String::from_utf8(body).expect("utf8 body"),
    }
}
