//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses per path and records every request it sees, so
//! tests can assert on request counts and headers.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    /// Sleep this long before answering.
    pub delay: Option<Duration>,
}

impl Route {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            content_type: "application/javascript",
            delay: None,
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            content_type: "text/html; charset=utf-8",
            ..Self::ok(body)
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::ok("")
        }
    }

    pub fn slow(body: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok(body)
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub user_agent: Option<String>,
}

pub struct ScriptServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptServer {
    /// Start serving `routes` on a random local port. Unknown paths get 404.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded));
            }
        });

        Self {
            base: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, recorded: &Mutex<Vec<RecordedRequest>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&raw);

    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let user_agent = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("user-agent")
            .then(|| value.trim().to_string())
    });

    recorded.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        user_agent,
    });

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));
    if let Some(delay) = route.delay {
        thread::sleep(delay);
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        reason(route.status),
        route.content_type,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
