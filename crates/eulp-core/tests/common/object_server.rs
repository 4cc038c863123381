//! Minimal HTTP/1.1 server that plays an object store for integration tests.
//!
//! Serves a fixed path → (status, body) table. Unknown paths get 404. Every
//! GET path is recorded so tests can assert how many requests were made and
//! in which order.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Object {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Object {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"<Error><Code>NoSuchKey</Code></Error>".to_vec(),
        }
    }
}

pub struct ObjectServer {
    /// Base URL ending in `/`, e.g. `http://127.0.0.1:12345/`.
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ObjectServer {
    /// Paths recorded so far, without the leading `/`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(objects: Vec<(&str, Object)>) -> ObjectServer {
    let table: HashMap<String, Object> = objects
        .into_iter()
        .map(|(path, obj)| (path.to_string(), obj))
        .collect();
    let table = Arc::new(table);
    let requests = Arc::new(Mutex::new(Vec::new()));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let table = Arc::clone(&table);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &table, &log));
        }
    });
    ObjectServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    table: &HashMap<String, Object>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    // Keep-alive: libcurl may reuse the connection for the next object.
    loop {
        let mut buf = [0u8; 8192];
        let n = match stream.read(&mut buf) {
            Ok(0) => return,
            Ok(n) => n,
            Err(_) => return,
        };
        let request = match std::str::from_utf8(&buf[..n]) {
            Ok(s) => s,
            Err(_) => return,
        };
        let mut parts = request.lines().next().unwrap_or("").split_whitespace();
        let method = parts.next().unwrap_or("");
        let path = parts.next().unwrap_or("/").trim_start_matches('/').to_string();
        if !method.eq_ignore_ascii_case("GET") {
            let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
            return;
        }
        log.lock().unwrap().push(path.clone());

        let obj = table.get(&path).cloned().unwrap_or_else(|| Object::status(404));
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n\r\n",
            obj.status,
            reason(obj.status),
            obj.body.len()
        );
        if stream.write_all(response.as_bytes()).is_err() || stream.write_all(&obj.body).is_err() {
            return;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
