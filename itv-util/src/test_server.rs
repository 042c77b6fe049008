//! One-shot HTTP server for exercising the REST clients in tests.
//!
//! Answers exactly one request with a canned response, and hands back
//! what the client sent.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// A request as it arrived on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub method: String,
    /// Path plus query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String
}
impl Captured {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }
    pub fn query(&self) -> Option<&str> {
        self.target.splitn(2, '?').nth(1)
    }
    /// Header lookup, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct OneShot {
    /// `http://127.0.0.1:<port>`, no trailing slash.
    pub url: String,
    handle: JoinHandle<Captured>
}
impl OneShot {
    /// Serves one request with `status`, `content_type` and `body`.
    pub fn serve(status: u16, content_type: &'static str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let body = body.to_owned();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            reader.read_line(&mut line).expect("request line");
            let mut parts = line.split_whitespace();
            let method = parts.next().unwrap_or("").to_owned();
            let target = parts.next().unwrap_or("").to_owned();
            let mut headers = vec![];
            loop {
                let mut h = String::new();
                reader.read_line(&mut h).expect("header line");
                let h = h.trim_end();
                if h.is_empty() {
                    break;
                }
                if let Some(idx) = h.find(':') {
                    headers.push((h[..idx].trim().to_owned(), h[idx + 1..].trim().to_owned()));
                }
            }
            let len = headers.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut buf = vec![0; len];
            reader.read_exact(&mut buf).expect("request body");
            let reason = if status < 400 { "OK" } else { "Error" };
            let resp = format!("HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                               status, reason, content_type, body.len(), body);
            let mut stream = reader.into_inner();
            stream.write_all(resp.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
            Captured {
                method, target, headers,
                body: String::from_utf8_lossy(&buf).into_owned()
            }
        });
        OneShot { url, handle }
    }
    /// Waits for the request to have been served, and returns it.
    pub fn request(self) -> Captured {
        self.handle.join().expect("server thread panicked")
    }
}
