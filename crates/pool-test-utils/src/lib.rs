//! Test helpers shared by the workspace: a one-shot local HTTP server
//! standing in for the backend and the ledger node.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::process::Command;
use std::thread::JoinHandle;

/// Proxy variables that would route `127.0.0.1` through a proxy.
const PROXY_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "ALL_PROXY",
    "http_proxy",
    "https_proxy",
    "all_proxy",
];

/// Serves exactly one request with a canned JSON response.
pub struct HttpStub {
    addr: SocketAddr,
    handle: JoinHandle<String>,
}

impl HttpStub {
    pub fn serve(status_line: &str, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local server");
        let addr = listener.local_addr().expect("read addr");
        let status_line = status_line.to_string();
        let body = body.into();

        let handle = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().expect("accept");
            let request = read_request(&mut socket);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes());
            let _ = socket.shutdown(Shutdown::Both);
            request
        });

        Self { addr, handle }
    }

    /// `http://<addr>` followed by `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait for the request to be served and return it as text.
    pub fn request(self) -> String {
        self.handle.join().expect("stub server panicked")
    }
}

/// Address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local server");
    listener.local_addr().expect("read addr")
}

/// Read one HTTP request (headers plus Content-Length body) and return it as text.
fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).unwrap_or(0);
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(end) = find_header_end(&data) {
            let headers = String::from_utf8_lossy(&data[..end]);
            if data.len() >= end + 4 + content_length(&headers) {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

/// Body of a request returned by [`HttpStub::request`].
pub fn request_body(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0)
}

/// reqwest client that never goes through a proxy.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build http client")
}

/// Strip proxy settings from a child process so it talks to local stubs directly.
pub fn without_proxy(cmd: &mut Command) -> &mut Command {
    for var in PROXY_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_PROXY", "127.0.0.1,localhost")
}
