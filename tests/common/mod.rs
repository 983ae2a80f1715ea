//! Shared mock upstreams and gateway harness for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use tailspin_gateway::{GatewayConfig, HttpServer, Shutdown};

/// What a mock upstream saw in one request it served.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: Vec<u8>,
}

pub type Captures = Arc<Mutex<Vec<CapturedRequest>>>;

/// Start a gateway with the given upstream origin and pass-through pipeline.
///
/// Binds an ephemeral port; returns the bound address and the shutdown
/// coordinator so tests can stop the server when done.
pub async fn start_gateway(upstream: String, pipeline: Router) -> (SocketAddr, Shutdown) {
    let mut config = GatewayConfig::default();
    config.upstream.url = upstream;
    config.observability.metrics_enabled = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::with_pipeline(config, pipeline);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

/// An origin with nothing listening on it (connection refused).
pub async fn unreachable_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Start a mock upstream that captures every request and replies with a
/// fixed status and body, tagged with an `x-upstream` marker header.
#[allow(dead_code)]
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, Captures) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captures: Captures = Arc::new(Mutex::new(Vec::new()));
    let caps = captures.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let caps = caps.clone();
                    tokio::spawn(async move {
                        let (request_line, request_body) = read_request(&mut socket).await;
                        caps.lock().await.push(CapturedRequest {
                            request_line,
                            body: request_body,
                        });

                        let response = format!(
                            "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\nx-upstream: tailspin\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captures)
}

/// Start a mock upstream that echoes each request body back with 201.
#[allow(dead_code)]
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let (_, request_body) = read_request(&mut socket).await;

                        let header = format!(
                            "HTTP/1.1 201 Created\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                            request_body.len()
                        );
                        let _ = socket.write_all(header.as_bytes()).await;
                        let _ = socket.write_all(&request_body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read one HTTP/1.1 request off the socket: request line plus body.
async fn read_request(socket: &mut TcpStream) -> (String, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break buf.len(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let request_line = head.lines().next().unwrap_or("").to_string();

    let content_length = head
        .lines()
        .find_map(|line| {
            line.to_ascii_lowercase()
                .strip_prefix("content-length:")
                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
        })
        .unwrap_or(0);

    let body_start = (header_end + 4).min(buf.len());
    let mut body = buf[body_start..].to_vec();
    while body.len() < content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => body.extend_from_slice(&chunk[..n]),
        }
    }

    (request_line, body)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}
