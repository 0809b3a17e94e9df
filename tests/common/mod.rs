//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use htm::config::{parse_routes, ProxyConfig};
use htm::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// What a mock backend saw, echoed back as `key=value` lines.
#[derive(Debug, Default)]
pub struct Echo {
    pub backend: String,
    pub method: String,
    pub target: String,
    pub host: String,
    pub forwarded_for: String,
    pub body: String,
}

impl Echo {
    pub fn parse(text: &str) -> Self {
        let mut echo = Echo::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else { continue };
            let value = value.to_string();
            match key {
                "backend" => echo.backend = value,
                "method" => echo.method = value,
                "target" => echo.target = value,
                "host" => echo.host = value,
                "x-forwarded-for" => echo.forwarded_for = value,
                "body" => echo.body = value,
                _ => {}
            }
        }
        echo
    }
}

/// Start an echo backend on an ephemeral port and return its address.
pub async fn start_echo_backend(name: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(handle_echo(socket, name));
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn handle_echo(mut socket: TcpStream, name: &'static str) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split(' ');
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut host = String::new();
    let mut forwarded_for = String::from("-");
    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else { continue };
        let value = value.trim();
        match name.to_ascii_lowercase().as_str() {
            "host" => host = value.to_string(),
            "x-forwarded-for" => forwarded_for = value.to_string(),
            "content-length" => content_length = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => body.extend_from_slice(&chunk[..n]),
        }
    }

    let payload = format!(
        "backend={}\nmethod={}\ntarget={}\nhost={}\nx-forwarded-for={}\nbody={}\n",
        name,
        method,
        target,
        host,
        forwarded_for,
        String::from_utf8_lossy(&body)
    );
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nX-Backend: {}\r\nKeep-Alive: timeout=5\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        name,
        payload
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read until the end of the request head.
async fn read_head(socket: &mut TcpStream) -> bool {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while find(&buf, b"\r\n\r\n").is_none() {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return false,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    true
}

/// A backend that sends one chunk, then holds the response open until
/// `release` fires before sending the rest.
pub async fn start_streaming_backend(release: oneshot::Receiver<()>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else { return };
        if !read_head(&mut socket).await {
            return;
        }
        let head = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(b"5\r\nfirst\r\n").await;
        let _ = socket.flush().await;

        let _ = release.await;
        let _ = socket.write_all(b"6\r\nsecond\r\n0\r\n\r\n").await;
        let _ = socket.shutdown().await;
    });

    addr
}

/// A backend that accepts and reads requests but never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_head(&mut socket).await;
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(socket);
            });
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the proxy with an in-memory route file on an ephemeral port.
pub async fn start_proxy(routes: &str) -> (SocketAddr, Shutdown) {
    start_proxy_with(&ProxyConfig::default(), routes).await
}

/// Start the proxy with explicit process settings.
pub async fn start_proxy_with(config: &ProxyConfig, routes: &str) -> (SocketAddr, Shutdown) {
    let table = parse_routes(routes.as_bytes()).unwrap().table;
    let server = HttpServer::new(config, Arc::new(table)).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// Send a GET through the proxy for virtual host `host`.
pub async fn get(proxy: SocketAddr, host: &str, path: &str) -> reqwest::Response {
    client()
        .get(format!("http://{}{}", proxy, path))
        .header("Host", host)
        .send()
        .await
        .expect("Proxy unreachable")
}

/// A unique path under the system temp dir.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("htm-{}-{}.conf", std::process::id(), name))
}
