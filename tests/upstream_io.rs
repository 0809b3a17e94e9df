//! Upstream I/O behavior: streaming, deadlines and malformed inbound requests.

use std::time::{Duration, Instant};

use htm::config::{ProxyConfig, TimeoutConfig};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

mod common;

#[tokio::test]
async fn response_chunks_reach_client_before_upstream_finishes() {
    let (release, gate) = oneshot::channel();
    let backend = common::start_streaming_backend(gate).await;
    let (proxy, shutdown) =
        common::start_proxy(&format!("http://{} stream.example\n", backend)).await;

    let mut res = common::get(proxy, "stream.example", "/").await;
    assert_eq!(res.status(), StatusCode::OK);

    // The backend is still holding the rest of the body.
    let first = tokio::time::timeout(Duration::from_secs(5), res.chunk())
        .await
        .expect("first chunk should not wait for the full body")
        .unwrap()
        .unwrap();
    assert_eq!(&first[..], b"first");

    release.send(()).unwrap();
    let mut rest = Vec::new();
    while let Some(chunk) = res.chunk().await.unwrap() {
        rest.extend_from_slice(&chunk);
    }
    assert_eq!(rest, b"second");

    shutdown.trigger();
}

#[tokio::test]
async fn upstream_timeout_is_bad_gateway() {
    let backend = common::start_silent_backend().await;
    let config = ProxyConfig {
        timeouts: TimeoutConfig {
            connect: Some(Duration::from_secs(1)),
            upstream: Some(Duration::from_millis(200)),
        },
        ..ProxyConfig::default()
    };
    let (proxy, shutdown) =
        common::start_proxy_with(&config, &format!("http://{} slow.example\n", backend)).await;

    let started = Instant::now();
    let res = common::get(proxy, "slow.example", "/").await;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(started.elapsed() < Duration::from_secs(5));

    shutdown.trigger();
}

#[tokio::test]
async fn request_without_host_is_bad_gateway() {
    let backend = common::start_echo_backend("any").await;
    let (proxy, shutdown) = common::start_proxy(&format!("http://{} example.com\n", backend)).await;

    let mut stream = TcpStream::connect(proxy).await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.1\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .unwrap()
        .unwrap();

    let response = String::from_utf8_lossy(&response);
    assert!(response.starts_with("HTTP/1.1 502"), "{}", response);

    shutdown.trigger();
}
