//! End-to-end tests against a server bound to an ephemeral local port

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::header::{
    HeaderMap, ACCEPT_RANGES, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, HOST,
    RANGE,
};
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use range_serve::config::{AppState, Config};
use range_serve::server;

struct TestServer {
    addr: SocketAddr,
    root: TempDir,
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }
}

async fn start_server() -> TestServer {
    let root = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.server.root = root.path().to_path_buf();
    config.logging.access_log = false;

    let listener = server::bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(config));
    tokio::spawn(server::run(listener, state, std::future::pending()));

    TestServer { addr, root }
}

async fn send(
    server: &TestServer,
    method: &str,
    path: &str,
    range: Option<&str>,
) -> TestResponse {
    let stream = TcpStream::connect(server.addr).await.unwrap();
    let (mut sender, conn) = http1::handshake(TokioIo::new(stream)).await.unwrap();
    tokio::spawn(conn);

    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(HOST, "localhost");
    if let Some(range) = range {
        builder = builder.header(RANGE, range);
    }
    let request = builder.body(Empty::<Bytes>::new()).unwrap();

    let response = sender.send_request(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let body = body.collect().await.unwrap().to_bytes();

    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body,
    }
}

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| u8::try_from(i % 251).unwrap()).collect()
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let server = start_server().await;
    let response = send(&server, "GET", "/missing.txt", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "File not found");
}

#[tokio::test]
async fn test_directory_listing() {
    let server = start_server().await;
    let dir = server.root.path().join("dir");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("a.txt"), b"a").unwrap();
    std::fs::write(dir.join("b.txt"), b"b").unwrap();

    let response = send(&server, "GET", "/dir/", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let text = response.text();
    let mut names: Vec<&str> = text.split('\n').collect();
    names.sort_unstable();
    assert_eq!(names, ["a.txt", "b.txt"]);
}

#[tokio::test]
async fn test_whole_file() {
    let server = start_server().await;
    let content = sample(1000);
    std::fs::write(server.root.path().join("video.mp4"), &content).unwrap();

    let response = send(&server, "GET", "/video.mp4", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[CONTENT_TYPE], "video/mp4");
    assert_eq!(response.headers[CONTENT_LENGTH], "1000");
    assert_eq!(response.headers[ACCEPT_RANGES], "bytes");
    assert_eq!(response.body.as_ref(), content.as_slice());
}

#[tokio::test]
async fn test_partial_content() {
    let server = start_server().await;
    let content = sample(1000);
    std::fs::write(server.root.path().join("video.mp4"), &content).unwrap();

    let response = send(&server, "GET", "/video.mp4", Some("bytes=0-99")).await;
    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers[CONTENT_RANGE], "bytes 0-99/1000");
    assert_eq!(response.headers[CONTENT_LENGTH], "100");
    assert_eq!(response.headers[CACHE_CONTROL], "no-cache");
    assert_eq!(response.body.as_ref(), &content[..100]);
}

#[tokio::test]
async fn test_suffix_range() {
    let server = start_server().await;
    let content = sample(1000);
    std::fs::write(server.root.path().join("video.mp4"), &content).unwrap();

    let response = send(&server, "GET", "/video.mp4", Some("bytes=-10")).await;
    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers[CONTENT_RANGE], "bytes 990-999/1000");
    assert_eq!(response.body.as_ref(), &content[990..]);
}

#[tokio::test]
async fn test_unsatisfiable_range() {
    let server = start_server().await;
    std::fs::write(server.root.path().join("video.mp4"), sample(1000)).unwrap();

    let response = send(&server, "GET", "/video.mp4", Some("bytes=2000-3000")).await;
    assert_eq!(response.status, StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(response.headers[CONTENT_RANGE], "bytes */1000");
    assert_eq!(response.text(), "Requested range not satisfiable");
}

#[tokio::test]
async fn test_single_byte_range_delivers_the_byte() {
    let server = start_server().await;
    std::fs::write(server.root.path().join("file.txt"), sample(50)).unwrap();

    let response = send(&server, "GET", "/file.txt", Some("bytes=10-10")).await;
    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers[CONTENT_RANGE], "bytes 10-10/50");
    assert_eq!(response.headers[CONTENT_LENGTH], "1");
    assert_eq!(response.body.as_ref(), &[10u8]);
}

#[tokio::test]
async fn test_post_is_405() {
    let server = start_server().await;
    let response = send(&server, "POST", "/anything", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text(), "Method POST not allowed.");
}

#[tokio::test]
async fn test_server_survives_failed_requests() {
    let server = start_server().await;
    std::fs::write(server.root.path().join("ok.txt"), b"still here").unwrap();

    send(&server, "DELETE", "/ok.txt", None).await;
    send(&server, "GET", "/nope", None).await;
    send(&server, "GET", "/ok.txt", Some("bytes=500-")).await;

    let response = send(&server, "GET", "/ok.txt", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "still here");
}

#[tokio::test]
async fn test_shutdown_closes_idle_keep_alive_connections() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("ok.txt"), b"ok").unwrap();

    let mut config = Config::default();
    config.server.root = root.path().to_path_buf();
    config.logging.access_log = false;
    config.performance.shutdown_timeout = 30;

    let listener = server::bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let running = tokio::spawn(server::run(
        listener,
        Arc::new(AppState::new(config)),
        async move {
            let _ = stop_rx.await;
        },
    ));

    // One request, then leave the connection open and idle
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = http1::handshake(TokioIo::new(stream)).await.unwrap();
    tokio::spawn(conn);
    let request = Request::builder()
        .uri("/ok.txt")
        .header(HOST, "localhost")
        .body(Empty::<Bytes>::new())
        .unwrap();
    let response = sender.send_request(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.into_body().collect().await.unwrap();

    stop_tx.send(()).unwrap();
    let stopped = tokio::time::timeout(Duration::from_secs(5), running).await;
    assert!(stopped.is_ok(), "idle connection held up shutdown");
    stopped.unwrap().unwrap().unwrap();

    // The client side was still holding the connection open throughout
    drop(sender);
}
