//! Integration tests for the probe pipeline.
//!
//! These use a mock HTTP server (`httptest`) or a raw tokio listener instead
//! of real mirrors, so they are fast and make no external network requests.
//! Host, port, and file sets are injected through `Config`, which is exactly
//! how the library is meant to be driven in tests.

use httptest::{matchers::*, responders::*, Expectation, Server};

use mirror_probe::{run_probe, Config};

/// Config pointing at a local test server.
fn config_for(addr: std::net::SocketAddr, files: &[&str], requests: usize) -> Config {
    Config {
        hosts: vec![addr.ip().to_string()],
        files: files.iter().map(ToString::to_string).collect(),
        port: addr.port(),
        prefix: "repo".to_string(),
        requests,
        concurrency: 3,
        timeout_seconds: 5,
        seed: Some(42),
        ..Config::default()
    }
}

/// A fresh cache answers 304 for everything; nothing should be reported.
#[tokio::test]
async fn test_not_modified_responses_are_suppressed() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method("HEAD"))
            .times(20)
            .respond_with(status_code(304)),
    );

    let config = config_for(server.addr(), &["core/os/x86_64/core.db"], 20);
    let report = run_probe(config).await.expect("run should complete");

    assert_eq!(report.dispatched, 20);
    assert_eq!(report.suppressed, 20);
    assert_eq!(report.reported, 0);
}

/// Every dispatched request must carry the conditional freshness header.
/// The expectation only matches HEAD requests that have If-Modified-Since;
/// anything else would be answered 500 by the mock server and surface in
/// `reported`.
#[tokio::test]
async fn test_requests_are_conditional_head() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method("HEAD"),
            request::headers(contains(key("if-modified-since")))
        ])
        .times(10)
        .respond_with(status_code(304)),
    );

    let config = config_for(server.addr(), &["extra/os/x86_64/extra.db"], 10);
    let report = run_probe(config).await.expect("run should complete");

    assert_eq!(report.suppressed, 10);
    assert_eq!(report.reported, 0);
}

/// A 200 is an anomaly for this client (the cache should have said 304),
/// so it counts as reported, not suppressed.
#[tokio::test]
async fn test_success_status_is_reported() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method("HEAD"))
            .times(15)
            .respond_with(status_code(200)),
    );

    let config = config_for(server.addr(), &["core/os/x86_64/core.db"], 15);
    let report = run_probe(config).await.expect("run should complete");

    assert_eq!(report.dispatched, 15);
    assert_eq!(report.suppressed, 0);
    assert_eq!(report.reported, 15);
}

/// Redirects are not followed; a 307 is suppressed as benign while a 301
/// would be reported. Here the mock answers 307 with a Location header the
/// client must ignore (following it would hit an unmatched path and fail the
/// server's expectations).
#[tokio::test]
async fn test_temporary_redirect_is_suppressed_not_followed() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method("HEAD"))
            .times(8)
            .respond_with(status_code(307).append_header("Location", "/elsewhere")),
    );

    let config = config_for(server.addr(), &["testing/os/x86_64/testing.db"], 8);
    let report = run_probe(config).await.expect("run should complete");

    assert_eq!(report.suppressed, 8);
    assert_eq!(report.reported, 0);
}

/// Mixed outcomes: one sampled file is fresh, the other is missing. Every
/// request still reaches exactly one terminal state.
#[tokio::test]
async fn test_mixed_outcomes_account_for_every_request() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/repo/fresh.db"))
            .times(0..)
            .respond_with(status_code(304)),
    );
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/repo/missing.db"))
            .times(0..)
            .respond_with(status_code(404)),
    );

    let config = config_for(server.addr(), &["fresh.db", "missing.db"], 50);
    let report = run_probe(config).await.expect("run should complete");

    assert_eq!(report.dispatched, 50);
    assert_eq!(report.suppressed + report.reported, 50);
    // With a seeded sampler over two files, both sides must be non-empty.
    assert!(report.suppressed > 0);
    assert!(report.reported > 0);
}

/// The original stress shape: 100 requests, 3 in flight, one host, six
/// files. Exactly 100 requests dispatch and at most 100 lines can be
/// reported.
#[tokio::test]
async fn test_run_dispatches_exact_request_count() {
    let files = [
        "extra/os/x86_64/extra.db",
        "core/os/x86_64/core.db",
        "testing/os/x86_64/testing.db",
        "core/os/x86_64/linux-3.19-1-x86_64.pkg.tar.xz",
        "community/os/x86_64/atop-2.0.2-2-x86_64.pkg.tar.xz",
        "extra/os/x86_64/foo-bar.pkg.tar.xz",
    ];
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method("HEAD"))
            .times(100)
            .respond_with(status_code(404)),
    );

    let config = config_for(server.addr(), &files, 100);
    let report = run_probe(config).await.expect("run should complete");

    assert_eq!(report.dispatched, 100);
    assert_eq!(report.reported, 100); // every 404 is reportable, at most one line each
}

/// Transport failures (connection refused) are outcomes, not run aborts.
#[tokio::test]
async fn test_connection_refused_is_reported_not_fatal() {
    // Bind a port, then free it so connections are refused.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr")
    };

    let config = config_for(addr, &["core/os/x86_64/core.db"], 10);
    let report = run_probe(config).await.expect("run must not abort");

    assert_eq!(report.dispatched, 10);
    assert_eq!(report.reported, 10);
    assert_eq!(report.suppressed, 0);
}

/// An empty file set is a configuration error, caught before any dispatch.
#[tokio::test]
async fn test_empty_file_set_fails_up_front() {
    let config = Config {
        files: vec![],
        ..Config::default()
    };
    let result = run_probe(config).await;
    assert!(result.is_err());
}

mod concurrency {
    //! The concurrency-budget property needs a server that can observe how
    //! many requests are in flight at once, which httptest does not expose;
    //! a raw tokio listener counts them instead.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::config_for;
    use mirror_probe::run_probe;

    fn request_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
    }

    async fn serve_counting(
        listener: TcpListener,
        active: Arc<AtomicUsize>,
        max_seen: Arc<AtomicUsize>,
    ) {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut pending: Vec<u8> = Vec::new();
                loop {
                    let n = match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    pending.extend_from_slice(&buf[..n]);
                    // HEAD requests have no body; one blank line ends each.
                    while let Some(end) = request_end(&pending) {
                        pending.drain(..end);
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        active.fetch_sub(1, Ordering::SeqCst);
                        let response = b"HTTP/1.1 304 Not Modified\r\ncontent-length: 0\r\n\r\n";
                        if socket.write_all(response).await.is_err() {
                            return;
                        }
                    }
                }
            });
        }
    }

    /// At no instant may more than `concurrency` requests be executing. The
    /// server delays every response, so an unbounded dispatcher would pile
    /// up far more than three.
    #[tokio::test]
    async fn test_in_flight_requests_never_exceed_budget() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let server = tokio::spawn(serve_counting(
            listener,
            Arc::clone(&active),
            Arc::clone(&max_seen),
        ));

        let config = config_for(addr, &["a.db", "b.db"], 30);
        let report = run_probe(config).await.expect("run should complete");
        server.abort();

        assert_eq!(report.dispatched, 30);
        assert_eq!(report.suppressed, 30);
        let peak = max_seen.load(Ordering::SeqCst);
        assert!(peak >= 1, "server saw no requests");
        assert!(
            peak <= 3,
            "concurrency budget exceeded: {peak} requests in flight"
        );
    }
}

mod timeouts {
    use std::time::Duration;

    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    use super::config_for;
    use mirror_probe::run_probe;

    /// A server that accepts and reads but never answers forces the
    /// transport timeout deterministically.
    #[tokio::test]
    async fn test_unresponsive_server_yields_timeout_outcomes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                held.push(tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    while matches!(socket.read(&mut buf).await, Ok(n) if n > 0) {}
                    // Keep the socket open without ever responding.
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }));
            }
        });

        let mut config = config_for(addr, &["core/os/x86_64/core.db"], 3);
        config.timeout_seconds = 1;
        let report = run_probe(config).await.expect("run must not abort");
        server.abort();

        assert_eq!(report.dispatched, 3);
        assert_eq!(report.reported, 3);
        assert_eq!(report.suppressed, 0);
    }
}
