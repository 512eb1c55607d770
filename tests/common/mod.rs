//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use staticsrv::config::{ConfigVariables, StaticConfig};
use staticsrv::{Shutdown, StaticServer};
use tokio::net::TcpListener;

/// A running server bound to ephemeral ports.
pub struct TestServer {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub metrics_addr: Option<SocketAddr>,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub handle: tokio::task::JoinHandle<Result<(), staticsrv::ServerError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn metrics_url(&self, path: &str) -> String {
        format!("http://{}{}", self.metrics_addr.expect("metrics disabled"), path)
    }
}

/// Write a small single page application into `dir`.
pub fn write_site(dir: &Path, with_index: bool) {
    if with_index {
        std::fs::write(dir.join("index.html"), "<html><body>app</body></html>").unwrap();
    }
    std::fs::create_dir_all(dir.join("static")).unwrap();
    std::fs::write(dir.join("static/app.css"), "body { margin: 0 }").unwrap();
}

/// Config serving `dir` with everything else at its defaults.
pub fn config_for(dir: &Path) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.content.dir = dir.to_path_buf();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.observability.metrics_address = "127.0.0.1:0".into();
    config
}

/// Start a server on ephemeral ports.
pub async fn start_server(config: StaticConfig, variables: ConfigVariables) -> TestServer {
    let metrics_enabled = config.observability.metrics_enabled;
    let server = StaticServer::with_variables(config, variables).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (metrics_listener, metrics_addr) = if metrics_enabled {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (Some(listener), Some(addr))
    } else {
        (None, None)
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move {
        server.run(listener, metrics_listener, server_shutdown).await
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        metrics_addr,
        shutdown,
        handle,
    }
}

/// Client without connection pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
