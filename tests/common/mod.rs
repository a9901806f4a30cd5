//! Shared utilities for integration tests.

use std::net::SocketAddr;

use mvc_dispatch::config::AppConfig;
use mvc_dispatch::{app, Dispatcher, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Start the server with `config` on an ephemeral port.
///
/// Keep the returned `Shutdown` alive for the duration of the test.
pub async fn spawn_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let dispatcher = Dispatcher::from_config(&config.routes, app::registry());
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
