//! Liveness probe.
//!
//! A plain-text endpoint so the host's monitoring can tell the process is
//! up. Deliberately knows nothing about the game; it answers even while a
//! command handler holds the store gate.

use std::net::{Ipv4Addr, SocketAddr};

use axum::routing::get;
use axum::Router;

async fn running() -> &'static str {
    "running"
}

/// Serve the probe on `0.0.0.0:port` until the process exits.
pub async fn serve(port: u16) -> std::io::Result<()> {
    let app = Router::new()
        .route("/", get(running))
        .route("/healthz", get(running));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "liveness probe listening");

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_answers_running() {
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/", get(running))
            .route("/healthz", get(running));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        tokio::io::AsyncWriteExt::write_all(
            &mut stream,
            b"GET /healthz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await
        .unwrap();

        let mut response = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut stream, &mut response)
            .await
            .unwrap();
        let response = String::from_utf8_lossy(&response);

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("running"));
    }
}
