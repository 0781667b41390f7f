//! HTTP surface: `POST /parse_dates` and `GET /health`.
//!
//! The router is built once around a shared, immutable [`DateExtractor`];
//! requests never touch each other's state.

mod access_log;
mod error;
mod handlers;
mod router;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use datefr_core::DateExtractor;
use tokio::net::TcpListener;

pub use router::api_router;

pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, extractor: Arc<DateExtractor>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("reading bound address")?;
    tracing::info!(%addr, "datefr listening");

    axum::serve(listener, api_router(extractor))
        .with_graceful_shutdown(shutdown)
        .await
        .context("serving HTTP")?;

    tracing::info!("datefr stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use datefr_core::Config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn serves_health_over_tcp_and_stops_on_signal() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let extractor = Arc::new(DateExtractor::with_config(Config::default()));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, extractor, async move {
            let _ = shutdown_rx.await;
        }));

        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"), "got {response}");
        assert!(response.ends_with(r#"{"status":"healthy"}"#), "got {response}");

        shutdown_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn bind_reports_bad_address() {
        let err = bind("not-an-address").await.unwrap_err();
        assert!(err.to_string().contains("binding not-an-address"));
    }
}
