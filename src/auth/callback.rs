use std::time::Duration;

use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::error::PagebuilderError;

const RECEIVED_PAGE: &str = "<!DOCTYPE html><html><body><h1>Authorization received</h1>\
     <p>You can close this window and return to the terminal.</p></body></html>";

/// Port to listen on when the redirect URI points back at this machine.
/// Only IPv4 loopback hosts qualify, since the listener binds `127.0.0.1`.
pub fn loopback_port(redirect_uri: &str) -> Option<u16> {
    let url = Url::parse(redirect_uri).ok()?;
    match url.host_str()? {
        "localhost" | "127.0.0.1" => url.port_or_known_default(),
        _ => None,
    }
}

/// Accept a single redirect on `127.0.0.1:port` and return its request target
/// (path and query), e.g. `/callback?code=...&state=...`.
pub async fn listen_for_callback(port: u16, timeout: Duration) -> Result<String, PagebuilderError> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    tracing::debug!("Waiting for OAuth callback on port {port}");

    let accept_future = async {
        loop {
            let (mut stream, _) = listener.accept().await?;

            let mut buf = vec![0u8; 8192];
            let n = stream.read(&mut buf).await?;
            let request = String::from_utf8_lossy(&buf[..n]);

            // browsers also ask for /favicon.ico; only a request with a query counts
            let Some(target) = parse_request_target(&request) else {
                let _ = stream
                    .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                    .await;
                continue;
            };

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                RECEIVED_PAGE.len(),
                RECEIVED_PAGE
            );
            stream.write_all(response.as_bytes()).await?;
            stream.shutdown().await?;

            return Ok::<String, PagebuilderError>(target);
        }
    };

    tokio::time::timeout(timeout, accept_future)
        .await
        .map_err(|_| PagebuilderError::CallbackTimeout(timeout.as_secs()))?
}

/// Extract the target from "GET /callback?code=... HTTP/1.1".
fn parse_request_target(request: &str) -> Option<String> {
    let first_line = request.lines().next()?;
    let mut parts = first_line.split_whitespace();
    if parts.next()? != "GET" {
        return None;
    }
    let target = parts.next()?;
    target.contains('?').then(|| target.to_string())
}
