//! Single-port TCP connect prober.
//!
//! Performs one full-handshake connect attempt using the operating
//! system's socket API. Reliable and unprivileged, at the cost of being
//! easy for the remote host to log.

use crate::banner::grab_banner;
use crate::error::ProbeError;
use crate::services;
use crate::types::PortResult;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Probe a single port with bounded connect and banner-read times.
///
/// Never fails: every connect error collapses to a closed result. The
/// socket is owned by this call and dropped on every exit path, so each
/// invocation opens and closes exactly one connection, with no retries.
pub async fn probe(
    ip: IpAddr,
    port: u16,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> PortResult {
    let addr = SocketAddr::new(ip, port);

    match attempt_connect(addr, connect_timeout).await {
        Ok(mut stream) => {
            let service = services::service_description(port);
            let banner = grab_banner(&mut stream, read_timeout)
                .await
                .unwrap_or_default();
            PortResult::open(port, service, banner)
        }
        Err(e) => {
            debug!(%addr, error = %e, "probe failed");
            PortResult::closed(port)
        }
    }
}

/// Attempt a TCP connect bounded by `connect_timeout`.
async fn attempt_connect(addr: SocketAddr, connect_timeout: Duration) -> Result<TcpStream, ProbeError> {
    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(ProbeError::from_io(&e)),
        Err(_) => Err(ProbeError::TimedOut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Instant;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    const FAST: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn test_closed_port_is_blank_and_bounded() {
        // Bind then drop to find a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let start = Instant::now();
        let result = probe(LOCALHOST, port, FAST, FAST).await;

        assert!(!result.is_open);
        assert!(result.service.is_empty());
        assert!(result.banner.is_empty());
        // Refused locally, so well within the connect timeout.
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_open_port_gets_service_and_banner() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"hello from test\r\n").await.unwrap();
        });

        let result = probe(LOCALHOST, port, FAST, FAST).await;

        assert!(result.is_open);
        // An ephemeral port is not in the well-known table.
        assert_eq!(result.service, "Unknown");
        assert_eq!(result.banner, "hello from test");
    }

    #[tokio::test]
    async fn test_open_silent_port_has_empty_banner() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let result = probe(LOCALHOST, port, FAST, Duration::from_millis(100)).await;

        assert!(result.is_open);
        assert!(result.banner.is_empty());
    }
}
