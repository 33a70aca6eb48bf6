//! Opportunistic banner capture from open TCP connections.
//!
//! Performs exactly one bounded read of whatever the service volunteers
//! after the handshake. Nothing is ever written to the socket: many
//! services (SSH, SMTP, FTP) announce themselves unprompted, and the ones
//! that stay silent simply yield no banner.

use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Maximum bytes read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Grab a banner from an already-open TCP stream.
///
/// A read error, timeout, or empty read all yield `None`; the absence of
/// a banner is not a failure.
pub async fn grab_banner(stream: &mut TcpStream, read_timeout: Duration) -> Option<String> {
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(read_timeout, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => {
            let banner = sanitize_banner(&buffer[..n]);
            if banner.is_empty() {
                None
            } else {
                Some(banner)
            }
        }
        _ => None,
    }
}

/// Sanitize raw banner bytes into printable text.
///
/// Line structure is preserved so the presenter can indent each banner
/// line under its port row; control and non-ASCII bytes become `.`, and
/// blank lines are dropped.
fn sanitize_banner(data: &[u8]) -> String {
    let text: String = data
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' || b == b'\n' {
                b as char
            } else if b == b'\r' || b == b'\t' {
                ' '
            } else {
                '.'
            }
        })
        .collect();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
