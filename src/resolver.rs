//! Hostname resolution.
//!
//! One lookup per scan. A failure here is fatal: the coordinator aborts
//! before any probe is attempted.

use crate::error::{ScanError, ScanResult};
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolve a hostname or IP literal to a concrete address.
///
/// IP literals short-circuit without touching DNS. Hostnames resolving to
/// multiple addresses yield the first returned address.
pub async fn resolve(host: &str) -> ScanResult<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    // Prefer the system resolver config (resolv.conf + hosts file) so names
    // like "localhost" behave as the OS would resolve them.
    let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    });

    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| ScanError::Resolution {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    let ip = response
        .iter()
        .next()
        .ok_or_else(|| ScanError::NoAddresses(host.to_string()))?;

    debug!(host, %ip, "resolved target");
    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn test_ip_literal_fast_path() {
        let ip = resolve("127.0.0.1").await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));

        let ip6 = resolve("::1").await.unwrap();
        assert!(ip6.is_ipv6());
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_fatal() {
        // .invalid is reserved and never resolves (RFC 2606).
        let err = resolve("this-host-does-not-exist.invalid").await.unwrap_err();
        assert!(matches!(err, ScanError::Resolution { .. }));
    }
}
