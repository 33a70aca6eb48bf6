//! Scan coordination: bounded-concurrency fan-out over a port range.
//!
//! The coordinator resolves the target once, schedules one probe per port
//! under a semaphore-enforced concurrency ceiling, reports progress as
//! completions arrive, and returns the full result set sorted by port.

pub mod probe;

use crate::error::ScanResult;
use crate::resolver;
use crate::types::{PortRange, ProgressEvent, ScanOutcome, ScanTarget};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

pub use probe::probe;

/// Tuning knobs for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Per-port TCP connect deadline.
    pub connect_timeout: Duration,
    /// Per-port banner read deadline.
    pub read_timeout: Duration,
    /// Maximum probes in flight at once. An unbounded fan-out against one
    /// host exhausts file descriptors and ephemeral ports, so this ceiling
    /// is always enforced.
    pub concurrency: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(1),
            concurrency: 100,
        }
    }
}

/// Execute a complete scan of `range` against `host`.
///
/// Resolution failure is fatal and returns before any probe is attempted.
/// Individual probe failures are absorbed into closed results and never
/// abort the scan.
///
/// `on_progress` is invoked once per completed probe with a cumulative
/// count. Probes finish in arbitrary order, but completions are collected
/// on this task, so the counts are strictly increasing and the final event
/// always carries `completed == total`.
pub async fn run_scan<F>(
    host: &str,
    range: PortRange,
    options: &ScanOptions,
    mut on_progress: F,
) -> ScanResult<ScanOutcome>
where
    F: FnMut(ProgressEvent),
{
    let ip = resolver::resolve(host).await?;
    let target = ScanTarget::new(host, ip, range);
    let total = range.len();
    let start_time = Instant::now();

    info!(host = %target, ports = total, concurrency = options.concurrency, "starting scan");

    let semaphore = Arc::new(Semaphore::new(options.concurrency));
    let connect_timeout = options.connect_timeout;
    let read_timeout = options.read_timeout;

    let mut completions = stream::iter(range.iter())
        .map(|port| {
            let sem = Arc::clone(&semaphore);
            async move {
                // Semaphore bounds the number of live sockets; the stream
                // buffer above it only holds pending futures.
                let _permit = sem.acquire().await.unwrap();
                probe(ip, port, connect_timeout, read_timeout).await
            }
        })
        .buffer_unordered(1000);

    let mut results = Vec::with_capacity(total);
    while let Some(result) = completions.next().await {
        results.push(result);
        on_progress(ProgressEvent {
            completed: results.len(),
            total,
        });
    }

    // Completion order is arbitrary; the outcome contract is port order.
    results.sort_by_key(|r| r.port);

    let duration = start_time.elapsed();
    let outcome = ScanOutcome {
        target,
        results,
        duration,
    };

    info!(
        open = outcome.open_count(),
        scanned = total,
        elapsed_ms = duration.as_millis() as u64,
        "scan complete"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    fn fast_options() -> ScanOptions {
        ScanOptions {
            connect_timeout: Duration::from_millis(500),
            read_timeout: Duration::from_millis(100),
            concurrency: 50,
        }
    }

    #[tokio::test]
    async fn test_outcome_is_complete_and_sorted() {
        // Anchor the range on a real listener so at least one port is open
        // and neighbouring ephemeral ports exercise the closed path.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let _ = listener.accept().await;
            }
        });

        let range = PortRange::new(open_port as u32 - 3, open_port as u32 + 3).unwrap();
        let outcome = run_scan("127.0.0.1", range, &fast_options(), |_| {})
            .await
            .unwrap();

        // One entry per port, no duplicates, no gaps, ascending.
        assert_eq!(outcome.results.len(), range.len());
        let ports: Vec<u16> = outcome.results.iter().map(|r| r.port).collect();
        let expected: Vec<u16> = range.iter().collect();
        assert_eq!(ports, expected);

        let listener_entry = outcome
            .results
            .iter()
            .find(|r| r.port == open_port)
            .unwrap();
        assert!(listener_entry.is_open);
    }

    #[tokio::test]
    async fn test_single_listener_yields_exactly_one_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                if let Ok((mut socket, _)) = listener.accept().await {
                    let _ = socket.write_all(b"220 sweep test ready\r\n").await;
                }
            }
        });

        let range = PortRange::new(open_port as u32 - 2, open_port as u32 + 2).unwrap();
        let outcome = run_scan("127.0.0.1", range, &fast_options(), |_| {})
            .await
            .unwrap();

        assert_eq!(outcome.open_count(), 1);
        let open = outcome.open_ports().next().unwrap();
        assert_eq!(open.port, open_port);
        assert_eq!(open.banner, "220 sweep test ready");
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_exhaustive() {
        let range = PortRange::new(47100, 47131).unwrap();
        let mut events = Vec::new();

        let outcome = run_scan("127.0.0.1", range, &fast_options(), |event| {
            assert_eq!(event.total, range.len());
            events.push(event.completed);
        })
        .await
        .unwrap();

        // One event per probe, counts 1..=total with nothing lost or doubled.
        let expected: Vec<usize> = (1..=range.len()).collect();
        assert_eq!(events, expected);
        assert_eq!(outcome.results.len(), range.len());
    }

    #[tokio::test]
    async fn test_resolution_failure_aborts_before_probing() {
        let probes = AtomicUsize::new(0);
        let range = PortRange::new(1, 16).unwrap();

        let err = run_scan(
            "this-host-does-not-exist.invalid",
            range,
            &fast_options(),
            |_| {
                probes.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ScanError::Resolution { .. }));
        assert_eq!(probes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrency_ceiling_is_respected() {
        // A tiny semaphore with a wide range still completes; the ceiling
        // throttles scheduling rather than dropping probes.
        let options = ScanOptions {
            concurrency: 4,
            ..fast_options()
        };
        let range = PortRange::new(47200, 47215).unwrap();

        let outcome = run_scan("127.0.0.1", range, &options, |_| {}).await.unwrap();
        assert_eq!(outcome.results.len(), 16);
    }
}
