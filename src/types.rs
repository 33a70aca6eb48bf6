//! Core type definitions for a single scan.
//!
//! `PortRange` validates port bounds at construction so the rest of the
//! crate never handles an out-of-range or inverted range. None of these
//! types outlive one scan invocation.

use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

/// Error type for port range validation.
#[derive(Debug, Clone, Error)]
pub enum PortRangeError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port range: start ({0}) > end ({1})")]
    Inverted(u16, u16),
}

/// An inclusive range of TCP ports, validated to `1 <= start <= end <= 65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new port range. Inputs are taken as `u32` so callers can
    /// pass raw CLI integers and get a range error instead of a silent wrap.
    pub fn new(start: u32, end: u32) -> Result<Self, PortRangeError> {
        let start = Self::validate(start)?;
        let end = Self::validate(end)?;
        if start > end {
            return Err(PortRangeError::Inverted(start, end));
        }
        Ok(Self { start, end })
    }

    fn validate(port: u32) -> Result<u16, PortRangeError> {
        if port >= Self::MIN as u32 && port <= Self::MAX as u32 {
            Ok(port as u16)
        } else {
            Err(PortRangeError::OutOfRange(port))
        }
    }

    /// First port in the range.
    #[inline]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last port in the range.
    #[inline]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// A valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A scan target whose hostname has been resolved to a concrete address.
///
/// Immutable once constructed; owned by the coordinator for the duration
/// of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
    /// The port range to probe.
    pub range: PortRange,
}

impl ScanTarget {
    pub fn new(original: impl Into<String>, ip: IpAddr, range: PortRange) -> Self {
        Self {
            original: original.into(),
            ip,
            range,
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Result of probing a single port. Produced exactly once per port.
///
/// `service` and `banner` are empty for closed ports; an open port with no
/// table entry carries `service = "Unknown"` and an open port that sent
/// nothing carries an empty `banner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortResult {
    pub port: u16,
    pub service: String,
    pub banner: String,
    pub is_open: bool,
}

impl PortResult {
    /// Result for a port that accepted the connection.
    pub fn open(port: u16, service: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            port,
            service: service.into(),
            banner: banner.into(),
            is_open: true,
        }
    }

    /// Result for a port whose handshake failed or timed out.
    pub fn closed(port: u16) -> Self {
        Self {
            port,
            service: String::new(),
            banner: String::new(),
            is_open: false,
        }
    }
}

/// Complete results of one scan, one entry per port in the range,
/// sorted ascending by port.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub target: ScanTarget,
    pub results: Vec<PortResult>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ScanOutcome {
    /// Number of open ports in the outcome.
    pub fn open_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_open).count()
    }

    /// Iterate over only the open-port results.
    pub fn open_ports(&self) -> impl Iterator<Item = &PortResult> {
        self.results.iter().filter(|r| r.is_open)
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Cumulative progress notification, emitted once per completed probe.
/// Ephemeral: consumed immediately by progress reporting, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Probes completed so far (strictly increasing, ends at `total`).
    pub completed: usize,
    /// Total probes scheduled for this scan.
    pub total: usize,
}
