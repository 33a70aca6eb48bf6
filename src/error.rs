//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Only `ScanError`
//! crosses the coordinator boundary; `ProbeError` classifies individual
//! connect failures internally and is always absorbed into a closed
//! `PortResult` before a probe returns.

use thiserror::Error;

/// Fatal errors for a scan as a whole.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The target hostname could not be translated to an address.
    /// Aborts the scan before any probe is attempted.
    #[error("could not resolve host '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error("hostname resolved to no addresses: {0}")]
    NoAddresses(String),

    #[error(transparent)]
    InvalidPortRange(#[from] crate::types::PortRangeError),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Classification of a single failed connect attempt.
///
/// Scanning a range routinely produces thousands of these; they are
/// expected outcomes, logged at debug level and never surfaced as errors.
/// The public `PortResult` collapses all of them to `is_open = false`.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection refused")]
    Refused,

    #[error("connect timed out")]
    TimedOut,

    #[error("host or network unreachable: {0}")]
    Unreachable(String),

    #[error("connect failed: {0}")]
    Other(String),
}

impl ProbeError {
    /// Classify a connect-time IO error.
    pub fn from_io(err: &std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::ConnectionRefused => Self::Refused,
            ErrorKind::TimedOut => Self::TimedOut,
            _ => {
                // Unreachable networks surface as raw os errors on most
                // platforms, so fall back to matching the message.
                let msg = err.to_string();
                if msg.to_lowercase().contains("unreachable") {
                    Self::Unreachable(msg)
                } else {
                    Self::Other(msg)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_probe_error_classification() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(ProbeError::from_io(&refused), ProbeError::Refused));

        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert!(matches!(
            ProbeError::from_io(&timed_out),
            ProbeError::TimedOut
        ));

        let unreachable = io::Error::other("network unreachable");
        assert!(matches!(
            ProbeError::from_io(&unreachable),
            ProbeError::Unreachable(_)
        ));
    }
}
