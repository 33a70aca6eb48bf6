//! # portsweep - A Concurrent TCP Port Scanner
//!
//! portsweep probes a range of TCP ports on a single host to determine
//! which are open, identifies the likely service on each open port, and
//! opportunistically captures a banner from the open connection.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanOptions};
//! use portsweep::types::PortRange;
//!
//! #[tokio::main]
//! async fn main() {
//!     let range = PortRange::new(1, 1024).unwrap();
//!     let outcome = run_scan("192.168.1.1", range, &ScanOptions::default(), |p| {
//!         eprintln!("{}/{}", p.completed, p.total);
//!     })
//!     .await
//!     .unwrap();
//!
//!     for result in outcome.open_ports() {
//!         println!("{}/tcp open {}", result.port, result.service);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Core data model: port ranges, targets, results, progress
//! - [`resolver`] - One hostname lookup per scan; failure aborts the scan
//! - [`scanner`] - The coordinator and the per-port prober
//! - [`services`] - Static well-known port-to-service-name table
//! - [`banner`] - Bounded single-read banner capture
//! - [`error`] - Error taxonomy
//! - [`output`] - Presentation of the finished result set

pub mod banner;
pub mod cli;
pub mod error;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{ProbeError, ScanError};
pub use scanner::{run_scan, ScanOptions};
pub use types::{PortRange, PortResult, ProgressEvent, ScanOutcome, ScanTarget};
