//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::error::ScanResult;
use crate::scanner::ScanOptions;
use crate::types::PortRange;
use clap::Parser;
use std::time::Duration;

/// A concurrent TCP connect scanner with banner grabbing.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a TCP port range on a host", long_about = None)]
pub struct Args {
    /// Target IP address or hostname to scan
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// First port of the range to scan
    #[arg(value_name = "START")]
    pub start: u32,

    /// Last port of the range to scan
    #[arg(value_name = "END")]
    pub end: u32,

    /// Show closed/filtered ports in addition to open ones
    #[arg(long)]
    pub all: bool,

    /// Connection timeout in milliseconds
    #[arg(short = 't', long, default_value = "1000", value_name = "MS")]
    pub timeout: u64,

    /// Banner read timeout in milliseconds
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub read_timeout: u64,

    /// Maximum number of concurrent probes
    #[arg(short = 'c', long, default_value = "100")]
    pub concurrency: usize,

    /// Emit the full result set as JSON instead of the table
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate the positional port bounds into a `PortRange`.
    pub fn port_range(&self) -> ScanResult<PortRange> {
        Ok(PortRange::new(self.start, self.end)?)
    }

    /// Build scan options from the flags.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            connect_timeout: Duration::from_millis(self.timeout),
            read_timeout: Duration::from_millis(self.read_timeout),
            concurrency: self.concurrency.max(1),
        }
    }
}
