//! Result presentation.
//!
//! Everything here consumes the finished, sorted `ScanOutcome`; the core
//! scan emits plain structured data and knows nothing about styling.

use crate::types::{ScanOutcome, ProgressEvent};
use console::{style, Style};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// Render the final results table into `out`.
///
/// Open rows are green, closed rows yellow; banner lines are indented
/// under their owning open row. Closed/filtered ports appear only when
/// `show_all` is set.
pub fn print_table(out: &mut impl Write, outcome: &ScanOutcome, show_all: bool) -> io::Result<()> {
    let open_style = Style::new().green().bold();
    let closed_style = Style::new().yellow();
    let banner_style = Style::new().dim();

    writeln!(out)?;
    writeln!(
        out,
        "Scan of {} complete: {} open of {} scanned in {:.2}s",
        style(&outcome.target).bold(),
        style(outcome.open_count()).green().bold(),
        outcome.results.len(),
        outcome.duration.as_millis() as f64 / 1000.0
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "{:<8} {:<16} {:<15}",
        style("Port").bold(),
        style("Service").bold(),
        style("Status").bold()
    )?;
    writeln!(out, "{}", style("-".repeat(45)).dim())?;

    let mut rows = 0usize;
    for result in &outcome.results {
        if result.is_open {
            writeln!(
                out,
                "{}",
                open_style.apply_to(format!(
                    "{:<8} {:<16} {:<15}",
                    result.port, result.service, "Open"
                ))
            )?;
            for line in result.banner.lines() {
                writeln!(out, "        {}", banner_style.apply_to(line))?;
            }
            rows += 1;
        } else if show_all {
            writeln!(
                out,
                "{}",
                closed_style.apply_to(format!(
                    "{:<8} {:<16} {:<15}",
                    result.port, "", "Closed/Filtered"
                ))
            )?;
            rows += 1;
        }
    }

    if rows == 0 {
        writeln!(out, "{}", style("No open ports found.").dim())?;
    }
    writeln!(out)?;

    Ok(())
}

/// Print the full sorted outcome as JSON (all ports, open or not).
pub fn print_json(outcome: &ScanOutcome) -> io::Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{}", json);
    Ok(())
}

/// Print a header line before scanning begins.
pub fn print_scan_header(target: &str, ports: usize) {
    println!(
        "{} {} ports on {}...",
        style("Scanning").cyan(),
        style(ports).bold(),
        style(target).bold()
    );
}

/// Build the live progress bar the binary drives from `ProgressEvent`s.
pub fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ports ({percent}%)")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb
}

/// Advance the progress bar to match a progress event.
pub fn update_progress(pb: &ProgressBar, event: ProgressEvent) {
    pb.set_position(event.completed as u64);
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}
