use anyhow::Result;
use clap::Parser;
use portsweep::cli::Args;
use portsweep::error::ScanError;
use portsweep::{output, run_scan};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    let range = match args.port_range() {
        Ok(range) => range,
        Err(e) => {
            output::print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    let options = args.scan_options();

    if !args.json {
        output::print_scan_header(&args.target, range.len());
    }

    // The progress bar lives out here: the core only reports plain events.
    let progress = if args.json {
        None
    } else {
        Some(output::progress_bar(range.len()))
    };

    let scan = run_scan(&args.target, range, &options, |event| {
        if let Some(ref pb) = progress {
            output::update_progress(pb, event);
        }
    })
    .await;

    let outcome = match scan {
        Ok(outcome) => outcome,
        Err(e @ ScanError::Resolution { .. }) | Err(e @ ScanError::NoAddresses(_)) => {
            if let Some(pb) = progress {
                pb.abandon();
            }
            output::print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if args.json {
        output::print_json(&outcome)?;
    } else {
        let stdout = std::io::stdout();
        output::print_table(&mut stdout.lock(), &outcome, args.all)?;
    }

    Ok(ExitCode::SUCCESS)
}
