//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `geoip_ingest` library: loads `.env`, parses the
//! command line, sets up logging and Ctrl-C handling, then dispatches.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use geoip_ingest::config::{Command, Opt};
use geoip_ingest::initialization::init_logger_with;
use geoip_ingest::{listen_for_shutdown, run_import, run_server};

#[tokio::main]
async fn main() -> Result<()> {
    // .env next to the working directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    init_logger_with(opt.log_level.into(), opt.log_format).context("Failed to initialize logger")?;

    let shutdown = CancellationToken::new();
    let listener = listen_for_shutdown(shutdown.clone());

    let outcome = match opt.command {
        Command::Import(args) => run_import(args.into(), shutdown.clone()).await.map(|report| {
            println!(
                "Imported {} record{} ({} discarded) in {:.1}s; {} locations stored in {}",
                report.stats.accepted,
                if report.stats.accepted == 1 { "" } else { "s" },
                report.stats.discarded,
                report.stats.time_elapsed.as_secs_f64(),
                report.stored_locations,
                report.db_path.display()
            );
        }),
        Command::Serve(args) => run_server(args.into(), shutdown.clone()).await,
    };

    shutdown.cancel();
    let _ = listener.await;

    if let Err(e) = outcome {
        eprintln!("geoip_ingest error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
