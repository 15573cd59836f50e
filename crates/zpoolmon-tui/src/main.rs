//! `zpoolmon-tui` — Terminal status board for ZFS pool health.
//!
//! Polls the kernel's kstat tree through `zpoolmon-core`'s [`Monitor`]
//! and renders each pool as a colored `[name=STATE]` entry. Pools appear
//! and disappear as they are imported and exported; a pool whose state
//! cannot be read shows `UNAVAIL` rather than vanishing.
//!
//! Logs are written to a file (default `/tmp/zpoolmon-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! monitor activation.

mod app;
mod board;
mod event;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use zpoolmon_core::Monitor;

use crate::app::App;
use crate::board::PoolBoard;

/// Terminal status board for ZFS pool health.
#[derive(Parser, Debug)]
#[command(name = "zpoolmon-tui", version, about)]
struct Cli {
    /// Log file path (defaults to /tmp/zpoolmon-tui.log)
    #[arg(long, default_value = "/tmp/zpoolmon-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "zpoolmon_tui={log_level},zpoolmon_core={log_level},zpoolmon_kstat={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("zpoolmon-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!("starting zpoolmon-tui");

    let (board, pools) = PoolBoard::new();
    let monitor = Monitor::activate(board);

    let mut app = App::new(pools, monitor.last_sweep());
    let result = app.run().await;

    // Deactivate regardless of how the UI loop ended: timer stops first,
    // then the registry tears down.
    if let Err(e) = monitor.deactivate().await {
        warn!(error = %e, "monitor teardown failed");
    }

    result
}
