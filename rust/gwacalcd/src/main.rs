mod calc;
mod config;
mod ipc;
mod roster;
mod seed;
mod view;

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("gwacalcd: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(filter: &str) {
    // stdout carries the protocol; logs go to stderr only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let config = config::Config::from_env()?;
    init_logging(&config.log_filter);

    if config.seed == seed::SeedMode::Sample {
        for d in seed::audit(&seed::SAMPLE) {
            tracing::warn!(
                index = d.index,
                subject = %d.subject_name,
                field = d.field,
                seeded = d.seeded,
                derived = d.derived,
                "seed value disagrees with derivation; showing derived value"
            );
        }
    }

    let mut state = ipc::AppState::new(config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = state.config.seed.as_str(),
        subjects = state.roster.len(),
        "gwacalcd ready"
    );
    if state.roster.is_empty() {
        tracing::info!("starting with an empty roster");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed; shutting down");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                // No id to reply to; answer with a bare error envelope.
                tracing::warn!(error = %e, "malformed request line");
                ipc::bad_json(e.to_string())
            }
        };

        writeln!(stdout, "{resp}").context("write response")?;
        stdout.flush().context("flush response")?;
    }

    tracing::info!(revision = state.roster.revision(), "stdin closed");
    Ok(())
}
