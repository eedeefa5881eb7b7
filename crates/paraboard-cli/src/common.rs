//! Shared helpers for CLI commands.

use chrono::NaiveDateTime;
use clap::Args;
use paraboard_core::clock::{self, local_now};
use paraboard_core::{Config, Timetable};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Install the stderr log subscriber. `PARABOARD_LOG` overrides the level.
pub fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PARABOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `--at` override for the wall clock.
#[derive(Args, Debug, Clone, Default)]
pub struct TimeArgs {
    /// Use this local time instead of now (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub at: Option<String>,
}

impl TimeArgs {
    pub fn now(&self) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
        match &self.at {
            Some(value) => Ok(clock::parse_instant(value)?),
            None => Ok(local_now()),
        }
    }
}

/// Load the configured timetable and report data problems.
///
/// Issues in a user-supplied file are warnings; the known quirks of the
/// built-in table are only visible with `--verbose`.
pub fn load_timetable(config: &Config) -> Result<Timetable, Box<dyn std::error::Error>> {
    let timetable = config.timetable()?;
    for issue in timetable.validate() {
        if config.timetable_path.is_some() {
            tracing::warn!(%issue, "timetable issue");
        } else {
            tracing::debug!(%issue, "built-in timetable issue");
        }
    }
    Ok(timetable)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
