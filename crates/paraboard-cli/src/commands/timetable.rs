use std::path::PathBuf;

use clap::Subcommand;
use paraboard_core::clock::{current_week_parity, local_now};
use paraboard_core::view::{full_schedule_view, text, FullScheduleView};
use paraboard_core::{Config, Timetable, WeekParity, SEMESTER_START};

use crate::common::{load_timetable, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Print every day of one week
    Show {
        /// Week to show (odd/even or 1/2); defaults to the calendar week
        #[arg(long)]
        week: Option<WeekParity>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check a timetable for overlapping or empty lessons
    Validate {
        /// File to check instead of the configured timetable
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Write the active timetable as TOML
    Export {
        /// Output file; stdout when omitted
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

pub fn run(action: TimetableAction) -> CliResult {
    let config = Config::load_or_default();
    match action {
        TimetableAction::Show { week, json } => {
            let timetable = load_timetable(&config)?;
            let week = week.unwrap_or_else(|| current_week_parity(local_now(), SEMESTER_START));
            let days: Vec<FullScheduleView> = (1..=7)
                .map(|day| full_schedule_view(&timetable, week, day))
                .collect();
            if json {
                return print_json(&days);
            }
            println!("{}\n", week.label());
            for view in days.iter().filter(|v| !v.is_empty()) {
                println!("{}", text::render_full_schedule(view));
            }
        }
        TimetableAction::Validate { file } => {
            let timetable = match file.as_deref().or(config.timetable_path.as_deref()) {
                Some(path) => Timetable::load(path)?,
                None => Timetable::builtin(),
            };
            let issues = timetable.validate();
            println!("{} lessons", timetable.lesson_count());
            if issues.is_empty() {
                println!("no issues");
            }
            for issue in &issues {
                println!("warning: {issue}");
            }
        }
        TimetableAction::Export { out } => {
            let timetable = load_timetable(&config)?;
            let toml = timetable.to_toml_string()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, toml)?;
                    eprintln!("wrote {}", path.display());
                }
                None => print!("{toml}"),
            }
        }
    }
    Ok(())
}
