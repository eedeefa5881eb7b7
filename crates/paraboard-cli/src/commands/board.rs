use std::path::PathBuf;

use clap::Args;
use paraboard_core::view::{html, text};
use paraboard_core::{
    BoardEngine, Config, PageCache, ResolvedTime, UiAction, WeekParity, SEMESTER_START,
};

use crate::common::{load_timetable, print_json, CliResult, TimeArgs};

#[derive(Args)]
pub struct NowArgs {
    #[command(flatten)]
    pub time: TimeArgs,
    /// Show this week (odd/even or 1/2) instead of the calendar week
    #[arg(long)]
    pub week: Option<WeekParity>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FullArgs {
    #[command(flatten)]
    pub time: TimeArgs,
    /// Week to show (odd/even or 1/2); defaults to the calendar week
    #[arg(long)]
    pub week: Option<WeekParity>,
    /// Day to show, 1 = Monday .. 7 = Sunday; defaults to today
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub day: Option<u8>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct HtmlArgs {
    #[command(flatten)]
    pub time: TimeArgs,
    /// Show this week (odd/even or 1/2) instead of the calendar week
    #[arg(long)]
    pub week: Option<WeekParity>,
    /// Render with the full-schedule panel open on this day
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub panel_day: Option<u8>,
    /// Write the page to a file instead of stdout
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Build an engine at `now` with the requested week and panel selection applied.
fn engine_for(
    config: &Config,
    now: chrono::NaiveDateTime,
    week: Option<WeekParity>,
    panel_day: Option<u8>,
) -> Result<BoardEngine, Box<dyn std::error::Error>> {
    let timetable = load_timetable(config)?;
    let mut engine = BoardEngine::new(timetable, now)
        .with_refresh_interval(config.refresh.schedule_secs);
    if let Some(week) = week {
        engine.interact(UiAction::SelectWeek(week), now);
    }
    if let Some(day) = panel_day {
        engine.interact(UiAction::TogglePanel, now);
        engine.interact(UiAction::SelectDay(day), now);
    }
    Ok(engine)
}

pub fn run_now(args: NowArgs) -> CliResult {
    let config = Config::load_or_default();
    let now = args.time.now()?;
    let engine = engine_for(&config, now, args.week, None)?;
    let view = engine.snapshot(now);

    if args.json {
        return print_json(&view);
    }
    print!("{}", text::render_dashboard(&view));
    Ok(())
}

pub fn run_next(args: NowArgs) -> CliResult {
    let config = Config::load_or_default();
    let now = args.time.now()?;
    let engine = engine_for(&config, now, args.week, None)?;
    let view = engine.snapshot(now);

    if args.json {
        return print_json(&view.next);
    }
    print!("{}", text::render_next_card(&view.next));
    Ok(())
}

pub fn run_full(args: FullArgs) -> CliResult {
    let config = Config::load_or_default();
    let now = args.time.now()?;
    let resolved = ResolvedTime::resolve(now, SEMESTER_START);
    let day = args.day.unwrap_or(resolved.day);
    let engine = engine_for(&config, now, args.week, Some(day))?;
    let view = engine.snapshot(now);
    let Some(full) = view.full else {
        return Err("full schedule panel did not open".into());
    };

    if args.json {
        return print_json(&full);
    }
    print!("{}", text::render_full_schedule(&full));
    Ok(())
}

pub fn run_html(args: HtmlArgs) -> CliResult {
    let config = Config::load_or_default();
    let now = args.time.now()?;
    let engine = engine_for(&config, now, args.week, args.panel_day)?;
    let page = html::render_page(&engine.snapshot(now));

    match &args.out {
        Some(path) => {
            std::fs::write(path, &page)?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{page}"),
    }

    if config.cache.enabled {
        cache_page(&page);
    }
    Ok(())
}

/// Keep an offline copy of the page. Failures are logged and ignored.
pub fn cache_page(page: &str) {
    let stored = PageCache::default_dir()
        .and_then(PageCache::register)
        .and_then(|cache| cache.store(page));
    match stored {
        Ok(path) => tracing::debug!(path = %path.display(), "cached page"),
        Err(e) => tracing::warn!(error = %e, "offline cache unavailable"),
    }
}
