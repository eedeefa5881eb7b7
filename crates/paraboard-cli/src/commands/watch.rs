//! Live terminal board.
//!
//! Three independent sources drive the screen: the clock interval (which
//! also lets the engine refresh today's list every `schedule_secs`), the
//! animation frame interval, and keyboard commands read from stdin.
//! Everything runs on a single-threaded runtime; handlers run to completion.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use paraboard_core::animation::{ascii, Animator, Bounds, ParticleField};
use paraboard_core::clock::{local_now, WeekParity};
use paraboard_core::view::{
    text, ClockView, FullScheduleView, NextLessonCard, TodayView, UiAction, WeekBadge,
};
use paraboard_core::{BoardEngine, Config, Event};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::common::{load_timetable, CliResult};

const BACKGROUND_COLS: usize = 60;
const BACKGROUND_ROWS: usize = 8;

#[derive(Args)]
pub struct WatchArgs {
    /// Draw the animated background above the board
    #[arg(long)]
    pub background: bool,
    /// Print events as JSON lines instead of redrawing the screen
    #[arg(long)]
    pub json: bool,
    /// Exit after this many seconds
    #[arg(long)]
    pub duration: Option<u64>,
}

/// What the terminal currently shows, updated from engine events.
#[derive(Default)]
struct Screen {
    clock: Option<ClockView>,
    week: Option<WeekBadge>,
    today: Option<TodayView>,
    next: Option<NextLessonCard>,
    full: Option<FullScheduleView>,
    panel_open: bool,
    background: Vec<String>,
}

impl Screen {
    fn apply(&mut self, event: Event) {
        match event {
            Event::ClockUpdated { clock, .. } => self.clock = Some(clock),
            Event::WeekChanged { week, .. } => self.week = Some(week),
            Event::ScheduleRefreshed { today, .. } => self.today = Some(today),
            Event::NextLessonUpdated { next, .. } => self.next = Some(next),
            Event::FullScheduleUpdated { full, .. } => self.full = Some(full),
            Event::PanelToggled { open, .. } => self.panel_open = open,
        }
    }

    fn render(&self) -> String {
        let mut out = String::from("\x1b[2J\x1b[H");
        for line in &self.background {
            out.push_str(line);
            out.push('\n');
        }
        if let (Some(clock), Some(week)) = (&self.clock, &self.week) {
            out.push_str(&format!("{}  {}  ·  {}\n\n", clock.time, clock.date, week.label));
        }
        if let Some(today) = &self.today {
            out.push_str(&text::render_today(today));
            out.push('\n');
        }
        if let Some(next) = &self.next {
            out.push_str(&text::render_next_card(next));
        }
        if self.panel_open {
            if let Some(full) = &self.full {
                out.push('\n');
                out.push_str(&text::render_full_schedule(full));
            }
        }
        out.push_str("\n[w] week  [o/e] odd/even  [p] full list  [1-7] day  [q] quit\n");
        out
    }
}

/// Map a keyboard command to an interaction.
fn parse_command(line: &str, current_week: WeekParity) -> Option<UiAction> {
    match line.trim() {
        "w" => Some(UiAction::SelectWeek(current_week.toggled())),
        "o" | "odd" => Some(UiAction::SelectWeek(WeekParity::Odd)),
        "e" | "even" => Some(UiAction::SelectWeek(WeekParity::Even)),
        "p" => Some(UiAction::TogglePanel),
        other => other.parse::<u8>().ok().map(UiAction::SelectDay),
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub fn run(args: WatchArgs) -> CliResult {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(args, config))
}

async fn watch(args: WatchArgs, config: Config) -> CliResult {
    let timetable = load_timetable(&config)?;
    let start = local_now();
    let mut engine =
        BoardEngine::new(timetable, start).with_refresh_interval(config.refresh.schedule_secs);

    let animate = args.background && config.animation.enabled && !args.json;
    let mut animator = Animator::new(ParticleField::new(
        config.animation.particles as usize,
        Bounds::new(config.animation.width as f64, config.animation.height as f64),
        config.animation.seed,
    ));

    let mut screen = Screen::default();
    let emit = |screen: &mut Screen, events: Vec<Event>| -> CliResult {
        for event in events {
            if args.json {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                screen.apply(event);
            }
        }
        Ok(())
    };

    emit(&mut screen, engine.start(start))?;
    redraw(&screen, args.json)?;

    let mut clock = tokio::time::interval(Duration::from_secs(config.refresh.clock_secs.max(1)));
    let mut frames = tokio::time::interval(Duration::from_millis(
        1000 / u64::from(config.animation.fps.max(1)),
    ));
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    let duration = args.duration;
    let deadline = async move {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            _ = clock.tick() => {
                emit(&mut screen, engine.tick(local_now()))?;
                redraw(&screen, args.json)?;
            }
            _ = frames.tick(), if animate => {
                let frame = animator.frame(now_ms());
                screen.background = ascii::rasterize(&frame, BACKGROUND_COLS, BACKGROUND_ROWS);
                redraw(&screen, args.json)?;
            }
            line = input.next_line(), if input_open => {
                match line? {
                    Some(line) if line.trim() == "q" => break,
                    Some(line) => {
                        match parse_command(&line, engine.ui().selected_week) {
                            Some(action) => {
                                emit(&mut screen, engine.interact(action, local_now()))?;
                                redraw(&screen, args.json)?;
                            }
                            None => tracing::debug!(%line, "unknown command"),
                        }
                    }
                    None => input_open = false,
                }
            }
            _ = &mut interrupted => break,
            _ = &mut deadline => break,
        }
    }

    if config.cache.enabled {
        let page = paraboard_core::view::html::render_page(&engine.snapshot(local_now()));
        super::board::cache_page(&page);
    }
    Ok(())
}

fn redraw(screen: &Screen, json: bool) -> CliResult {
    if json {
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(screen.render().as_bytes())?;
    stdout.flush()?;
    Ok(())
}
