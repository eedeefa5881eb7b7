//! Board engine: decides what to re-render on each tick or interaction.
//!
//! Like the rest of the core, the engine has no threads or timers. The host
//! calls [`BoardEngine::tick`] about once a second with the current local
//! time and [`BoardEngine::interact`] on user input, then applies the
//! returned [`Event`]s.
//!
//! ## Refresh rules
//!
//! - every tick: clock
//! - whenever the minute of day changes: next-lesson card
//! - every `refresh_interval` (30 s by default): today's list
//! - on interaction: whatever the action affects, immediately
//!
//! Until the user picks a week by hand, the displayed week follows the
//! calendar and switches over at the Monday boundary.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::clock::{ResolvedTime, SEMESTER_START};
use crate::events::Event;
use crate::timetable::Timetable;
use crate::view::{self, DashboardView, UiAction, UiState};

pub const DEFAULT_REFRESH_SECS: i64 = 30;

#[derive(Debug, Clone)]
pub struct BoardEngine {
    timetable: Timetable,
    semester_start: NaiveDate,
    ui: UiState,
    refresh_interval: TimeDelta,
    last_refresh: Option<NaiveDateTime>,
    /// Date and minute the next-lesson card was last rendered for.
    last_next_minute: Option<(NaiveDate, u32)>,
    follow_calendar: bool,
}

impl BoardEngine {
    /// Engine for the built-in semester start, with the UI selecting
    /// today's week and day.
    pub fn new(timetable: Timetable, now: NaiveDateTime) -> Self {
        Self::with_semester_start(timetable, SEMESTER_START, now)
    }

    pub fn with_semester_start(
        timetable: Timetable,
        semester_start: NaiveDate,
        now: NaiveDateTime,
    ) -> Self {
        let resolved = ResolvedTime::resolve(now, semester_start);
        Self {
            timetable,
            semester_start,
            ui: UiState::new(&resolved),
            refresh_interval: TimeDelta::seconds(DEFAULT_REFRESH_SECS),
            last_refresh: None,
            last_next_minute: None,
            follow_calendar: true,
        }
    }

    /// Refresh interval for today's list, at least one second.
    pub fn with_refresh_interval(mut self, secs: u64) -> Self {
        let secs = i64::try_from(secs)
            .unwrap_or(i64::MAX)
            .clamp(1, i64::MAX / 1_000);
        self.refresh_interval = TimeDelta::seconds(secs);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn resolve(&self, now: NaiveDateTime) -> ResolvedTime {
        ResolvedTime::resolve(now, self.semester_start)
    }

    pub fn snapshot(&self, now: NaiveDateTime) -> DashboardView {
        view::dashboard(&self.timetable, &self.ui, now, &self.resolve(now))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Initial render of every part of the board.
    pub fn start(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let resolved = self.resolve(now);
        self.last_refresh = Some(now);
        vec![
            self.clock_event(now),
            self.week_event(now, &resolved),
            self.today_event(now, &resolved),
            self.next_event(now, &resolved),
        ]
    }

    /// Call about once a second.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let resolved = self.resolve(now);
        let mut events = vec![self.clock_event(now)];

        if self.follow_calendar && self.ui.selected_week != resolved.week {
            self.ui.selected_week = resolved.week;
            tracing::debug!(week = %resolved.week, "calendar week rolled over");
            events.push(self.week_event(now, &resolved));
            events.push(self.today_event(now, &resolved));
            events.push(self.next_event(now, &resolved));
            self.last_refresh = Some(now);
            return events;
        }

        if self.last_next_minute != Some((now.date(), resolved.minute_of_day)) {
            events.push(self.next_event(now, &resolved));
        }
        if self.refresh_due(now) {
            tracing::debug!(%now, "refreshing today's schedule");
            events.push(self.today_event(now, &resolved));
            self.last_refresh = Some(now);
        }
        events
    }

    /// Apply a user interaction and re-render what it affects.
    pub fn interact(&mut self, action: UiAction, now: NaiveDateTime) -> Vec<Event> {
        if !self.ui.apply(action) {
            tracing::debug!(?action, "ignored interaction");
            return Vec::new();
        }
        let resolved = self.resolve(now);
        match action {
            UiAction::SelectWeek(_) => {
                self.follow_calendar = false;
                self.last_refresh = Some(now);
                let mut events = vec![
                    self.week_event(now, &resolved),
                    self.today_event(now, &resolved),
                    self.next_event(now, &resolved),
                ];
                if self.ui.panel_open {
                    events.push(self.full_event(now));
                }
                events
            }
            UiAction::SelectDay(_) => vec![self.full_event(now)],
            UiAction::TogglePanel => {
                let mut events = vec![Event::PanelToggled {
                    open: self.ui.panel_open,
                    at: now,
                }];
                if self.ui.panel_open {
                    events.push(self.full_event(now));
                }
                events
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn refresh_due(&self, now: NaiveDateTime) -> bool {
        match self.last_refresh {
            None => true,
            // Clock moved backwards: refresh rather than wait it out.
            Some(last) if now < last => true,
            Some(last) => now - last >= self.refresh_interval,
        }
    }

    fn clock_event(&self, now: NaiveDateTime) -> Event {
        Event::ClockUpdated {
            clock: view::clock_view(now),
            at: now,
        }
    }

    fn week_event(&self, now: NaiveDateTime, resolved: &ResolvedTime) -> Event {
        Event::WeekChanged {
            week: view::week_badge(&self.ui, resolved),
            at: now,
        }
    }

    fn today_event(&self, now: NaiveDateTime, resolved: &ResolvedTime) -> Event {
        Event::ScheduleRefreshed {
            today: view::today_view(&self.timetable, self.ui.selected_week, resolved),
            at: now,
        }
    }

    fn next_event(&mut self, now: NaiveDateTime, resolved: &ResolvedTime) -> Event {
        self.last_next_minute = Some((now.date(), resolved.minute_of_day));
        Event::NextLessonUpdated {
            next: view::next_lesson_card(&self.timetable, self.ui.selected_week, resolved),
            at: now,
        }
    }

    fn full_event(&self, now: NaiveDateTime) -> Event {
        Event::FullScheduleUpdated {
            full: view::full_schedule_view(
                &self.timetable,
                self.ui.selected_week,
                self.ui.selected_day,
            ),
            at: now,
        }
    }
}
