//! View models and UI state.
//!
//! Every view is a pure projection of (timetable, resolved time, UI
//! selection). The [`html`] and [`text`] renderers turn the models into
//! markup for a page or a terminal.
//!
//! ## UI state
//!
//! The selected week is shared by the main week toggle and the full-schedule
//! panel toggle: flipping either changes which timetable today's list and
//! the next-lesson card read from. The selected day only affects the
//! full-schedule panel.

pub mod html;
pub mod ru;
pub mod text;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::{ResolvedTime, WeekParity};
use crate::locator::{self, NextLesson};
use crate::timetable::{Lesson, Timetable};

/// Transient UI selection, owned by the host and threaded through renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub panel_open: bool,
    pub selected_week: WeekParity,
    /// 1 = Monday .. 7 = Sunday.
    pub selected_day: u8,
}

/// A user interaction with the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum UiAction {
    /// Either week toggle was clicked.
    SelectWeek(WeekParity),
    /// A day button in the full-schedule panel was clicked.
    SelectDay(u8),
    /// The "full list" button was clicked.
    TogglePanel,
}

impl UiState {
    /// Initial selection: the calendar week and today, panel closed.
    pub fn new(resolved: &ResolvedTime) -> Self {
        Self {
            panel_open: false,
            selected_week: resolved.week,
            selected_day: resolved.day,
        }
    }

    /// Apply an action. Returns `false` when the action was ignored.
    pub fn apply(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::SelectWeek(week) => {
                self.selected_week = week;
                true
            }
            UiAction::SelectDay(day) if (1..=7).contains(&day) => {
                self.selected_day = day;
                true
            }
            UiAction::SelectDay(_) => false,
            UiAction::TogglePanel => {
                self.panel_open = !self.panel_open;
                true
            }
        }
    }
}

/// One card in today's list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonCard {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub active: bool,
    /// Only set on the active card.
    pub progress: Option<f64>,
}

/// Today's lesson list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TodayView {
    Empty,
    Lessons { cards: Vec<LessonCard> },
}

impl TodayView {
    pub fn active_card(&self) -> Option<&LessonCard> {
        match self {
            TodayView::Empty => None,
            TodayView::Lessons { cards } => cards.iter().find(|c| c.active),
        }
    }
}

/// The "next lesson" summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NextLessonCard {
    /// No lessons scheduled today.
    Rest,
    Upcoming { lesson: Lesson },
    /// All of today's lessons have started.
    Finished,
}

impl NextLessonCard {
    pub fn badge(&self) -> &'static str {
        match self {
            NextLessonCard::Rest => "🎉 ОТДЫХ",
            NextLessonCard::Upcoming { .. } => "→ СЛЕДУЮЩАЯ",
            NextLessonCard::Finished => "✅ ЗАВЕРШЕНО",
        }
    }

    pub fn time(&self) -> String {
        match self {
            NextLessonCard::Upcoming { lesson } => lesson.time_range(),
            _ => "--:--".to_string(),
        }
    }

    pub fn headline(&self) -> &str {
        match self {
            NextLessonCard::Rest => "Сегодня нет пар",
            NextLessonCard::Upcoming { lesson } => &lesson.subject,
            NextLessonCard::Finished => "ЭТО ПОСЛЕДНЯЯ",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            NextLessonCard::Rest => Some("Отдыхай!".to_string()),
            NextLessonCard::Upcoming { lesson } => {
                Some(format!("{} • {}", lesson.room, lesson.teacher))
            }
            NextLessonCard::Finished => None,
        }
    }
}

/// The on-demand full-schedule panel for one day of one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullScheduleView {
    pub week: WeekParity,
    pub day: u8,
    pub day_name: String,
    pub lessons: Vec<Lesson>,
}

impl FullScheduleView {
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Clock and date line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockView {
    pub time: String,
    pub date: String,
}

/// Current-week indicator and toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekBadge {
    /// Week the board is showing.
    pub selected: WeekParity,
    /// Week according to the calendar.
    pub calendar: WeekParity,
    pub label: &'static str,
}

/// Everything on the board at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub clock: ClockView,
    pub week: WeekBadge,
    pub today: TodayView,
    pub next: NextLessonCard,
    /// Present while the panel is open.
    pub full: Option<FullScheduleView>,
    pub ui: UiState,
}

pub fn today_view(timetable: &Timetable, week: WeekParity, now: &ResolvedTime) -> TodayView {
    let lessons = timetable.day(week, now.day);
    if lessons.is_empty() {
        return TodayView::Empty;
    }
    let active = locator::find_active_lesson(lessons, now.minute_of_day);
    let cards = lessons
        .iter()
        .map(|lesson| {
            let is_active = active.is_some_and(|a| std::ptr::eq(a, lesson));
            LessonCard {
                lesson: lesson.clone(),
                active: is_active,
                progress: is_active
                    .then(|| locator::progress_percent(lesson, now.minute_of_day)),
            }
        })
        .collect();
    TodayView::Lessons { cards }
}

pub fn next_lesson_card(
    timetable: &Timetable,
    week: WeekParity,
    now: &ResolvedTime,
) -> NextLessonCard {
    match locator::next_lesson_state(timetable.day(week, now.day), now.minute_of_day) {
        NextLesson::NoLessonsToday => NextLessonCard::Rest,
        NextLesson::Upcoming(lesson) => NextLessonCard::Upcoming {
            lesson: lesson.clone(),
        },
        NextLesson::Finished => NextLessonCard::Finished,
    }
}

pub fn full_schedule_view(timetable: &Timetable, week: WeekParity, day: u8) -> FullScheduleView {
    FullScheduleView {
        week,
        day,
        day_name: ru::day_name(day).unwrap_or("—").to_string(),
        lessons: timetable.day(week, day).to_vec(),
    }
}

pub fn clock_view(now: NaiveDateTime) -> ClockView {
    ClockView {
        time: now.format("%H:%M").to_string(),
        date: ru::long_date(now.date()),
    }
}

pub fn week_badge(ui: &UiState, now: &ResolvedTime) -> WeekBadge {
    WeekBadge {
        selected: ui.selected_week,
        calendar: now.week,
        label: ui.selected_week.label(),
    }
}

/// Project the whole board.
pub fn dashboard(
    timetable: &Timetable,
    ui: &UiState,
    now: NaiveDateTime,
    resolved: &ResolvedTime,
) -> DashboardView {
    DashboardView {
        clock: clock_view(now),
        week: week_badge(ui, resolved),
        today: today_view(timetable, ui.selected_week, resolved),
        next: next_lesson_card(timetable, ui.selected_week, resolved),
        full: ui
            .panel_open
            .then(|| full_schedule_view(timetable, ui.selected_week, ui.selected_day)),
        ui: *ui,
    }
}
