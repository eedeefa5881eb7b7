use chrono::NaiveDateTime;
use serde::Serialize;

use crate::view::{ClockView, FullScheduleView, NextLessonCard, TodayView, WeekBadge};

/// Every re-render the board needs produces an Event.
/// The host applies each one to its surface (DOM, terminal, file).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ClockUpdated {
        clock: ClockView,
        at: NaiveDateTime,
    },
    /// Today's lesson list was recomputed.
    ScheduleRefreshed {
        today: TodayView,
        at: NaiveDateTime,
    },
    NextLessonUpdated {
        next: NextLessonCard,
        at: NaiveDateTime,
    },
    /// The displayed week changed (user toggle or calendar rollover).
    WeekChanged {
        week: WeekBadge,
        at: NaiveDateTime,
    },
    FullScheduleUpdated {
        full: FullScheduleView,
        at: NaiveDateTime,
    },
    PanelToggled {
        open: bool,
        at: NaiveDateTime,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ClockUpdated { .. } => "clock_updated",
            Event::ScheduleRefreshed { .. } => "schedule_refreshed",
            Event::NextLessonUpdated { .. } => "next_lesson_updated",
            Event::WeekChanged { .. } => "week_changed",
            Event::FullScheduleUpdated { .. } => "full_schedule_updated",
            Event::PanelToggled { .. } => "panel_toggled",
        }
    }
}
