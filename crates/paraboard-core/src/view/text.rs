//! Plain-text rendering for terminals.

use std::fmt::Write;

use super::{DashboardView, FullScheduleView, NextLessonCard, TodayView};

const BAR_WIDTH: usize = 20;

/// `[██████░░░░░░░░░░░░░░]  33.3%`
pub fn progress_bar(percent: f64) -> String {
    let pct = percent.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        pct
    )
}

pub fn render_today(view: &TodayView) -> String {
    let cards = match view {
        TodayView::Empty => return "📚 Сегодня нет пар. Отдыхай!\n".to_string(),
        TodayView::Lessons { cards } => cards,
    };
    let mut out = String::new();
    for card in cards {
        let lesson = &card.lesson;
        let marker = if card.active { "▶" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {} пара  {}  {}",
            lesson.number,
            lesson.time_range(),
            lesson.subject
        );
        let _ = writeln!(out, "           {} · {}", lesson.room, lesson.teacher);
        if let Some(pct) = card.progress {
            let _ = writeln!(out, "  Сейчас   {}", progress_bar(pct));
        }
    }
    out
}

pub fn render_next_card(card: &NextLessonCard) -> String {
    let mut out = format!("{}  {}\n{}\n", card.badge(), card.time(), card.headline());
    if let Some(detail) = card.detail() {
        out.push_str(&detail);
        out.push('\n');
    }
    out
}

pub fn render_full_schedule(view: &FullScheduleView) -> String {
    if view.is_empty() {
        return format!("📅 {} — нет пар\n", view.day_name);
    }
    let mut out = format!("{} ({} неделя)\n", view.day_name, view.week.ordinal());
    for lesson in &view.lessons {
        let _ = writeln!(
            out,
            "  {}  {}  [{} · {}]",
            lesson.time_range(),
            lesson.subject,
            lesson.room,
            lesson.teacher
        );
    }
    out
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = format!(
        "{}  {}  ·  {}\n\n",
        view.clock.time, view.clock.date, view.week.label
    );
    out.push_str(&render_today(&view.today));
    out.push('\n');
    out.push_str(&render_next_card(&view.next));
    if let Some(full) = &view.full {
        out.push('\n');
        out.push_str(&render_full_schedule(full));
    }
    out
}
