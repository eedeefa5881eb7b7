//! HTML fragments for the board page.
//!
//! Class names match the stylesheet of the web front-end. Every piece of
//! timetable text goes through [`escape`].

use indoc::formatdoc;

use super::{
    ru, ClockView, DashboardView, FullScheduleView, LessonCard, NextLessonCard, TodayView,
    WeekBadge,
};
use crate::clock::WeekParity;

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn lesson_card(card: &LessonCard) -> String {
    let lesson = &card.lesson;
    let body = formatdoc! {r#"
        <div class="pair-number text-gradient-animation">{num} пара</div>
        <div class="time-range">{range}</div>
        <div class="subject">{subject}</div>
        <div class="details">
            <div class="room">{room}</div>
            <div class="teacher">{teacher}</div>
        </div>
        "#,
        num = lesson.number,
        range = lesson.time_range(),
        subject = escape(&lesson.subject),
        room = escape(&lesson.room),
        teacher = escape(&lesson.teacher),
    };

    if !card.active {
        return format!("<div class=\"class-card\">\n{body}</div>\n");
    }

    let progress = card.progress.unwrap_or(0.0);
    formatdoc! {r#"
        <div class="class-card class-card--active">
        <div class="status-badge">Сейчас</div>
        {body}<div class="progress-container">
            <div class="progress-bar" style="width: {progress:.1}%;"></div>
        </div>
        <div class="progress-label">
            <span>Начало</span>
            <span>Конец</span>
        </div>
        </div>
        "#}
}

/// Contents of the `#schedule` container.
pub fn render_today(view: &TodayView) -> String {
    match view {
        TodayView::Empty => formatdoc! {r#"
            <div class="empty-state">
                <div class="empty-icon">📚</div>
                <div>Сегодня нет пар</div>
                <div class="empty-hint">Отдыхай!</div>
            </div>
            "#},
        TodayView::Lessons { cards } => cards.iter().map(lesson_card).collect(),
    }
}

/// Contents of the `.next-class-card` element.
pub fn render_next_card(card: &NextLessonCard) -> String {
    let detail = card
        .detail()
        .map(|d| format!("<div class=\"next-class-room\">{}</div>\n", escape(&d)))
        .unwrap_or_default();
    formatdoc! {r#"
        <div class="next-class-header">
            <button class="next-class-btn">{badge}</button>
            <span class="next-class-time text-gradient-animation">{time}</span>
        </div>
        <div class="next-class-subject">{headline}</div>
        {detail}"#,
        badge = card.badge(),
        time = card.time(),
        headline = escape(card.headline()),
    }
}

/// Contents of `#full-schedule-list`.
pub fn render_full_schedule(view: &FullScheduleView) -> String {
    let day_name = escape(&view.day_name);
    if view.is_empty() {
        return formatdoc! {r#"
            <div class="empty-state">
                <div class="empty-icon">📅</div>
                <div>{day_name}</div>
                <div class="empty-hint">Нет пар</div>
            </div>
            "#};
    }

    let mut out = format!(
        "<div class=\"full-schedule-day-header text-gradient-animation\">{day_name}</div>\n"
    );
    for lesson in &view.lessons {
        out.push_str(&formatdoc! {r#"
            <div class="full-schedule-class-card">
                <div class="full-schedule-class-time">{range}</div>
                <div class="full-schedule-class-subject">{subject}</div>
                <div class="full-schedule-class-info">
                    <span>{room}</span>
                    <span>{teacher}</span>
                </div>
            </div>
            "#,
            range = lesson.time_range(),
            subject = escape(&lesson.subject),
            room = escape(&lesson.room),
            teacher = escape(&lesson.teacher),
        });
    }
    out
}

fn week_buttons(class: &str, selected: WeekParity) -> String {
    [WeekParity::Odd, WeekParity::Even]
        .into_iter()
        .map(|week| {
            let active = if week == selected { " active" } else { "" };
            format!(
                "<button class=\"{class}{active}\" data-week=\"{week}\">{} неделя</button>",
                week.ordinal()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn day_buttons(selected: u8) -> String {
    (1..=6)
        .filter_map(|day| {
            let label = ru::day_short(day)?;
            let active = if day == selected { " active" } else { "" };
            Some(format!(
                "<button class=\"full-schedule-day-btn{active}\" data-day=\"{day}\">{label}</button>"
            ))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn header(clock: &ClockView, week: &WeekBadge) -> String {
    formatdoc! {r#"
        <header class="app-header">
            <h1 class="app-title" id="app-title"><span class="gradient-text">Расписание</span></h1>
            <div class="clock">
                <div id="current-time">{time}</div>
                <div id="current-date">{date}</div>
            </div>
            <div class="current-week text-gradient-animation" id="current-week-text">{label}</div>
            <div class="week-switch">
            {buttons}
            </div>
        </header>
        "#,
        time = clock.time,
        date = escape(&clock.date),
        label = week.label,
        buttons = week_buttons("week-btn", week.selected),
    }
}

/// A complete standalone page for one board snapshot.
pub fn render_page(view: &DashboardView) -> String {
    let panel_class = if view.ui.panel_open {
        "full-schedule-panel open"
    } else {
        "full-schedule-panel"
    };
    let full_list = view
        .full
        .as_ref()
        .map(render_full_schedule)
        .unwrap_or_default();

    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="ru">
        <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <title>Расписание</title>
        <link rel="stylesheet" href="style.css">
        </head>
        <body>
        <canvas id="canvas"></canvas>
        <main class="app">
        {header}<section id="schedule">
        {today}</section>
        <section class="next-class-card">
        {next}</section>
        <button class="full-list-btn">Полное расписание</button>
        <aside id="full-schedule-panel" class="{panel_class}">
        <h2 id="full-schedule-title" class="text-gradient-animation">Полное расписание</h2>
        <div class="full-schedule-weeks">
        {panel_weeks}
        </div>
        <div class="full-schedule-days">
        {days}
        </div>
        <div id="full-schedule-list">
        {full_list}</div>
        </aside>
        </main>
        </body>
        </html>
        "#,
        header = header(&view.clock, &view.week),
        today = render_today(&view.today),
        next = render_next_card(&view.next),
        panel_weeks = week_buttons("full-schedule-week-btn", view.ui.selected_week),
        days = day_buttons(view.ui.selected_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ResolvedTime;
    use crate::timetable::Timetable;
    use crate::view::{full_schedule_view, next_lesson_card, today_view};

    fn monday(minute: u32) -> ResolvedTime {
        ResolvedTime {
            week: WeekParity::Odd,
            day: 1,
            minute_of_day: minute,
        }
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape("пр.ПИТПМ"), "пр.ПИТПМ");
    }

    #[test]
    fn active_card_has_badge_and_progress() {
        let tt = Timetable::builtin();
        let html = render_today(&today_view(&tt, WeekParity::Odd, &monday(510)));
        assert_eq!(html.matches("class-card--active").count(), 1);
        assert!(html.contains("<div class=\"status-badge\">Сейчас</div>"));
        assert!(html.contains("width: 33.3%;"));
        assert_eq!(html.matches("class=\"class-card").count(), 3);
    }

    #[test]
    fn empty_day_renders_rest_message() {
        let html = render_today(&TodayView::Empty);
        assert!(html.contains("Сегодня нет пар"));
        assert!(html.contains("Отдыхай!"));
    }

    #[test]
    fn next_card_states_render() {
        let tt = Timetable::builtin();
        let upcoming = render_next_card(&next_lesson_card(&tt, WeekParity::Odd, &monday(420)));
        assert!(upcoming.contains("→ СЛЕДУЮЩАЯ"));
        assert!(upcoming.contains("08:00–09:30"));
        assert!(upcoming.contains("1-115 • Кочура А.Н."));

        let finished = render_next_card(&NextLessonCard::Finished);
        assert!(finished.contains("✅ ЗАВЕРШЕНО"));
        assert!(finished.contains("ЭТО ПОСЛЕДНЯЯ"));
        assert!(!finished.contains("next-class-room"));
    }

    #[test]
    fn full_schedule_header_and_empty_state() {
        let tt = Timetable::builtin();
        let html = render_full_schedule(&full_schedule_view(&tt, WeekParity::Even, 3));
        assert!(html.contains(
            "<div class=\"full-schedule-day-header text-gradient-animation\">Среда</div>"
        ));
        assert_eq!(html.matches("full-schedule-class-card").count(), 2);

        let sunday = render_full_schedule(&full_schedule_view(&tt, WeekParity::Even, 7));
        assert!(sunday.contains("Воскресенье"));
        assert!(sunday.contains("Нет пар"));
    }

    #[test]
    fn page_marks_animated_text() {
        let tt = Timetable::builtin();
        let now = chrono::NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let ui = crate::view::UiState {
            panel_open: true,
            selected_week: WeekParity::Odd,
            selected_day: 1,
        };
        let page = render_page(&crate::view::dashboard(&tt, &ui, now, &monday(510)));
        for id in [
            "class=\"current-week text-gradient-animation\" id=\"current-week-text\"",
            "class=\"next-class-time text-gradient-animation\"",
            "class=\"pair-number text-gradient-animation\"",
            "id=\"full-schedule-title\" class=\"text-gradient-animation\"",
            "class=\"full-schedule-day-header text-gradient-animation\"",
        ] {
            assert!(page.contains(id), "missing {id}");
        }
    }

    #[test]
    fn week_buttons_mark_selection() {
        let html = week_buttons("week-btn", WeekParity::Even);
        assert!(html.contains("<button class=\"week-btn\" data-week=\"odd\">1 неделя</button>"));
        assert!(html.contains("<button class=\"week-btn active\" data-week=\"even\">2 неделя</button>"));
    }
}
