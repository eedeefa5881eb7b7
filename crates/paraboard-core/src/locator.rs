//! Lesson lookup for a given minute of day.
//!
//! Days are linear scans over a handful of lessons; all functions are pure.

use crate::timetable::Lesson;

/// The lesson whose `[start, end)` contains `minute`, if any.
pub fn find_active_lesson(day: &[Lesson], minute: u32) -> Option<&Lesson> {
    day.iter().find(|lesson| lesson.contains(minute))
}

/// The first lesson starting strictly after `minute`.
///
/// A lesson already in progress is never "next".
pub fn find_next_lesson(day: &[Lesson], minute: u32) -> Option<&Lesson> {
    day.iter().find(|lesson| lesson.start_minutes() > minute)
}

/// Elapsed share of `active` at `minute`, in percent, clamped to `[0, 100]`.
pub fn progress_percent(active: &Lesson, minute: u32) -> f64 {
    let start = active.start_minutes() as f64;
    let end = active.end_minutes() as f64;
    let now = minute as f64;
    let total = end - start;
    if total <= 0.0 {
        return if now < start { 0.0 } else { 100.0 };
    }
    ((now - start) / total * 100.0).clamp(0.0, 100.0)
}

/// What the "next lesson" card should say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLesson<'a> {
    NoLessonsToday,
    Upcoming(&'a Lesson),
    Finished,
}

pub fn next_lesson_state(day: &[Lesson], minute: u32) -> NextLesson<'_> {
    if day.is_empty() {
        return NextLesson::NoLessonsToday;
    }
    match find_next_lesson(day, minute) {
        Some(lesson) => NextLesson::Upcoming(lesson),
        None => NextLesson::Finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::WeekParity;
    use crate::timetable::Timetable;

    fn monday_odd() -> Vec<Lesson> {
        Timetable::builtin().day(WeekParity::Odd, 1).to_vec()
    }

    #[test]
    fn active_lesson_at_half_past_eight() {
        let day = monday_odd();
        let active = find_active_lesson(&day, 510).unwrap();
        assert_eq!(active.number, 1);
        assert_eq!(active.subject, "пр.ПИТПМ");
        let pct = progress_percent(active, 510);
        assert!((pct - 33.333).abs() < 0.01, "got {pct}");
    }

    #[test]
    fn before_first_lesson_nothing_is_active() {
        let day = monday_odd();
        assert!(find_active_lesson(&day, 420).is_none());
        assert_eq!(find_next_lesson(&day, 420).unwrap().start.to_string(), "08:00");
    }

    #[test]
    fn end_minute_is_exclusive() {
        let day = monday_odd();
        // 09:30 closes pair 1; 09:40 opens pair 2.
        assert!(find_active_lesson(&day, 570).is_none());
        assert_eq!(find_active_lesson(&day, 580).unwrap().number, 2);
    }

    #[test]
    fn next_skips_the_lesson_in_progress() {
        let day = monday_odd();
        let next = find_next_lesson(&day, 480).unwrap();
        assert_eq!(next.number, 2);
    }

    #[test]
    fn progress_is_clamped() {
        let day = monday_odd();
        let first = &day[0];
        assert_eq!(progress_percent(first, 480), 0.0);
        assert_eq!(progress_percent(first, 570), 100.0);
        assert_eq!(progress_percent(first, 100), 0.0);
        assert_eq!(progress_percent(first, 1000), 100.0);
    }

    #[test]
    fn next_lesson_card_states() {
        let tt = Timetable::builtin();
        assert_eq!(
            next_lesson_state(tt.day(WeekParity::Odd, 7), 600),
            NextLesson::NoLessonsToday
        );
        let monday = tt.day(WeekParity::Odd, 1);
        assert!(matches!(
            next_lesson_state(monday, 420),
            NextLesson::Upcoming(l) if l.number == 1
        ));
        assert_eq!(next_lesson_state(monday, 700), NextLesson::Finished);
    }
}
