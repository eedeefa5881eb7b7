//! Timetable store: week parity -> day number -> ordered lessons.
//!
//! The store is built once at startup and never mutated. Days are kept
//! sorted by start time so that list order is chronological order.
//! Missing days read as empty.

mod builtin;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::WeekParity;
use crate::error::{CoreError, TimetableError};

/// A time of day with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonTime {
    minutes: u16,
}

impl LessonTime {
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, TimetableError> {
        if hour > 23 || minute > 59 {
            return Err(TimetableError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            minutes: hour as u16 * 60 + minute as u16,
        })
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        self.minutes as u32
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl fmt::Display for LessonTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for LessonTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimetableError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for LessonTime {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LessonTime> for String {
    fn from(value: LessonTime) -> Self {
        value.to_string()
    }
}

/// One scheduled class ("pair").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "num")]
    pub number: u8,
    pub start: LessonTime,
    pub end: LessonTime,
    pub subject: String,
    pub room: String,
    pub teacher: String,
}

impl Lesson {
    pub fn start_minutes(&self) -> u32 {
        self.start.minutes()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.minutes()
    }

    /// `HH:MM–HH:MM`
    pub fn time_range(&self) -> String {
        format!("{}–{}", self.start, self.end)
    }

    /// Whether `minute` falls in `[start, end)`.
    pub fn contains(&self, minute: u32) -> bool {
        self.start_minutes() <= minute && minute < self.end_minutes()
    }
}

/// Lessons of a single day, ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DaySchedule {
    lessons: Vec<Lesson>,
}

impl DaySchedule {
    /// Builds a day, sorting stably by start time.
    pub fn new(mut lessons: Vec<Lesson>) -> Self {
        lessons.sort_by_key(|l| l.start);
        Self { lessons }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// A problem found in timetable data. These are reported, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimetableIssue {
    /// The lesson ends at or before it starts.
    EmptyInterval { week: WeekParity, day: u8, number: u8 },
    /// A lesson starts before an earlier lesson of the same day has ended.
    Overlap {
        week: WeekParity,
        day: u8,
        first: u8,
        second: u8,
    },
}

impl fmt::Display for TimetableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableIssue::EmptyInterval { week, day, number } => {
                write!(f, "{week} week, day {day}: pair {number} ends before it starts")
            }
            TimetableIssue::Overlap {
                week,
                day,
                first,
                second,
            } => write!(
                f,
                "{week} week, day {day}: pair {second} overlaps pair {first}"
            ),
        }
    }
}

/// The full two-week timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timetable {
    odd: BTreeMap<u8, DaySchedule>,
    even: BTreeMap<u8, DaySchedule>,
}

/// On-disk form: day keys are strings in TOML.
#[derive(Debug, Deserialize)]
struct RawTimetable {
    #[serde(default)]
    odd: BTreeMap<String, Vec<Lesson>>,
    #[serde(default)]
    even: BTreeMap<String, Vec<Lesson>>,
}

impl Timetable {
    /// The compiled-in timetable.
    pub fn builtin() -> Self {
        builtin::timetable()
    }

    pub fn new(odd: BTreeMap<u8, Vec<Lesson>>, even: BTreeMap<u8, Vec<Lesson>>) -> Self {
        let normalize = |days: BTreeMap<u8, Vec<Lesson>>| -> BTreeMap<u8, DaySchedule> {
            days.into_iter()
                .map(|(day, lessons)| (day, DaySchedule::new(lessons)))
                .collect()
        };
        Self {
            odd: normalize(odd),
            even: normalize(even),
        }
    }

    /// Lessons for a given week and day. Unknown days are empty.
    pub fn day(&self, week: WeekParity, day: u8) -> &[Lesson] {
        self.week(week)
            .get(&day)
            .map(DaySchedule::lessons)
            .unwrap_or(&[])
    }

    fn week(&self, week: WeekParity) -> &BTreeMap<u8, DaySchedule> {
        match week {
            WeekParity::Odd => &self.odd,
            WeekParity::Even => &self.even,
        }
    }

    pub fn lesson_count(&self) -> usize {
        self.odd
            .values()
            .chain(self.even.values())
            .map(|d| d.lessons().len())
            .sum()
    }

    /// Parse a timetable from TOML (`[[odd.1]]` arrays of lessons).
    pub fn from_toml_str(content: &str) -> Result<Self, TimetableError> {
        let raw: RawTimetable =
            toml::from_str(content).map_err(|e| TimetableError::Parse(e.to_string()))?;
        Ok(Self::new(parse_days(raw.odd)?, parse_days(raw.even)?))
    }

    /// Load a timetable file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Serialize to the same TOML form [`Timetable::from_toml_str`] reads.
    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        let stringify = |days: &BTreeMap<u8, DaySchedule>| {
            days.iter()
                .map(|(day, schedule)| (day.to_string(), schedule.lessons().to_vec()))
                .collect::<BTreeMap<_, _>>()
        };
        #[derive(Serialize)]
        struct Out {
            odd: BTreeMap<String, Vec<Lesson>>,
            even: BTreeMap<String, Vec<Lesson>>,
        }
        Ok(toml::to_string_pretty(&Out {
            odd: stringify(&self.odd),
            even: stringify(&self.even),
        })?)
    }

    /// Report empty intervals and overlapping lessons.
    pub fn validate(&self) -> Vec<TimetableIssue> {
        let mut issues = Vec::new();
        for week in [WeekParity::Odd, WeekParity::Even] {
            for (&day, schedule) in self.week(week) {
                let mut latest: Option<&Lesson> = None;
                for lesson in schedule.lessons() {
                    if lesson.end <= lesson.start {
                        issues.push(TimetableIssue::EmptyInterval {
                            week,
                            day,
                            number: lesson.number,
                        });
                        continue;
                    }
                    if let Some(prev) = latest {
                        if lesson.start < prev.end {
                            issues.push(TimetableIssue::Overlap {
                                week,
                                day,
                                first: prev.number,
                                second: lesson.number,
                            });
                        }
                    }
                    if latest.map_or(true, |prev| lesson.end > prev.end) {
                        latest = Some(lesson);
                    }
                }
            }
        }
        issues
    }
}

fn parse_days(
    raw: BTreeMap<String, Vec<Lesson>>,
) -> Result<BTreeMap<u8, Vec<Lesson>>, TimetableError> {
    raw.into_iter()
        .map(|(key, lessons)| match key.trim().parse::<u8>() {
            Ok(day @ 1..=7) => Ok((day, lessons)),
            _ => Err(TimetableError::InvalidDay(key)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn lesson_time_parses_and_formats() {
        let t: LessonTime = "08:05".parse().unwrap();
        assert_eq!(t.minutes(), 485);
        assert_eq!(t.to_string(), "08:05");
        assert_eq!("9:40".parse::<LessonTime>().unwrap().minutes(), 580);
    }

    #[test]
    fn lesson_time_rejects_garbage() {
        for bad in ["", "8", "24:00", "12:60", "12:5", "ab:cd", "123:00"] {
            assert!(bad.parse::<LessonTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn builtin_monday_odd_starts_with_pitpm() {
        let tt = Timetable::builtin();
        let monday = tt.day(WeekParity::Odd, 1);
        assert_eq!(monday.len(), 3);
        assert_eq!(monday[0].subject, "пр.ПИТПМ");
        assert_eq!(monday[0].start.to_string(), "08:00");
        assert_eq!(monday[0].end.to_string(), "09:30");
    }

    #[test]
    fn sunday_and_unknown_days_are_empty() {
        let tt = Timetable::builtin();
        assert!(tt.day(WeekParity::Odd, 7).is_empty());
        assert!(tt.day(WeekParity::Even, 7).is_empty());
        assert!(tt.day(WeekParity::Odd, 0).is_empty());
        assert!(tt.day(WeekParity::Odd, 9).is_empty());
    }

    #[test]
    fn days_are_sorted_by_start() {
        let tt = Timetable::builtin();
        for week in [WeekParity::Odd, WeekParity::Even] {
            for day in 1..=7 {
                let lessons = tt.day(week, day);
                assert!(lessons.windows(2).all(|w| w[0].start <= w[1].start));
            }
        }
    }

    #[test]
    fn thursday_is_reordered_chronologically() {
        let tt = Timetable::builtin();
        let thursday = tt.day(WeekParity::Odd, 4);
        let numbers: Vec<u8> = thursday.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![3, 2, 4]);
    }

    #[test]
    fn validate_reports_builtin_thursday_overlap() {
        let issues = Timetable::builtin().validate();
        assert!(issues.contains(&TimetableIssue::Overlap {
            week: WeekParity::Odd,
            day: 4,
            first: 2,
            second: 4,
        }));
        assert!(issues
            .iter()
            .all(|i| matches!(i, TimetableIssue::Overlap { day: 4, .. })));
    }

    #[test]
    fn from_toml_reads_day_tables() {
        let tt = Timetable::from_toml_str(indoc! {r#"
            [[odd.2]]
            num = 2
            start = "09:40"
            end = "11:10"
            subject = "Networks"
            room = "2-101"
            teacher = "Ivanov"

            [[odd.2]]
            num = 1
            start = "08:00"
            end = "09:30"
            subject = "Algebra"
            room = "2-102"
            teacher = "Petrov"
        "#})
        .unwrap();
        let tuesday = tt.day(WeekParity::Odd, 2);
        assert_eq!(tuesday.len(), 2);
        assert_eq!(tuesday[0].subject, "Algebra");
        assert!(tt.day(WeekParity::Even, 2).is_empty());
    }

    #[test]
    fn from_toml_rejects_bad_day_and_time() {
        let bad_day = indoc! {r#"
            [[odd.8]]
            num = 1
            start = "08:00"
            end = "09:30"
            subject = "x"
            room = "x"
            teacher = "x"
        "#};
        assert_eq!(
            Timetable::from_toml_str(bad_day),
            Err(TimetableError::InvalidDay("8".into()))
        );

        let bad_time = bad_day.replace("odd.8", "odd.1").replace("08:00", "8h");
        assert!(matches!(
            Timetable::from_toml_str(&bad_time),
            Err(TimetableError::Parse(_))
        ));
    }

    #[test]
    fn toml_export_reads_back() {
        let tt = Timetable::builtin();
        let text = tt.to_toml_string().unwrap();
        let parsed = Timetable::from_toml_str(&text).unwrap();
        assert_eq!(parsed, tt);
    }

    #[test]
    fn validate_flags_empty_interval() {
        let lesson = Lesson {
            number: 1,
            start: "10:00".parse().unwrap(),
            end: "10:00".parse().unwrap(),
            subject: "x".into(),
            room: "x".into(),
            teacher: "x".into(),
        };
        let tt = Timetable::new(BTreeMap::from([(3, vec![lesson])]), BTreeMap::new());
        assert_eq!(
            tt.validate(),
            vec![TimetableIssue::EmptyInterval {
                week: WeekParity::Odd,
                day: 3,
                number: 1
            }]
        );
    }
}
