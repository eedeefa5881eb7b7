use std::collections::BTreeMap;

use super::{Lesson, LessonTime, Timetable};

const fn hm(hour: u16, minute: u16) -> LessonTime {
    LessonTime {
        minutes: hour * 60 + minute,
    }
}

const FIRST: (LessonTime, LessonTime) = (hm(8, 0), hm(9, 30));
const SECOND: (LessonTime, LessonTime) = (hm(9, 40), hm(11, 10));
const THIRD: (LessonTime, LessonTime) = (hm(11, 30), hm(13, 0));
const FOURTH: (LessonTime, LessonTime) = (hm(13, 10), hm(14, 40));

fn pair(
    number: u8,
    (start, end): (LessonTime, LessonTime),
    subject: &str,
    room: &str,
    teacher: &str,
) -> Lesson {
    Lesson {
        number,
        start,
        end,
        subject: subject.into(),
        room: room.into(),
        teacher: teacher.into(),
    }
}

const KOCHURA: &str = "Кочура А.Н.";
const LEONTIEV: &str = "Леонтьев Н.А.";
const DOKTOROV: &str = "Докторов";
const BALKAROVA: &str = "асс. Балкарова А.К.";
const FOREIGN_LANGUAGE: &str = "пр.Иностранный язык в профессиональной деятельности";

/// Days shared by both weeks.
fn common_days() -> BTreeMap<u8, Vec<Lesson>> {
    BTreeMap::from([
        (
            2,
            vec![
                pair(1, FIRST, FOREIGN_LANGUAGE, "1-225", BALKAROVA),
                pair(2, SECOND, "пр.Сис.ПР", "1-113", LEONTIEV),
                pair(3, THIRD, "л.Сис.ПР", "1-303", LEONTIEV),
            ],
        ),
        (
            3,
            vec![
                pair(1, FIRST, "пр.ПОПД", "1-225", "-"),
                pair(2, SECOND, "л.ПОПД", "1-303", "-"),
            ],
        ),
        (
            4,
            vec![
                pair(2, FOURTH, "л.РПМ", "1-303", DOKTOROV),
                pair(3, THIRD, "физра", "-", "-"),
                pair(4, FOURTH, "л.РПМ", "1-115", DOKTOROV),
            ],
        ),
        (7, Vec::new()),
    ])
}

pub(super) fn timetable() -> Timetable {
    let mut odd = common_days();
    odd.insert(
        1,
        vec![
            pair(1, FIRST, "пр.ПИТПМ", "1-115", KOCHURA),
            pair(2, SECOND, "л.Сис.ПР", "1-113", LEONTIEV),
            pair(3, THIRD, "пр.Разработка программных модулей", "1-303", DOKTOROV),
        ],
    );
    odd.insert(
        5,
        vec![
            pair(1, FIRST, "пр.ПИТПМ", "1-303", KOCHURA),
            pair(2, SECOND, "пр.ПИТПМ", "1-303", KOCHURA),
        ],
    );
    odd.insert(
        6,
        vec![
            pair(1, FIRST, "пр.ПИТПМ", "1-115", KOCHURA),
            pair(2, SECOND, "пр.ПИТПМ", "1-115", KOCHURA),
            pair(3, THIRD, "пр.РПМ", "1-113", DOKTOROV),
        ],
    );

    let mut even = common_days();
    even.insert(
        1,
        vec![
            pair(1, FIRST, "пр.ПИТПМ", "1-115", KOCHURA),
            pair(2, SECOND, "пр.Разработка программных модулей", "1-113", DOKTOROV),
            pair(3, THIRD, "л.Разработка программных модулей", "1-303", DOKTOROV),
        ],
    );
    even.insert(
        5,
        vec![
            pair(1, FIRST, "пр.ПИТПМ", "1-303", KOCHURA),
            pair(2, SECOND, "л.ПИТПМ", "1-303", KOCHURA),
        ],
    );
    even.insert(
        6,
        vec![
            pair(1, FIRST, "пр.ПИТПМ", "1-115", KOCHURA),
            pair(2, SECOND, "пр.ПИТПМ", "1-115", KOCHURA),
            pair(3, THIRD, "пр.РПМ", "1-113", KOCHURA),
        ],
    );

    Timetable::new(odd, even)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::WeekParity;

    #[test]
    fn weeks_differ_only_where_expected() {
        let tt = timetable();
        for day in [2, 3, 4, 7] {
            assert_eq!(tt.day(WeekParity::Odd, day), tt.day(WeekParity::Even, day));
        }
        for day in [1, 5, 6] {
            assert_ne!(tt.day(WeekParity::Odd, day), tt.day(WeekParity::Even, day));
        }
    }

    #[test]
    fn builtin_lesson_count() {
        // 3 + 3 + 2 + 3 + 2 + 3 per week, Sunday free.
        assert_eq!(timetable().lesson_count(), 32);
    }
}
