//! Parser for catalog time/room strings.
//!
//! Catalog feeds describe meetings as free text mixing day characters,
//! clock ranges, period numbers and room names. Two notations occur:
//!
//! | Notation | Example | Meaning |
//! |----------|---------|---------|
//! | Clock range | `월수(10:00-11:15) 공학관 301` | Mon and Wed, 10:00–11:15 |
//! | Period range | `화(3-4) 목(3)` | Tue periods 3–4, Thu period 3 |
//!
//! Periods map to clock times through [`period_start`]/[`period_end`]:
//! periods 1–6 are 75-minute blocks, the rest 50 minutes.
//!
//! Text without any recognisable meeting (blank, `미정`, `온라인`) yields a
//! single [`TimeSlot::Unscheduled`].

use crate::models::{ClockTime, Meeting, TimeSlot, Weekday};

const UNSCHEDULED_MARKERS: [&str; 3] = ["미정", "시간미지정", "온라인"];

/// Start of a teaching period.
pub fn period_start(period: u16) -> Option<ClockTime> {
    let (h, m) = match period {
        0 => (8, 0),
        1 => (9, 0),
        2 => (10, 30),
        3 => (12, 0),
        4 => (13, 30),
        5 => (15, 0),
        6 => (16, 30),
        7 => (18, 0),
        8 => (19, 0),
        9 => (20, 0),
        10 => (21, 0),
        _ => return None,
    };
    ClockTime::hm(h, m)
}

/// End of a teaching period.
pub fn period_end(period: u16) -> Option<ClockTime> {
    let start = period_start(period)?;
    let length = if (1..=6).contains(&period) { 75 } else { 50 };
    ClockTime::from_minutes(start.minutes() + length)
}

/// Parses a time/room string into slots.
pub fn parse_time_room(text: &str) -> Vec<TimeSlot> {
    if text.trim().is_empty() || UNSCHEDULED_MARKERS.iter().any(|m| text.contains(m)) {
        return vec![TimeSlot::Unscheduled];
    }

    let chars: Vec<char> = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            '~' => '-',
            other => other,
        })
        .collect();

    let mut slots = Vec::new();
    let mut days: Vec<Weekday> = Vec::new();
    let mut prev_was_day = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(day) = Weekday::from_korean(c) {
            if !prev_was_day {
                days.clear();
            }
            days.push(day);
            prev_was_day = true;
            i += 1;
            continue;
        }
        prev_was_day = false;

        if c.is_ascii_digit() && !days.is_empty() {
            if let Some((start, end, next)) = clock_range(&chars, i) {
                push_meetings(&mut slots, &days, start, end);
                days.clear();
                i = next;
                continue;
            }
            if preceded_by_paren(&chars, i) {
                if let Some((start, end, next)) = period_range(&chars, i) {
                    push_meetings(&mut slots, &days, start, end);
                    i = next;
                    continue;
                }
            }
        }

        i += 1;
    }

    if slots.is_empty() {
        slots.push(TimeSlot::Unscheduled);
    }
    slots
}

fn push_meetings(slots: &mut Vec<TimeSlot>, days: &[Weekday], start: ClockTime, end: ClockTime) {
    if end <= start {
        return;
    }
    for &day in days {
        slots.push(TimeSlot::Scheduled(Meeting::new(day, start, end)));
    }
}

fn preceded_by_paren(chars: &[char], i: usize) -> bool {
    chars[..i]
        .iter()
        .rev()
        .find(|c| !c.is_whitespace())
        .is_some_and(|&c| c == '(' || c == ',')
}

/// Reads up to `max` digits starting at `i`.
fn number(chars: &[char], i: usize, max: usize) -> Option<(u16, usize)> {
    let len = chars[i..]
        .iter()
        .take(max)
        .take_while(|c| c.is_ascii_digit())
        .count();
    if len == 0 {
        return None;
    }
    let s: String = chars[i..i + len].iter().collect();
    s.parse().ok().map(|n| (n, i + len))
}

fn clock(chars: &[char], i: usize) -> Option<(ClockTime, usize)> {
    let (h, after_h) = number(chars, i, 2)?;
    if chars.get(after_h) != Some(&':') {
        return None;
    }
    let (m, after_m) = number(chars, after_h + 1, 2)?;
    if after_m - after_h != 3 {
        return None;
    }
    Some((ClockTime::hm(h, m)?, after_m))
}

fn clock_range(chars: &[char], i: usize) -> Option<(ClockTime, ClockTime, usize)> {
    let (start, next) = clock(chars, i)?;
    if chars.get(next) != Some(&'-') {
        return None;
    }
    let (end, next) = clock(chars, next + 1)?;
    Some((start, end, next))
}

fn period_range(chars: &[char], i: usize) -> Option<(ClockTime, ClockTime, usize)> {
    let (first, mut next) = number(chars, i, 2)?;
    let mut last = first;
    if chars.get(next) == Some(&'-') {
        let (n, after) = number(chars, next + 1, 2)?;
        last = n;
        next = after;
    }
    Some((period_start(first)?, period_end(last)?, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(day: Weekday, start: (u16, u16), end: (u16, u16)) -> TimeSlot {
        TimeSlot::at(day, start, end)
    }

    #[test]
    fn test_day_run_with_clock_range() {
        let slots = parse_time_room("월수(10:00-11:15) 공학관 301");
        assert_eq!(
            slots,
            vec![
                meeting(Weekday::Mon, (10, 0), (11, 15)),
                meeting(Weekday::Wed, (10, 0), (11, 15)),
            ]
        );
    }

    #[test]
    fn test_separate_days_with_clock_ranges() {
        let slots = parse_time_room("화(09:00-10:15)\n목(9:00~10:15) 과도관 B101");
        assert_eq!(
            slots,
            vec![
                meeting(Weekday::Tue, (9, 0), (10, 15)),
                meeting(Weekday::Thu, (9, 0), (10, 15)),
            ]
        );
    }

    #[test]
    fn test_clock_range_without_parens() {
        let slots = parse_time_room("금 13:00-15:50");
        assert_eq!(slots, vec![meeting(Weekday::Fri, (13, 0), (15, 50))]);
    }

    #[test]
    fn test_period_ranges() {
        let slots = parse_time_room("화(3-4) 목(3) 정보관 202");
        assert_eq!(
            slots,
            vec![
                meeting(Weekday::Tue, (12, 0), (14, 45)),
                meeting(Weekday::Thu, (12, 0), (13, 15)),
            ]
        );
    }

    #[test]
    fn test_evening_period_is_fifty_minutes() {
        assert_eq!(period_end(7), ClockTime::hm(18, 50));
        assert_eq!(period_end(1), ClockTime::hm(10, 15));
        assert_eq!(period_start(11), None);
    }

    #[test]
    fn test_room_digits_are_not_periods() {
        let slots = parse_time_room("월(1) 공학관 301");
        assert_eq!(slots, vec![meeting(Weekday::Mon, (9, 0), (10, 15))]);
    }

    #[test]
    fn test_unscheduled_markers() {
        assert_eq!(parse_time_room(""), vec![TimeSlot::Unscheduled]);
        assert_eq!(parse_time_room("시간미지정"), vec![TimeSlot::Unscheduled]);
        assert_eq!(parse_time_room("온라인 강의"), vec![TimeSlot::Unscheduled]);
        assert_eq!(parse_time_room("see syllabus"), vec![TimeSlot::Unscheduled]);
    }
}
