use crate::dates::month_label;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::mem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    pub label: String,
    pub start: usize,
    pub span: usize,
}

// Sunday-aligned buckets covering the whole year, padded backwards to
// the Sunday on or before January 1.
pub fn year_weeks(year: i32) -> Vec<Vec<NaiveDate>> {
    let (Some(jan1), Some(dec31)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };
    let back = i64::from(jan1.weekday().num_days_from_sunday());
    let Some(start) = jan1.checked_sub_signed(Duration::days(back)) else {
        return Vec::new();
    };

    let mut weeks = Vec::with_capacity(54);
    let mut week: Vec<NaiveDate> = Vec::with_capacity(7);
    let mut day = start;
    while day <= dec31 {
        if day.weekday() == Weekday::Sun && !week.is_empty() {
            weeks.push(mem::take(&mut week));
        }
        week.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if !week.is_empty() {
        weeks.push(week);
    }
    weeks
}

pub fn month_spans(weeks: &[Vec<NaiveDate>], year: i32) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    for (index, week) in weeks.iter().enumerate() {
        let Some(day) = week.iter().find(|date| date.year() == year) else {
            continue;
        };
        let label = month_label(*day);
        match spans.last_mut() {
            Some(last) if last.label == label => last.span += 1,
            _ => spans.push(MonthSpan {
                label: label.to_string(),
                start: index,
                span: 1,
            }),
        }
    }
    spans
}

pub fn intensity_level(percentage: u32) -> u8 {
    match percentage {
        0 => 0,
        1..=25 => 1,
        26..=50 => 2,
        51..=75 => 3,
        _ => 4,
    }
}
