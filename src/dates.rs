use chrono::{Datelike, Duration, NaiveDate};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelector {
    Week(i32),
    Month(i32),
    FullYear,
}

pub fn enumerate_dates(range: RangeSelector, year: i32) -> Vec<NaiveDate> {
    match range {
        RangeSelector::Week(index) => week_dates(index, year),
        RangeSelector::Month(index) => month_dates(index, year),
        RangeSelector::FullYear => year_dates(year),
    }
}

pub fn week_dates(index: i32, year: i32) -> Vec<NaiveDate> {
    let Some(start) = first_week_start(year) else {
        return Vec::new();
    };
    let offset = i64::from(index.clamp(0, 51)) * 7;
    (0..7)
        .filter_map(|day| start.checked_add_signed(Duration::days(offset + day)))
        .collect()
}

pub fn month_dates(index: i32, year: i32) -> Vec<NaiveDate> {
    let month = (index.clamp(0, 11) + 1) as u32;
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let mut dates = Vec::with_capacity(31);
    let mut day = first;
    while day.month() == month {
        dates.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    dates
}

pub fn year_dates(year: i32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let mut dates = Vec::with_capacity(366);
    let mut day = first;
    while day.year() == year {
        dates.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    dates
}

pub fn week_index_for(date: NaiveDate, year: i32) -> i32 {
    let Some(start) = first_week_start(year) else {
        return 0;
    };
    (date - start).num_days().div_euclid(7).clamp(0, 51) as i32
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTHS_SHORT[date.month0() as usize]
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    DAYS_SHORT[date.weekday().num_days_from_sunday() as usize]
}

// Week 0 opens on the first Monday on or after January 1.
fn first_week_start(year: i32) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let to_monday = (7 - jan1.weekday().num_days_from_monday()) % 7;
    jan1.checked_add_signed(Duration::days(i64::from(to_monday)))
}
