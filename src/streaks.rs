use crate::models::Habit;
use crate::progress::daily_progress;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

pub fn compute_streaks(habits: &[Habit], year: i32, today: NaiveDate) -> Streaks {
    if habits.is_empty() {
        return Streaks::default();
    }
    let (Some(jan1), Some(dec31)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Streaks::default();
    };

    // The scan widens past January 1 when completions or creation
    // timestamps predate the tracked year.
    let start = earliest_observed(habits).map_or(jan1, |seen| seen.min(jan1));
    let end = today.min(dec31);

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut day = start;
    while day <= end {
        if daily_progress(habits, day) > 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Streaks {
        current: run,
        longest,
    }
}

pub fn format_streak(streak: Option<u32>) -> String {
    match streak {
        None => "0".to_string(),
        Some(n) if n > 99 => "99+".to_string(),
        Some(n) => n.to_string(),
    }
}

fn earliest_observed(habits: &[Habit]) -> Option<NaiveDate> {
    habits
        .iter()
        .flat_map(|habit| {
            habit.created_date().into_iter().chain(
                habit
                    .completed_days
                    .keys()
                    .filter_map(|key| key.parse().ok()),
            )
        })
        .min()
}
