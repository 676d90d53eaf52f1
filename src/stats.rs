use crate::board::{intensity_level, month_spans, year_weeks};
use crate::dates::{date_key, enumerate_dates, weekday_label, RangeSelector};
use crate::models::{
    BoardCell, BoardResponse, DayHeader, HabitRow, OverviewResponse, StatsResponse, UserData,
};
use crate::progress::{daily_progress, progress_for_habit, total_completions};
use crate::streaks::{compute_streaks, format_streak};
use crate::view::{self, ViewMode, ViewState};
use chrono::{Datelike, Local, NaiveDate};

pub fn build_stats(user: &UserData, year: i32, mode: ViewMode, index: Option<i32>) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), user, year, mode, index)
}

pub fn build_stats_at(
    today: NaiveDate,
    user: &UserData,
    year: i32,
    mode: ViewMode,
    index: Option<i32>,
) -> StatsResponse {
    let mut state = ViewState::for_today(today, year);
    state.mode = mode;
    match mode {
        ViewMode::Week => {
            if let Some(index) = index {
                state.week = index.clamp(0, 51);
            }
        }
        ViewMode::Month => state.month = index.unwrap_or(0).clamp(0, 11),
        _ => {}
    }

    let selector = match mode {
        ViewMode::Week => RangeSelector::Week(state.week),
        ViewMode::Month => RangeSelector::Month(state.month),
        _ => RangeSelector::FullYear,
    };
    let dates = enumerate_dates(selector, year);

    let headers = dates
        .iter()
        .map(|&date| {
            let key = date_key(date);
            DayHeader {
                weekday: weekday_label(date).to_string(),
                day: date.day(),
                has_note: user.notes.contains_key(&key),
                percentage: daily_progress(&user.habits, date),
                date: key,
            }
        })
        .collect();

    let mut habits = user.habits.clone();
    habits.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    let rows = habits
        .into_iter()
        .map(|habit| {
            let progress = progress_for_habit(&habit, &dates);
            HabitRow { habit, progress }
        })
        .collect();

    let streaks = compute_streaks(&user.habits, year, today);

    StatsResponse {
        view: mode,
        index: match mode {
            ViewMode::Week => state.week,
            ViewMode::Month => state.month,
            _ => 0,
        },
        title: view::view_title(&state, year),
        can_prev: view::can_navigate_prev(&state),
        can_next: view::can_navigate_next(&state),
        dates: headers,
        rows,
        streaks,
        streak_display: format_streak(Some(streaks.current)),
    }
}

pub fn build_board(user: &UserData, year: i32) -> BoardResponse {
    build_board_at(Local::now().date_naive(), user, year)
}

pub fn build_board_at(today: NaiveDate, user: &UserData, year: i32) -> BoardResponse {
    let weeks = year_weeks(year);
    let months = month_spans(&weeks, year);
    let cells = weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|&date| {
                    let in_year = date.year() == year;
                    let percentage = if in_year {
                        daily_progress(&user.habits, date)
                    } else {
                        0
                    };
                    let key = date_key(date);
                    BoardCell {
                        in_year,
                        percentage,
                        level: intensity_level(percentage),
                        has_note: in_year && user.notes.contains_key(&key),
                        date: key,
                    }
                })
                .collect()
        })
        .collect();

    BoardResponse {
        year,
        today: date_key(today),
        total_completions: total_completions(&user.habits),
        months,
        weeks: cells,
    }
}

pub fn build_overview(user: &UserData, year: i32) -> OverviewResponse {
    build_overview_at(Local::now().date_naive(), user, year)
}

pub fn build_overview_at(today: NaiveDate, user: &UserData, year: i32) -> OverviewResponse {
    let streaks = compute_streaks(&user.habits, year, today);
    OverviewResponse {
        total_habits: user.habits.len(),
        current_streak: streaks.current,
        longest_streak: streaks.longest,
        streak_display: format_streak(Some(streaks.current)),
        total_completions: total_completions(&user.habits),
    }
}
