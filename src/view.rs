use crate::dates::{self, MONTHS, MONTHS_SHORT};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Month,
    Year,
    Dashboard,
    Account,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub week: i32,
    pub month: i32,
    pub selected_date: Option<String>,
    pub note_open: bool,
    pub add_habit_open: bool,
    pub user_menu_open: bool,
}

impl ViewState {
    pub fn for_today(today: NaiveDate, year: i32) -> Self {
        Self {
            week: dates::week_index_for(today, year),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    SetMode { mode: ViewMode },
    NavigatePrev,
    NavigateNext,
    OpenNote { date: String },
    CloseNote,
    ToggleAddHabit,
    ToggleUserMenu,
}

pub fn reduce(state: &ViewState, event: &ViewEvent) -> ViewState {
    let mut next = state.clone();
    match event {
        ViewEvent::SetMode { mode } => {
            next.mode = *mode;
            next.user_menu_open = false;
        }
        ViewEvent::NavigatePrev => match state.mode {
            ViewMode::Week => next.week = (state.week - 1).clamp(0, 51),
            ViewMode::Month => next.month = (state.month - 1).clamp(0, 11),
            _ => {}
        },
        ViewEvent::NavigateNext => match state.mode {
            ViewMode::Week => next.week = (state.week + 1).clamp(0, 51),
            ViewMode::Month => next.month = (state.month + 1).clamp(0, 11),
            _ => {}
        },
        ViewEvent::OpenNote { date } => {
            next.selected_date = Some(date.clone());
            next.note_open = true;
        }
        ViewEvent::CloseNote => {
            next.selected_date = None;
            next.note_open = false;
        }
        ViewEvent::ToggleAddHabit => next.add_habit_open = !state.add_habit_open,
        ViewEvent::ToggleUserMenu => next.user_menu_open = !state.user_menu_open,
    }
    next
}

pub fn can_navigate_prev(state: &ViewState) -> bool {
    match state.mode {
        ViewMode::Week => state.week > 0,
        ViewMode::Month => state.month > 0,
        _ => false,
    }
}

pub fn can_navigate_next(state: &ViewState) -> bool {
    match state.mode {
        ViewMode::Week => state.week < 51,
        ViewMode::Month => state.month < 11,
        _ => false,
    }
}

pub fn view_title(state: &ViewState, year: i32) -> String {
    match state.mode {
        ViewMode::Week => {
            let week = state.week.clamp(0, 51);
            let dates = dates::week_dates(week, year);
            match (dates.first(), dates.last()) {
                (Some(start), Some(end)) => format!(
                    "Week {} ({} - {})",
                    week + 1,
                    short_date(*start),
                    short_date(*end)
                ),
                _ => format!("Week {}", week + 1),
            }
        }
        ViewMode::Month => MONTHS[state.month.clamp(0, 11) as usize].to_string(),
        ViewMode::Year => format!("{year} Full Year"),
        ViewMode::Dashboard => "Dashboard".to_string(),
        ViewMode::Account => "Account".to_string(),
    }
}

fn short_date(date: NaiveDate) -> String {
    format!("{} {}", MONTHS_SHORT[date.month0() as usize], date.day())
}
