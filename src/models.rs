use crate::board::MonthSpan;
use crate::dates::date_key;
use crate::progress::HabitProgress;
use crate::streaks::Streaks;
use crate::view::{ViewEvent, ViewMode, ViewState};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

fn default_category() -> String {
    "Uncategorized".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub goal: u32,
    #[serde(default)]
    pub completed_days: BTreeMap<String, bool>,
    pub created_at: String,
}

impl Habit {
    pub fn new(name: impl Into<String>, category: impl Into<String>, goal: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            goal,
            completed_days: BTreeMap::new(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_days
            .get(&date_key(date))
            .copied()
            .unwrap_or(false)
    }

    // Unmarking removes the key so the map stays sparse.
    pub fn toggle(&mut self, date: NaiveDate) {
        let key = date_key(date);
        if self.completed_days.remove(&key).is_none() {
            self.completed_days.insert(key, true);
        }
    }

    pub fn created_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.date_naive())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserData {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub users: BTreeMap<String, UserData>,
}

impl AppData {
    pub fn user_mut(&mut self, username: &str) -> &mut UserData {
        self.users.entry(username.to_string()).or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub goal: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub username: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveNoteRequest {
    pub username: String,
    pub date: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub habits: Vec<Habit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesResponse {
    pub notes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub username: String,
    pub view: Option<String>,
    pub index: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct DayHeader {
    pub date: String,
    pub weekday: String,
    pub day: u32,
    pub has_note: bool,
    pub percentage: u32,
}

#[derive(Debug, Serialize)]
pub struct HabitRow {
    pub habit: Habit,
    pub progress: HabitProgress,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub view: ViewMode,
    pub index: i32,
    pub title: String,
    pub can_prev: bool,
    pub can_next: bool,
    pub dates: Vec<DayHeader>,
    pub rows: Vec<HabitRow>,
    pub streaks: Streaks,
    pub streak_display: String,
}

#[derive(Debug, Serialize)]
pub struct BoardCell {
    pub date: String,
    pub in_year: bool,
    pub percentage: u32,
    pub level: u8,
    pub has_note: bool,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub year: i32,
    pub today: String,
    pub total_completions: usize,
    pub months: Vec<MonthSpan>,
    pub weeks: Vec<Vec<BoardCell>>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_habits: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_display: String,
    pub total_completions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewTransitionRequest {
    pub state: ViewState,
    pub event: ViewEvent,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub title: String,
    pub can_prev: bool,
    pub can_next: bool,
    pub state: ViewState,
}
