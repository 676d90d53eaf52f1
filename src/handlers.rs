use crate::dates::date_key;
use crate::errors::AppError;
use crate::models::{
    AppData, BoardResponse, CreateHabitRequest, Habit, HabitsResponse, HealthResponse,
    LoginRequest, LoginResponse, NotesResponse, OverviewResponse, SaveNoteRequest, StatsQuery,
    StatsResponse, ToggleRequest, UserQuery, ViewResponse, ViewTransitionRequest,
};
use crate::state::AppState;
use crate::stats::{build_board, build_overview, build_stats};
use crate::storage::persist_data;
use crate::ui::render_index;
use crate::view::{self, ViewMode, ViewState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.tracked_year))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = payload.username.trim();
    if let Err(err) = state.verifier.verify(username, &payload.password) {
        warn!("login rejected for {username:?}: {err}");
        return Err(AppError::unauthorized(err.to_string()));
    }
    info!("login accepted for {username}");
    Ok(Json(LoginResponse {
        username: username.to_string(),
    }))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<HabitsResponse> {
    let data = state.data.lock().await;
    let habits = data
        .users
        .get(&query.username)
        .map(|user| user.habits.clone())
        .unwrap_or_default();
    Json(HabitsResponse { habits })
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<Json<Habit>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }
    let category = match payload.category.trim() {
        "" => "Uncategorized",
        trimmed => trimmed,
    };
    let habit = Habit::new(name, category, payload.goal.unwrap_or(30));

    let created = commit(&state, move |data| {
        data.user_mut(&payload.username).habits.push(habit.clone());
        Ok(habit)
    })
    .await?;
    Ok(Json(created))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Habit>, AppError> {
    let date = parse_tracked_date(&payload.date, state.tracked_year)?;
    let updated = commit(&state, move |data| {
        let user = data.user_mut(&payload.username);
        let habit = user
            .habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or_else(|| AppError::not_found("no such habit"))?;
        habit.toggle(date);
        Ok(habit.clone())
    })
    .await?;
    Ok(Json(updated))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    commit(&state, move |data| {
        let user = data.user_mut(&query.username);
        let before = user.habits.len();
        user.habits.retain(|habit| habit.id != id);
        if user.habits.len() == before {
            return Err(AppError::not_found("no such habit"));
        }
        Ok(())
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_notes(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<NotesResponse> {
    let data = state.data.lock().await;
    let notes = data
        .users
        .get(&query.username)
        .map(|user| user.notes.clone())
        .unwrap_or_default();
    Json(NotesResponse { notes })
}

pub async fn save_note(
    State(state): State<AppState>,
    Json(payload): Json<SaveNoteRequest>,
) -> Result<Json<NotesResponse>, AppError> {
    let date = parse_tracked_date(&payload.date, state.tracked_year)?;
    let key = date_key(date);
    let notes = commit(&state, move |data| {
        let user = data.user_mut(&payload.username);
        if payload.body.is_empty() {
            user.notes.remove(&key);
        } else {
            user.notes.insert(key, payload.body);
        }
        Ok(user.notes.clone())
    })
    .await?;
    Ok(Json(NotesResponse { notes }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<StatsResponse> {
    let mode = resolve_view(query.view.as_deref());
    let data = state.data.lock().await;
    let user = data.users.get(&query.username).cloned().unwrap_or_default();
    Json(build_stats(&user, state.tracked_year, mode, query.index))
}

pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<BoardResponse> {
    let data = state.data.lock().await;
    let user = data.users.get(&query.username).cloned().unwrap_or_default();
    Json(build_board(&user, state.tracked_year))
}

pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<OverviewResponse> {
    let data = state.data.lock().await;
    let user = data.users.get(&query.username).cloned().unwrap_or_default();
    Json(build_overview(&user, state.tracked_year))
}

pub async fn init_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let today = Local::now().date_naive();
    view_payload(ViewState::for_today(today, state.tracked_year), state.tracked_year)
}

pub async fn transition_view(
    State(state): State<AppState>,
    Json(payload): Json<ViewTransitionRequest>,
) -> Json<ViewResponse> {
    let next = view::reduce(&payload.state, &payload.event);
    view_payload(next, state.tracked_year)
}

fn view_payload(state: ViewState, year: i32) -> Json<ViewResponse> {
    Json(ViewResponse {
        title: view::view_title(&state, year),
        can_prev: view::can_navigate_prev(&state),
        can_next: view::can_navigate_next(&state),
        state,
    })
}

fn resolve_view(view: Option<&str>) -> ViewMode {
    match view.unwrap_or("week") {
        "week" => ViewMode::Week,
        "month" => ViewMode::Month,
        _ => ViewMode::Year,
    }
}

// Mutations run on a copy and only replace the live document once
// the copy has been persisted.
async fn commit<T>(
    state: &AppState,
    mutate: impl FnOnce(&mut AppData) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let out = mutate(&mut next)?;
    persist_data(&state.data_path, &next).await?;
    *data = next;
    Ok(out)
}

fn parse_tracked_date(raw: &str, year: i32) -> Result<NaiveDate, AppError> {
    let date: NaiveDate = raw
        .parse()
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;
    if date.year() != year {
        return Err(AppError::bad_request(format!("date must fall in {year}")));
    }
    Ok(date)
}
