use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/login", post(handlers::login))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route(
            "/api/notes",
            get(handlers::get_notes).put(handlers::save_note),
        )
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/board", get(handlers::get_board))
        .route("/api/overview", get(handlers::get_overview))
        .route(
            "/api/view",
            get(handlers::init_view).post(handlers::transition_view),
        )
        .with_state(state)
}
