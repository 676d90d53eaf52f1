pub mod app;
pub mod auth;
pub mod board;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streaks;
pub mod ui;
pub mod view;

pub use app::router;
pub use board::{intensity_level, month_spans, year_weeks};
pub use dates::{enumerate_dates, week_index_for, RangeSelector};
pub use progress::{daily_progress, progress_for_habit, total_completions};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
pub use streaks::{compute_streaks, format_streak};
