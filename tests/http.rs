use chrono::Datelike;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitWire {
    id: String,
    name: String,
    category: String,
    goal: u32,
    #[serde(default)]
    completed_days: BTreeMap<String, bool>,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct ProgressWire {
    completed: usize,
    total: usize,
    percentage: u32,
}

#[derive(Debug, Deserialize)]
struct RowWire {
    habit: HabitWire,
    progress: ProgressWire,
}

#[derive(Debug, Deserialize)]
struct DayWire {
    date: String,
    weekday: String,
    day: u32,
    has_note: bool,
    percentage: u32,
}

#[derive(Debug, Deserialize)]
struct StreaksWire {
    current: u32,
    longest: u32,
}

#[derive(Debug, Deserialize)]
struct StatsWire {
    view: String,
    index: i32,
    title: String,
    can_prev: bool,
    can_next: bool,
    dates: Vec<DayWire>,
    rows: Vec<RowWire>,
    streaks: StreaksWire,
    streak_display: String,
}

#[derive(Debug, Deserialize)]
struct CellWire {
    date: String,
    in_year: bool,
    percentage: u32,
    level: u8,
    has_note: bool,
}

#[derive(Debug, Deserialize)]
struct MonthWire {
    label: String,
    start: usize,
    span: usize,
}

#[derive(Debug, Deserialize)]
struct BoardWire {
    year: i32,
    today: String,
    total_completions: usize,
    months: Vec<MonthWire>,
    weeks: Vec<Vec<CellWire>>,
}

#[derive(Debug, Deserialize)]
struct NotesWire {
    notes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ViewStateWire {
    mode: String,
    week: i32,
    month: i32,
    selected_date: Option<String>,
    note_open: bool,
    add_habit_open: bool,
    user_menu_open: bool,
}

#[derive(Debug, Deserialize)]
struct ViewWire {
    title: String,
    can_prev: bool,
    can_next: bool,
    state: ViewStateWire,
}

struct TestServer {
    base_url: String,
    year: i32,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "habit_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

fn today_key() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/health")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    // Track the year of the test run so "today" always falls inside it.
    let year = chrono::Local::now().year();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("APP_YEAR", year.to_string())
        .env("APP_USERS", "maya:maya1,noah:noah1")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        year,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn create_habit(server: &TestServer, client: &Client, username: &str, name: &str) -> HabitWire {
    client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "username": username, "name": name, "category": "Test" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn toggle_habit(server: &TestServer, client: &Client, username: &str, id: &str, date: &str) -> HabitWire {
    client
        .post(format!("{}/api/habits/{id}/toggle", server.base_url))
        .json(&serde_json::json!({ "username": username, "date": date }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_login_accepts_known_user() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "username": " maya ", "password": "maya1" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "maya");
}

#[tokio::test]
async fn http_login_rejects_bad_credentials() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let unknown = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "username": "zoe", "password": "maya1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status().as_u16(), 401);

    let wrong = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "username": "maya", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 401);
    assert_eq!(wrong.text().await.unwrap(), "incorrect password");
}

#[tokio::test]
async fn http_habit_lifecycle() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = today_key();

    let habit = create_habit(&server, &client, "lifecycle", "Read").await;
    assert_eq!(habit.name, "Read");
    assert_eq!(habit.category, "Test");
    assert_eq!(habit.goal, 30);
    assert!(habit.completed_days.is_empty());
    assert!(!habit.created_at.is_empty());

    let toggled = toggle_habit(&server, &client, "lifecycle", &habit.id, &today).await;
    assert_eq!(toggled.completed_days.get(&today), Some(&true));

    let untoggled = toggle_habit(&server, &client, "lifecycle", &habit.id, &today).await;
    assert!(!untoggled.completed_days.contains_key(&today));

    let deleted = client
        .delete(format!(
            "{}/api/habits/{}?username=lifecycle",
            server.base_url, habit.id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let listed: serde_json::Value = client
        .get(format!("{}/api/habits?username=lifecycle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["habits"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn http_habit_category_defaults_to_uncategorized() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let omitted: HabitWire = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "username": "plain", "name": "Journal" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(omitted.category, "Uncategorized");
    assert_eq!(omitted.goal, 30);

    let blank: HabitWire = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "username": "plain", "name": "Stretch", "category": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(blank.category, "Uncategorized");
    assert_eq!(blank.name, "Stretch");
}

#[tokio::test]
async fn http_rejects_invalid_writes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let blank = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "username": "strict", "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status().as_u16(), 400);

    let habit = create_habit(&server, &client, "strict", "Run").await;

    let out_of_year = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .json(&serde_json::json!({
            "username": "strict",
            "date": format!("{}-06-15", server.year - 1),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(out_of_year.status().as_u16(), 400);

    let garbled = client
        .post(format!("{}/api/habits/{}/toggle", server.base_url, habit.id))
        .json(&serde_json::json!({ "username": "strict", "date": "June 15" }))
        .send()
        .await
        .unwrap();
    assert_eq!(garbled.status().as_u16(), 400);

    let missing = client
        .post(format!("{}/api/habits/nope/toggle", server.base_url))
        .json(&serde_json::json!({ "username": "strict", "date": today_key() }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let gone = client
        .delete(format!(
            "{}/api/habits/nope?username=strict",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn http_stats_reflect_completions() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = today_key();

    let habit = create_habit(&server, &client, "statser", "Meditate").await;
    toggle_habit(&server, &client, "statser", &habit.id, &today).await;

    let stats: StatsWire = client
        .get(format!(
            "{}/api/stats?username=statser&view=year",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats.view, "year");
    assert_eq!(stats.index, 0);
    assert!(stats.dates.len() >= 365);
    assert!(!stats.can_prev);
    assert!(!stats.can_next);
    assert!(stats.title.contains("Full Year"));
    assert_eq!(stats.rows.len(), 1);
    assert_eq!(stats.rows[0].progress.completed, 1);
    assert!(stats.rows[0].progress.total >= 365);
    assert_eq!(stats.rows[0].progress.percentage, 0);
    assert_eq!(stats.streaks.current, 1);
    assert_eq!(stats.streaks.longest, 1);
    assert_eq!(stats.streak_display, "1");

    let today_header = stats.dates.iter().find(|day| day.date == today).unwrap();
    assert_eq!(today_header.percentage, 100);
    assert!(today_header.day >= 1);
    assert!(!today_header.weekday.is_empty());
}

#[tokio::test]
async fn http_stats_week_view_shape() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let stats: StatsWire = client
        .get(format!(
            "{}/api/stats?username=weekling&view=week&index=0",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats.view, "week");
    assert_eq!(stats.index, 0);
    assert_eq!(stats.dates.len(), 7);
    assert_eq!(stats.dates[0].weekday, "Mon");
    assert!(stats.title.starts_with("Week 1 ("));
    assert!(!stats.can_prev);
    assert!(stats.can_next);
    assert!(stats.rows.is_empty());
    for day in &stats.dates {
        assert_eq!(day.percentage, 0);
        assert!(!day.has_note);
    }
}

#[tokio::test]
async fn http_board_covers_the_year() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = today_key();

    let habit = create_habit(&server, &client, "boarder", "Stretch").await;
    toggle_habit(&server, &client, "boarder", &habit.id, &today).await;

    let board: BoardWire = client
        .get(format!("{}/api/board?username=boarder", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(board.year, server.year);
    assert_eq!(board.today, today);
    assert_eq!(board.total_completions, 1);
    assert_eq!(board.months.len(), 12);
    assert_eq!(board.months[0].label, "Jan");
    assert_eq!(board.months[0].start, 0);

    let total_days: usize = board.weeks.iter().map(Vec::len).sum();
    assert!(total_days >= 365);
    for week in &board.weeks {
        assert!(week.len() <= 7);
    }
    let spanned: usize = board.months.iter().map(|month| month.span).sum();
    assert_eq!(spanned, board.weeks.len());

    let cell = board
        .weeks
        .iter()
        .flatten()
        .find(|cell| cell.date == today)
        .unwrap();
    assert!(cell.in_year);
    assert_eq!(cell.percentage, 100);
    assert_eq!(cell.level, 4);
    assert!(!cell.has_note);

    for cell in board.weeks.iter().flatten().filter(|cell| !cell.in_year) {
        assert_eq!(cell.level, 0);
    }
}

#[tokio::test]
async fn http_notes_roundtrip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = today_key();

    let saved: NotesWire = client
        .put(format!("{}/api/notes", server.base_url))
        .json(&serde_json::json!({
            "username": "scribe",
            "date": today,
            "body": "went for a long walk",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved.notes.get(&today).map(String::as_str), Some("went for a long walk"));

    let fetched: NotesWire = client
        .get(format!("{}/api/notes?username=scribe", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.notes.len(), 1);

    // An empty body clears the note.
    let cleared: NotesWire = client
        .put(format!("{}/api/notes", server.base_url))
        .json(&serde_json::json!({ "username": "scribe", "date": today, "body": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cleared.notes.is_empty());

    let bad_date = client
        .put(format!("{}/api/notes", server.base_url))
        .json(&serde_json::json!({ "username": "scribe", "date": "someday", "body": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_date.status().as_u16(), 400);
}

#[tokio::test]
async fn http_view_state_machine() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let initial: ViewWire = client
        .get(format!("{}/api/view", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(initial.state.mode, "week");
    assert!((0..=51).contains(&initial.state.week));
    assert_eq!(initial.state.month, 0);
    assert!(!initial.state.note_open);
    assert!(!initial.state.add_habit_open);
    assert!(!initial.state.user_menu_open);
    assert_eq!(initial.state.selected_date, None);
    assert!(initial.title.starts_with("Week "));

    let to_month: ViewWire = client
        .post(format!("{}/api/view", server.base_url))
        .json(&serde_json::json!({
            "state": {
                "mode": "week", "week": 0, "month": 0, "selected_date": null,
                "note_open": false, "add_habit_open": false, "user_menu_open": true,
            },
            "event": { "type": "set_mode", "mode": "month" },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(to_month.state.mode, "month");
    assert!(!to_month.state.user_menu_open);
    assert_eq!(to_month.title, "January");
    assert!(!to_month.can_prev);
    assert!(to_month.can_next);

    let advanced: ViewWire = client
        .post(format!("{}/api/view", server.base_url))
        .json(&serde_json::json!({
            "state": {
                "mode": "month", "week": 0, "month": 0, "selected_date": null,
                "note_open": false, "add_habit_open": false, "user_menu_open": false,
            },
            "event": { "type": "navigate_next" },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(advanced.state.month, 1);
    assert_eq!(advanced.title, "February");
    assert!(advanced.can_prev);

    let pinned: ViewWire = client
        .post(format!("{}/api/view", server.base_url))
        .json(&serde_json::json!({
            "state": {
                "mode": "week", "week": 0, "month": 0, "selected_date": null,
                "note_open": false, "add_habit_open": false, "user_menu_open": false,
            },
            "event": { "type": "navigate_prev" },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pinned.state.week, 0);
    assert!(!pinned.can_prev);
}

#[tokio::test]
async fn http_notes_visible_in_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let today = today_key();

    let put = client
        .put(format!("{}/api/notes", server.base_url))
        .json(&serde_json::json!({
            "username": "noter",
            "date": today,
            "body": "remember this day",
        }))
        .send()
        .await
        .unwrap();
    assert!(put.status().is_success());

    let stats: StatsWire = client
        .get(format!(
            "{}/api/stats?username=noter&view=year",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let header = stats.dates.iter().find(|day| day.date == today).unwrap();
    assert!(header.has_note);
}
