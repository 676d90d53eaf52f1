pub fn render_index(year: i32) -> String {
    INDEX_HTML.replace("{{YEAR}}", &year.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Habit Tracker {{YEAR}}</title>
<style>
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
         background: #f4f5f7; color: #24292f; }
  .wrap { max-width: 1100px; margin: 0 auto; padding: 24px 16px; }
  .card { background: #fff; border: 1px solid #d0d7de; border-radius: 8px; padding: 20px;
          margin-bottom: 16px; }
  .hidden { display: none; }
  h1 { font-size: 22px; margin-bottom: 4px; }
  h2 { font-size: 17px; margin-bottom: 12px; }
  .muted { color: #57606a; font-size: 13px; }
  button { cursor: pointer; border: 1px solid #d0d7de; background: #f6f8fa; color: #24292f;
           border-radius: 6px; padding: 6px 12px; font-size: 13px; }
  button:hover { background: #eef1f4; }
  button.primary { background: #2da44e; border-color: #2da44e; color: #fff; }
  button.primary:hover { background: #2c974b; }
  button.danger { color: #cf222e; }
  button:disabled { opacity: 0.5; cursor: default; }
  input, textarea { border: 1px solid #d0d7de; border-radius: 6px; padding: 7px 10px;
                    font-size: 14px; width: 100%; }
  textarea { min-height: 110px; resize: vertical; font-family: inherit; }
  .login-box { max-width: 340px; margin: 80px auto; }
  .login-box .field { margin-bottom: 12px; }
  .error { color: #cf222e; font-size: 13px; margin-bottom: 10px; min-height: 16px; }
  .topbar { display: flex; align-items: center; justify-content: space-between;
            margin-bottom: 16px; }
  .tabs { display: flex; gap: 6px; }
  .tabs button.active { background: #24292f; border-color: #24292f; color: #fff; }
  .usermenu { position: relative; }
  .usermenu .menu { position: absolute; right: 0; top: 36px; background: #fff;
                    border: 1px solid #d0d7de; border-radius: 6px; min-width: 140px;
                    box-shadow: 0 4px 12px rgba(0,0,0,0.1); z-index: 5; }
  .usermenu .menu button { display: block; width: 100%; text-align: left; border: none;
                           background: none; padding: 8px 12px; border-radius: 0; }
  .navbar { display: flex; align-items: center; gap: 12px; margin-bottom: 12px; }
  .navbar .title { font-weight: 600; font-size: 15px; flex: 1; text-align: center; }
  table { border-collapse: collapse; width: 100%; font-size: 13px; }
  th, td { border: 1px solid #d8dee4; padding: 6px; text-align: center; }
  th { background: #f6f8fa; font-weight: 600; }
  th .pct { font-weight: 400; color: #57606a; font-size: 11px; }
  td.habit-name { text-align: left; min-width: 160px; }
  td.habit-name .cat { color: #57606a; font-size: 11px; }
  td.cell { cursor: pointer; width: 34px; height: 30px; }
  td.cell.done { background: #2da44e; }
  td.cell:hover { outline: 2px solid #2da44e; }
  .note-dot { display: inline-block; width: 6px; height: 6px; border-radius: 50%;
              background: #bf8700; margin-left: 3px; vertical-align: middle; }
  .note-btn { border: none; background: none; padding: 0 2px; font-size: 11px; }
  .board { display: flex; gap: 3px; overflow-x: auto; padding-bottom: 6px; }
  .board .col { display: flex; flex-direction: column; gap: 3px; }
  .board .day { width: 12px; height: 12px; border-radius: 2px; background: #ebedf0;
    cursor: pointer; }
  .board .day.out { background: transparent; cursor: default; }
  .board .day.lv1 { background: #9be9a8; }
  .board .day.lv2 { background: #40c463; }
  .board .day.lv3 { background: #30a14e; }
  .board .day.lv4 { background: #216e39; }
  .board .day.today { outline: 2px solid #24292f; }
  .month-row { display: flex; font-size: 11px; color: #57606a; margin-bottom: 4px; }
  .legend { display: flex; align-items: center; gap: 4px; font-size: 11px; color: #57606a;
            margin-top: 8px; }
  .legend .day { width: 12px; height: 12px; border-radius: 2px; }
  .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
           gap: 12px; }
  .stat-card { border: 1px solid #d0d7de; border-radius: 8px; padding: 16px; }
  .stat-card .num { font-size: 28px; font-weight: 700; }
  .addrow { display: flex; gap: 8px; margin-top: 12px; }
  .addrow input { flex: 1; }
  .addrow input.goal { max-width: 90px; }
  .modal-back { position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex;
                align-items: center; justify-content: center; z-index: 10; }
  .modal { background: #fff; border-radius: 8px; padding: 20px; width: 420px;
           max-width: 92vw; }
  .modal .actions { display: flex; gap: 8px; justify-content: flex-end; margin-top: 12px; }
</style>
</head>
<body>
<div class="wrap">
  <div id="login" class="login-box card hidden">
    <h1>Habit Tracker {{YEAR}}</h1>
    <p class="muted" style="margin-bottom:16px">Sign in to keep your streak alive.</p>
    <div id="login-error" class="error"></div>
    <div class="field"><input id="login-user" placeholder="Username" autocomplete="username"></div>
    <div class="field"><input id="login-pass" type="password" placeholder="Password"
         autocomplete="current-password"></div>
    <button class="primary" style="width:100%" onclick="login()">Sign in</button>
  </div>

  <div id="shell" class="hidden">
    <div class="topbar">
      <div>
        <h1>Habit Tracker {{YEAR}}</h1>
        <div class="muted" id="greeting"></div>
      </div>
      <div style="display:flex; gap:10px; align-items:center">
        <div class="tabs">
          <button data-mode="week" onclick="setMode('week')">Week</button>
          <button data-mode="month" onclick="setMode('month')">Month</button>
          <button data-mode="year" onclick="setMode('year')">Year</button>
          <button data-mode="dashboard" onclick="setMode('dashboard')">Dashboard</button>
        </div>
        <div class="usermenu">
          <button onclick="toggleMenu()" id="user-btn"></button>
          <div class="menu hidden" id="user-menu">
            <button onclick="setMode('account')">Account</button>
            <button onclick="logout()">Sign out</button>
          </div>
        </div>
      </div>
    </div>

    <div id="table-view" class="card hidden">
      <div class="navbar">
        <button id="nav-prev" onclick="navigate('navigate_prev')">&larr;</button>
        <div class="title" id="view-title"></div>
        <button id="nav-next" onclick="navigate('navigate_next')">&rarr;</button>
      </div>
      <div style="overflow-x:auto"><table id="habit-table"></table></div>
      <div class="addrow" id="add-row">
        <input id="new-name" placeholder="New habit">
        <input id="new-category" placeholder="Category">
        <input id="new-goal" class="goal" type="number" min="1" placeholder="Goal">
        <button class="primary" onclick="addHabit()">Add</button>
      </div>
    </div>

    <div id="year-view" class="card hidden">
      <div class="navbar"><div class="title" id="board-title"></div></div>
      <div class="month-row" id="month-row"></div>
      <div class="board" id="board"></div>
      <div class="legend">Less
        <span class="day" style="background:#ebedf0"></span>
        <span class="day lv1"></span><span class="day lv2"></span>
        <span class="day lv3"></span><span class="day lv4"></span>
      More</div>
      <p class="muted" id="board-total" style="margin-top:8px"></p>
    </div>

    <div id="dash-view" class="card hidden">
      <h2>Dashboard</h2>
      <div class="cards" id="dash-cards"></div>
    </div>

    <div id="account-view" class="card hidden">
      <h2>Account</h2>
      <p id="account-info" class="muted" style="margin-bottom:12px"></p>
      <button class="danger" onclick="logout()">Sign out</button>
    </div>
  </div>
</div>

<div id="note-modal" class="modal-back hidden">
  <div class="modal">
    <h2 id="note-title"></h2>
    <textarea id="note-body" placeholder="How did the day go?"></textarea>
    <div class="actions">
      <button onclick="closeNote()">Cancel</button>
      <button class="danger" onclick="saveNote(true)">Delete</button>
      <button class="primary" onclick="saveNote(false)">Save</button>
    </div>
  </div>
</div>

<script>
let user = localStorage.getItem('authUser');
let viewState = null;
let viewMeta = { title: '', can_prev: false, can_next: false };

async function api(path, options) {
  const res = await fetch(path, options);
  if (!res.ok) { throw new Error(await res.text()); }
  if (res.status === 204) { return null; }
  return res.json();
}

function jsonBody(payload) {
  return { method: 'POST', headers: { 'Content-Type': 'application/json' },
           body: JSON.stringify(payload) };
}

async function login() {
  const username = document.getElementById('login-user').value.trim();
  const password = document.getElementById('login-pass').value;
  const errorBox = document.getElementById('login-error');
  errorBox.textContent = '';
  try {
    const out = await api('/api/login', jsonBody({ username, password }));
    user = out.username;
    localStorage.setItem('authUser', user);
    boot();
  } catch (err) {
    errorBox.textContent = err.message || 'Login failed';
  }
}

function logout() {
  localStorage.removeItem('authUser');
  user = null;
  viewState = null;
  show('login');
}

function show(which) {
  document.getElementById('login').classList.toggle('hidden', which !== 'login');
  document.getElementById('shell').classList.toggle('hidden', which === 'login');
}

async function boot() {
  if (!user) { show('login'); return; }
  show('shell');
  document.getElementById('greeting').textContent = 'Signed in as ' + user;
  document.getElementById('user-btn').textContent = user + ' ▾';
  const out = await api('/api/view');
  applyView(out);
  render();
}

function applyView(out) {
  viewState = out.state;
  viewMeta = out;
  document.getElementById('user-menu').classList.toggle('hidden', !viewState.user_menu_open);
}

async function transition(event) {
  const out = await api('/api/view', jsonBody({ state: viewState, event }));
  applyView(out);
  render();
}

function setMode(mode) { transition({ type: 'set_mode', mode }); }
function navigate(type) { transition({ type }); }
function toggleMenu() { transition({ type: 'toggle_user_menu' }); }

async function render() {
  const mode = viewState.mode;
  document.querySelectorAll('.tabs button').forEach(btn => {
    btn.classList.toggle('active', btn.dataset.mode === mode);
  });
  document.getElementById('table-view').classList.toggle('hidden',
    mode !== 'week' && mode !== 'month');
  document.getElementById('year-view').classList.toggle('hidden', mode !== 'year');
  document.getElementById('dash-view').classList.toggle('hidden', mode !== 'dashboard');
  document.getElementById('account-view').classList.toggle('hidden', mode !== 'account');

  if (mode === 'week' || mode === 'month') { await renderTable(); }
  else if (mode === 'year') { await renderBoard(); }
  else if (mode === 'dashboard') { await renderDashboard(); }
  else { await renderAccount(); }
}

async function renderTable() {
  const index = viewState.mode === 'week' ? viewState.week : viewState.month;
  const stats = await api('/api/stats?username=' + encodeURIComponent(user)
    + '&view=' + viewState.mode + '&index=' + index);
  document.getElementById('view-title').textContent = stats.title;
  document.getElementById('nav-prev').disabled = !stats.can_prev;
  document.getElementById('nav-next').disabled = !stats.can_next;

  let head = '<tr><th>Habit</th>';
  for (const day of stats.dates) {
    head += '<th>' + day.weekday + ' ' + day.day
      + (day.has_note ? '<span class="note-dot"></span>' : '')
      + '<button class="note-btn" title="Note" onclick="openNote(\'' + day.date + '\')">&#9998;</button>'
      + '<div class="pct">' + day.percentage + '%</div></th>';
  }
  head += '<th>Progress</th><th></th></tr>';

  let body = '';
  for (const row of stats.rows) {
    const habit = row.habit;
    body += '<tr><td class="habit-name">' + escapeHtml(habit.name)
      + '<div class="cat">' + escapeHtml(habit.category) + '</div></td>';
    for (const day of stats.dates) {
      const done = habit.completedDays[day.date] === true;
      body += '<td class="cell' + (done ? ' done' : '')
        + '" onclick="toggleDay(\'' + habit.id + '\',\'' + day.date + '\')"></td>';
    }
    body += '<td>' + row.progress.completed + '/' + row.progress.total
      + ' (' + row.progress.percentage + '%)</td>';
    body += '<td><button class="danger" onclick="removeHabit(\'' + habit.id + '\')">&times;</button></td></tr>';
  }
  if (!stats.rows.length) {
    body = '<tr><td colspan="' + (stats.dates.length + 3)
      + '" class="muted">No habits yet. Add one below.</td></tr>';
  }
  document.getElementById('habit-table').innerHTML = head + body;
}

async function renderBoard() {
  const board = await api('/api/board?username=' + encodeURIComponent(user));
  document.getElementById('board-title').textContent = board.year + ' Full Year';
  document.getElementById('board-total').textContent =
    board.total_completions + ' completions logged in ' + board.year;

  let months = '';
  for (const span of board.months) {
    months += '<div style="width:' + (span.span * 15) + 'px">' + span.label + '</div>';
  }
  document.getElementById('month-row').innerHTML = months;

  let cols = '';
  for (const week of board.weeks) {
    let col = '<div class="col">';
    for (const cell of week) {
      if (!cell.in_year) { col += '<div class="day out"></div>'; continue; }
      const today = cell.date === board.today ? ' today' : '';
      const level = cell.level > 0 ? ' lv' + cell.level : '';
      col += '<div class="day' + level + today + '" title="' + cell.date + ': '
        + cell.percentage + '%" onclick="openNote(\'' + cell.date + '\')"></div>';
    }
    col += '</div>';
    cols += col;
  }
  document.getElementById('board').innerHTML = cols;
}

async function renderDashboard() {
  const overview = await api('/api/overview?username=' + encodeURIComponent(user));
  const cards = [
    ['Habits', overview.total_habits],
    ['Current streak', overview.streak_display + ' days'],
    ['Longest streak', overview.longest_streak + ' days'],
    ['Total completions', overview.total_completions],
  ];
  document.getElementById('dash-cards').innerHTML = cards.map(card =>
    '<div class="stat-card"><div class="muted">' + card[0]
    + '</div><div class="num">' + card[1] + '</div></div>').join('');
}

async function renderAccount() {
  const overview = await api('/api/overview?username=' + encodeURIComponent(user));
  document.getElementById('account-info').textContent =
    user + ' · ' + overview.total_habits + ' habits · '
    + overview.total_completions + ' completions';
}

async function toggleDay(id, date) {
  await api('/api/habits/' + id + '/toggle', jsonBody({ username: user, date }));
  render();
}

async function addHabit() {
  const name = document.getElementById('new-name').value.trim();
  if (!name) { return; }
  const category = document.getElementById('new-category').value.trim();
  const goal = parseInt(document.getElementById('new-goal').value, 10);
  await api('/api/habits', jsonBody({ username: user, name, category,
    goal: isNaN(goal) ? null : goal }));
  document.getElementById('new-name').value = '';
  document.getElementById('new-category').value = '';
  document.getElementById('new-goal').value = '';
  render();
}

async function removeHabit(id) {
  if (!confirm('Delete this habit and its history?')) { return; }
  await api('/api/habits/' + id + '?username=' + encodeURIComponent(user),
    { method: 'DELETE' });
  render();
}

async function openNote(date) {
  const out = await api('/api/notes?username=' + encodeURIComponent(user));
  await transition({ type: 'open_note', date });
  document.getElementById('note-title').textContent = 'Note for ' + date;
  document.getElementById('note-body').value = out.notes[date] || '';
  document.getElementById('note-modal').classList.remove('hidden');
}

function closeNote() {
  document.getElementById('note-modal').classList.add('hidden');
  transition({ type: 'close_note' });
}

async function saveNote(remove) {
  const date = viewState.selected_date;
  const body = remove ? '' : document.getElementById('note-body').value;
  await api('/api/notes', { method: 'PUT',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ username: user, date, body }) });
  closeNote();
}

function escapeHtml(text) {
  const div = document.createElement('div');
  div.textContent = text;
  return div.innerHTML;
}

document.getElementById('login-pass').addEventListener('keydown', event => {
  if (event.key === 'Enter') { login(); }
});

boot();
</script>
</body>
</html>
"##;
