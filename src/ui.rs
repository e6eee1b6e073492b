use crate::models::STARTING_CHIPS;

pub fn render_index() -> String {
    INDEX_HTML.replace("{{STARTING}}", &STARTING_CHIPS.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Poker Night Scores</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #0f3b2e;
      --bg-2: #1b5e45;
      --ink: #2b2a28;
      --accent: #c8553d;
      --accent-2: #2f4858;
      --positive: #1f8a4c;
      --negative: #c0392b;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.25);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #14493a 60%, #0b2c22 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #6b645d;
    }

    input {
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font: inherit;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid rgba(47, 72, 88, 0.3);
    }

    .score-entry,
    .session-player-row {
      display: grid;
      grid-template-columns: 48px 1fr auto auto;
      gap: 12px;
      padding: 8px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .rank-badge {
      display: inline-grid;
      place-items: center;
      width: 28px;
      height: 28px;
      border-radius: 50%;
      color: white;
      font-weight: 600;
    }

    .rank-1 { background: #d4af37; }
    .rank-2 { background: #a8a9ad; }
    .rank-3 { background: #b87333; }
    .rank-4 { background: transparent; color: var(--ink); }

    .positive { color: var(--positive); }
    .negative { color: var(--negative); }

    .session-card {
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 18px;
      padding: 14px 18px;
      margin-bottom: 12px;
    }

    .session-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      font-weight: 600;
    }

    .empty-state {
      color: #8b857d;
      font-style: italic;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Poker Night Scores</h1>
    </header>

    <section>
      <form id="score-form">
        <label>Date <input type="date" id="session-date" required /></label>
        <label>Player <input type="text" id="player-name" required /></label>
        <label>Starting <input type="number" id="starting-chips" value="{{STARTING}}" /></label>
        <label>Ending <input type="number" id="ending-chips" required /></label>
        <label>Net <input type="text" id="net-amount" readonly tabindex="-1" /></label>
        <button type="submit">Record</button>
      </form>
      <div class="status" id="status"></div>
    </section>

    <section>
      <h2>Standings</h2>
      <div id="standings"></div>
    </section>

    <section>
      <h2>Streaks</h2>
      <div id="streaks"></div>
    </section>

    <section>
      <h2>By year</h2>
      <div id="yearly"></div>
    </section>

    <section>
      <h2>History</h2>
      <div id="history"></div>
      <button type="button" class="ghost" id="clear-all">Clear all data</button>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const form = document.getElementById('score-form');
    const dateInput = document.getElementById('session-date');

    const startingInput = document.getElementById('starting-chips');
    const endingInput = document.getElementById('ending-chips');
    const netInput = document.getElementById('net-amount');

    dateInput.valueAsDate = new Date();

    const setStatus = (message) => {
      statusEl.textContent = message;
    };

    const escapeHtml = (value) =>
      String(value).replace(/[&<>"']/g, (ch) => `&#${ch.charCodeAt(0)};`);

    const signed = (value) =>
      value >= 0 ? `+${value.toLocaleString()}` : value.toLocaleString();

    const netClass = (value) => (value >= 0 ? 'positive' : 'negative');

    const updateNet = () => {
      if (endingInput.value === '') {
        netInput.value = '';
        netInput.className = '';
        return;
      }
      const net = (parseInt(endingInput.value, 10) || 0) - (parseInt(startingInput.value, 10) || 0);
      netInput.value = signed(net);
      netInput.className = netClass(net);
    };

    startingInput.addEventListener('input', updateNet);
    endingInput.addEventListener('input', updateNet);

    const renderStandings = (rows) => {
      const el = document.getElementById('standings');
      if (!rows.length) {
        el.innerHTML = '<div class="empty-state">No scores yet. Add your first session entry above.</div>';
        return;
      }
      el.innerHTML = rows
        .map((row) => `
          <div class="score-entry">
            <span class="rank-badge rank-${row.display_rank}">${row.rank}</span>
            <span>${escapeHtml(row.player)}</span>
            <span>${row.chips.toLocaleString()} chips</span>
            <span class="${netClass(row.total)}">${signed(row.total)}</span>
          </div>`)
        .join('');
    };

    const renderStreaks = (rows) => {
      const el = document.getElementById('streaks');
      if (!rows.length) {
        el.innerHTML = '<div class="empty-state">No active streaks.</div>';
        return;
      }
      el.innerHTML = rows
        .map((row) => {
          const text = row.win > 0 ? `${row.win} win${row.win > 1 ? 's' : ''}` : `${row.loss} loss${row.loss > 1 ? 'es' : ''}`;
          const cls = row.win > 0 ? 'positive' : 'negative';
          return `<div class="score-entry"><span></span><span>${escapeHtml(row.player)}</span><span></span><span class="${cls}">${text}</span></div>`;
        })
        .join('');
    };

    const renderYearly = (years) => {
      const el = document.getElementById('yearly');
      if (!years.length) {
        el.innerHTML = '<div class="empty-state">No yearly totals yet.</div>';
        return;
      }
      el.innerHTML = years
        .map((year) => `
          <div class="session-card">
            <div class="session-header"><span>${escapeHtml(year.year)}</span></div>
            ${year.players
              .map((p) => `<div class="session-player-row"><span></span><span>${escapeHtml(p.player)}</span><span></span><span class="${netClass(p.total)}">${signed(p.total)}</span></div>`)
              .join('')}
          </div>`)
        .join('');
    };

    const renderHistory = (cards) => {
      const el = document.getElementById('history');
      if (!cards.length) {
        el.innerHTML = '<div class="empty-state">No sessions yet. Add your first session entry above.</div>';
        return;
      }
      el.innerHTML = cards
        .map((card) => `
          <div class="session-card">
            <div class="session-header">
              <span>${escapeHtml(card.label)}</span>
              <button type="button" class="ghost" data-date="${escapeHtml(card.date)}">Delete</button>
            </div>
            ${card.players
              .map((p) => `<div class="session-player-row"><span></span><span>${escapeHtml(p.player)}</span><span>${p.ending.toLocaleString()}</span><span class="${netClass(p.net)}">${signed(p.net)}</span></div>`)
              .join('')}
          </div>`)
        .join('');
    };

    const render = (board) => {
      renderStandings(board.standings);
      renderStreaks(board.streaks);
      renderYearly(board.yearly);
      renderHistory(board.history);
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.error || 'Request failed');
      }
      return res.json();
    };

    const loadBoard = async () => {
      try {
        render(await request('/api/board'));
      } catch (err) {
        console.error(err);
        render({ standings: [], streaks: [], yearly: [], history: [] });
      }
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const date = dateInput.value;
      const player = document.getElementById('player-name').value.trim();
      const starting = parseInt(document.getElementById('starting-chips').value, 10);
      const ending = parseInt(document.getElementById('ending-chips').value, 10);
      if (!date || !player || Number.isNaN(starting) || Number.isNaN(ending)) {
        return;
      }

      request('/api/entries', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ date, player, starting, ending })
      })
        .then((res) => {
          if (!res.saved) {
            console.error('Session recorded but not saved to disk');
          }
          render(res.board);
          form.reset();
          updateNet();
          dateInput.value = date;
          document.getElementById('player-name').focus();
        })
        .catch((err) => setStatus(err.message));
    });

    document.getElementById('history').addEventListener('click', (event) => {
      const date = event.target.dataset && event.target.dataset.date;
      if (!date || !confirm(`Delete the session on ${date}?`)) {
        return;
      }
      request(`/api/sessions/${encodeURIComponent(date)}`, { method: 'DELETE' })
        .then(render)
        .catch((err) => setStatus(err.message));
    });

    document.getElementById('clear-all').addEventListener('click', () => {
      if (!confirm('Are you sure you want to delete all session data? This cannot be undone.')) {
        return;
      }
      request('/api/sessions', { method: 'DELETE' })
        .then(render)
        .catch((err) => setStatus(err.message));
    });

    loadBoard();
  </script>
</body>
</html>
"#;
