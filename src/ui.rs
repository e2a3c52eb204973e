use crate::models::FeedItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    Empty,
    Error,
}

impl Notice {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "saved" => Some(Self::Saved),
            "empty" => Some(Self::Empty),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Empty => "empty",
            Self::Error => "error",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Saved => "Your entry was saved securely. Thank you for sharing. 💛",
            Self::Empty => "Please write something in your journal entry.",
            Self::Error => "We couldn't save your entry due to a storage issue. Please try again later.",
        }
    }

    fn kind(self) -> &'static str {
        match self {
            Self::Saved => "ok",
            Self::Empty | Self::Error => "error",
        }
    }
}

pub fn render_index(notice: Option<Notice>) -> String {
    let banner = notice
        .map(|notice| {
            format!(
                r#"<p class="notice" data-type="{}">{}</p>"#,
                notice.kind(),
                escape_html(notice.message())
            )
        })
        .unwrap_or_default();

    INDEX_HTML
        .replace("{{STYLE}}", SHARED_STYLE)
        .replace("{{NOTICE}}", &banner)
}

pub fn render_feed(items: &[FeedItem]) -> String {
    let cards = if items.is_empty() {
        r#"<p class="hint">No entries yet. Be the first to share.</p>"#.to_string()
    } else {
        items
            .iter()
            .map(|item| {
                format!(
                    r#"<article class="entry">
      <header><span class="alias">{alias}</span><span class="label">{label}</span></header>
      <p>{snippet}</p>
      <time datetime="{iso}">{when}</time>
    </article>"#,
                    alias = escape_html(&item.user_alias),
                    label = escape_html(&item.emotion_label),
                    snippet = escape_html(&item.snippet),
                    iso = item.created_at.to_rfc3339(),
                    when = item.created_at.format("%Y-%m-%d %H:%M UTC"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n    ")
    };

    FEED_HTML
        .replace("{{STYLE}}", SHARED_STYLE)
        .replace("{{ENTRIES}}", &cards)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const SHARED_STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f1ea;
      --bg-2: #f7d9a8;
      --ink: #2b2a28;
      --accent: #f2a541;
      --accent-2: #3d5a6c;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(61, 90, 108, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #fdebd0 60%, #f7f3ec 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    nav a {
      color: var(--accent-2);
      font-weight: 600;
    }

    .subtitle,
    .hint {
      margin: 0;
      color: #6f6a65;
    }

    form {
      display: grid;
      gap: 12px;
    }

    input[type="text"],
    textarea {
      font: inherit;
      padding: 12px 14px;
      border-radius: 14px;
      border: 1px solid rgba(61, 90, 108, 0.2);
      background: white;
    }

    textarea {
      min-height: 140px;
      resize: vertical;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    .notice {
      margin: 0;
      padding: 12px 16px;
      border-radius: 14px;
      background: rgba(45, 122, 75, 0.1);
      color: #2d7a4b;
    }

    .notice[data-type="error"] {
      background: rgba(198, 59, 43, 0.1);
      color: #c63b2b;
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal</title>
  <style>
    {{STYLE}}

    .filter {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .filter input {
      flex: 1 1 200px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(61, 90, 108, 0.08);
    }

    #moodChart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(61, 90, 108, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .status {
      min-height: 1.2em;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Journal</h1>
      <p class="subtitle">Write freely. Entries are stored under an alias, or none at all.</p>
      <nav><a href="/feed">Read the community feed</a></nav>
    </header>

    {{NOTICE}}

    <section>
      <form method="post" action="/entry">
        <input type="text" name="alias" placeholder="Alias (optional)" maxlength="64" />
        <textarea name="entry" placeholder="How are you feeling today?"></textarea>
        <label><input type="checkbox" name="anonymous" /> Post anonymously</label>
        <button type="submit">Save entry</button>
      </form>
    </section>

    <section>
      <h2>Joy % over time</h2>
      <div class="filter">
        <input type="text" id="filterAlias" placeholder="Filter by alias" />
        <button type="button" id="loadBtn">Load</button>
      </div>
      <p class="status" id="chartStatus"></p>
      <div class="chart-card">
        <svg id="moodChart" viewBox="0 0 600 260" role="img" aria-label="Joy percentage over time"></svg>
      </div>
    </section>
  </main>

  <script>
    // Owns one chart surface. Each load takes a ticket; a response whose
    // ticket is no longer current is dropped so it cannot replace newer data.
    class ChartSession {
      constructor(svg, statusEl) {
        this.svg = svg;
        this.statusEl = statusEl;
        this.ticket = 0;
      }

      setStatus(message, type) {
        this.statusEl.textContent = message;
        this.statusEl.dataset.type = type || '';
      }

      async load(alias) {
        const ticket = ++this.ticket;
        const url = alias ? `/api/series?alias=${encodeURIComponent(alias)}` : '/api/series';
        this.setStatus('Loading...', 'info');
        try {
          const res = await fetch(url);
          if (!res.ok) {
            throw new Error('Unable to load joy series');
          }
          const points = await res.json();
          if (ticket !== this.ticket) {
            return;
          }
          this.replace(points.filter((point) => point.x !== null));
          this.setStatus(alias ? `Showing entries for "${alias}".` : 'Showing all entries.', 'ok');
        } catch (err) {
          if (ticket === this.ticket) {
            this.setStatus(err.message, 'error');
          }
        }
      }

      replace(points) {
        this.destroy();
        this.draw(points);
      }

      destroy() {
        this.svg.innerHTML = '';
      }

      draw(points) {
        if (!points.length) {
          this.svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No entries yet</text>';
          return;
        }

        const width = 600;
        const height = 260;
        const paddingX = 44;
        const paddingY = 34;
        const top = 20;

        const ys = points.map((point) => point.y);
        const minY = Math.min(0, ...ys);
        const maxY = Math.max(100, ...ys);
        let minX = points[0].x;
        let maxX = points[points.length - 1].x;
        if (minX === maxX) {
          minX -= 12 * 3600 * 1000;
          maxX += 12 * 3600 * 1000;
        }

        const x = (value) => paddingX + ((value - minX) / (maxX - minX)) * (width - paddingX * 2);
        const y = (value) => height - paddingY - ((value - minY) / (maxY - minY)) * (height - top - paddingY);

        let grid = '';
        for (let i = 0; i <= 4; i += 1) {
          const value = minY + ((maxY - minY) * i) / 4;
          grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
          grid += `<text class="chart-label" x="${paddingX - 10}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}%</text>`;
        }

        let xLabels = '';
        const labelCount = 5;
        for (let i = 0; i <= labelCount; i += 1) {
          const value = minX + ((maxX - minX) * i) / labelCount;
          const day = new Date(value).toISOString().slice(5, 10);
          xLabels += `<text class="chart-label" x="${x(value)}" y="${height - paddingY + 18}" text-anchor="middle">${day}</text>`;
        }

        const path = points
          .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(point.x).toFixed(2)} ${y(point.y).toFixed(2)}`)
          .join(' ');

        const circles = points
          .map((point) => `<circle class="chart-point" cx="${x(point.x)}" cy="${y(point.y)}" r="4"><title>Joy: ${point.y}%</title></circle>`)
          .join('');

        this.svg.innerHTML = `${grid}<path class="chart-line" d="${path}" />${circles}${xLabels}`;
      }
    }

    document.addEventListener('DOMContentLoaded', () => {
      const session = new ChartSession(
        document.getElementById('moodChart'),
        document.getElementById('chartStatus')
      );
      session.load();

      document.getElementById('loadBtn').addEventListener('click', () => {
        const alias = document.getElementById('filterAlias').value.trim();
        session.load(alias || undefined);
      });
    });
  </script>
</body>
</html>
"#;

const FEED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal · Feed</title>
  <style>
    {{STYLE}}

    .entry {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(61, 90, 108, 0.08);
      display: grid;
      gap: 8px;
    }

    .entry header {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .entry .alias {
      font-weight: 600;
    }

    .entry .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--accent-2);
    }

    .entry p {
      margin: 0;
      white-space: pre-wrap;
    }

    .entry time {
      font-size: 0.85rem;
      color: #8b857d;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Community feed</h1>
      <p class="subtitle">Recent entries, shown by alias only.</p>
      <nav><a href="/">Back to your journal</a></nav>
    </header>

    {{ENTRIES}}
  </main>
</body>
</html>
"#;
