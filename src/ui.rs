use crate::chart::{ChartSeries, Histogram, LineSeries};
use crate::models::ItemKind;
use crate::stats::ItemStats;
use crate::view::ItemCard;
use crate::window::TimeWindow;
use std::fmt::Write;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 220.0;
const CHART_PAD_X: f64 = 40.0;
const CHART_PAD_TOP: f64 = 20.0;
const CHART_PAD_BOTTOM: f64 = 34.0;

pub fn render_index(cards: &[ItemCard], window: TimeWindow) -> String {
    INDEX_HTML
        .replace("{{TABS}}", &render_tabs(window))
        .replace("{{WINDOW}}", window.as_str())
        .replace("{{ITEMS}}", &render_items(cards))
}

fn render_tabs(active: TimeWindow) -> String {
    TimeWindow::CHOICES
        .iter()
        .map(|window| {
            let class = if *window == active { "tab active" } else { "tab" };
            format!(r#"<a class="{class}" href="/?window={window}">{window}</a>"#)
        })
        .collect()
}

fn render_items(cards: &[ItemCard]) -> String {
    if cards.is_empty() {
        return r#"<p class="no-tasks">No tasks yet. Add your first task above!</p>"#.to_string();
    }
    cards.iter().map(render_card).collect()
}

fn render_card(card: &ItemCard) -> String {
    let id = escape_html(&card.id);
    let badge = match card.kind {
        ItemKind::Tracking => r#"<span class="badge">Tracking Item</span>"#,
        ItemKind::Task => "",
    };
    let action = match card.kind {
        ItemKind::Task => format!(
            r#"<form method="post" action="/items/{id}/complete"><button class="action-btn" type="submit">Complete &#10003;</button></form>"#
        ),
        ItemKind::Tracking => format!(
            r#"<form class="update-group" method="post" action="/items/{id}/log"><input name="value" type="number" step="any" min="0" required /><button class="action-btn" type="submit">Update!</button></form>"#
        ),
    };

    format!(
        r#"<details class="item" data-id="{id}" style="background-color: {tint}">
  <summary>
    <h3>{name}</h3>{badge}
    <div class="meta">
      <span class="time-badge" data-label-for="{id}">{label}</span>
      <span class="time-badge">{target}</span>
      {action}
    </div>
  </summary>
  <div class="expanded">
    <div class="stats-row">{stats}</div>
    <div class="chart-card">{chart}</div>
  </div>
</details>
"#,
        tint = card.tint,
        name = escape_html(&card.name),
        label = escape_html(&card.label),
        target = escape_html(&card.target_label),
        stats = render_stats(&card.stats),
        chart = render_chart(&card.chart),
    )
}

fn render_stats(stats: &ItemStats) -> String {
    let entries: Vec<(&str, String)> = match stats {
        ItemStats::Tracking(stats) => vec![
            ("Latest", metric(stats.latest, "")),
            ("Average", metric(stats.average, "")),
            ("Min", metric(stats.min, "")),
            ("Max", metric(stats.max, "")),
            ("Trend", metric(stats.trend, "")),
        ],
        ItemStats::Task(stats) => vec![
            ("Streak", stats.streak.to_string()),
            ("Completions", stats.completions.to_string()),
            ("Avg interval", metric(stats.mean_interval_hours, "h")),
        ],
    };
    entries
        .into_iter()
        .map(|(label, value)| format!("<span>{label}: <strong>{value}</strong></span>"))
        .collect()
}

fn metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value:.1}{unit}"),
        None => "N/A".to_string(),
    }
}

fn render_chart(chart: &ChartSeries) -> String {
    if chart.is_empty() {
        return r#"<p class="hint">No data in this window</p>"#.to_string();
    }
    let body = match chart {
        ChartSeries::Line(series) => line_svg(series),
        ChartSeries::Histogram(histogram) => histogram_svg(histogram),
    };
    format!(
        r#"<svg class="chart" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img">{body}</svg>"#
    )
}

fn plot_x(x: f64) -> f64 {
    CHART_PAD_X + x * (CHART_WIDTH - CHART_PAD_X * 2.0)
}

fn plot_y(y: f64) -> f64 {
    CHART_HEIGHT - CHART_PAD_BOTTOM - y * (CHART_HEIGHT - CHART_PAD_TOP - CHART_PAD_BOTTOM)
}

/// SVG path commands through every point of the series.
pub fn line_path(series: &LineSeries) -> String {
    let mut path = String::new();
    for (index, point) in series.points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{command} {:.2} {:.2} ", plot_x(point.x), plot_y(point.y));
    }
    path.trim_end().to_string()
}

fn line_svg(series: &LineSeries) -> String {
    let mut svg = String::new();
    for (value, y) in [(series.y_min, 0.0), (series.y_max, 1.0)] {
        let _ = write!(
            svg,
            r#"<line class="chart-grid" x1="{x1}" y1="{py:.2}" x2="{x2}" y2="{py:.2}" /><text class="chart-label" x="{lx}" y="{ty:.2}" text-anchor="end">{value:.1}</text>"#,
            x1 = CHART_PAD_X,
            x2 = CHART_WIDTH - CHART_PAD_X,
            py = plot_y(y),
            lx = CHART_PAD_X - 6.0,
            ty = plot_y(y) + 4.0,
        );
    }
    let _ = write!(svg, r#"<path class="chart-line" d="{}" />"#, line_path(series));
    for point in &series.points {
        let _ = write!(
            svg,
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4"><title>{} &#8212; {:.1}</title></circle>"#,
            plot_x(point.x),
            plot_y(point.y),
            point.timestamp.format("%Y-%m-%d %H:%M"),
            point.value,
        );
    }
    if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
        let _ = write!(
            svg,
            r#"<text class="chart-label" x="{x1}" y="{y}">{}</text><text class="chart-label" x="{x2}" y="{y}" text-anchor="end">{}</text>"#,
            first.timestamp.format("%m-%d"),
            last.timestamp.format("%m-%d"),
            x1 = CHART_PAD_X,
            x2 = CHART_WIDTH - CHART_PAD_X,
            y = CHART_HEIGHT - CHART_PAD_BOTTOM + 18.0,
        );
    }
    svg
}

fn histogram_svg(histogram: &Histogram) -> String {
    let mut svg = String::new();
    let slot = (CHART_WIDTH - CHART_PAD_X * 2.0) / histogram.bins.len() as f64;
    let bar_width = slot * 0.9;
    for (index, bin) in histogram.bins.iter().enumerate() {
        let x = CHART_PAD_X + slot * index as f64 + (slot - bar_width) / 2.0;
        let top = plot_y(bin.height);
        let _ = write!(
            svg,
            r#"<rect class="chart-bar" x="{x:.2}" y="{top:.2}" width="{bar_width:.2}" height="{h:.2}"><title>{start:.1}&#8211;{end:.1} hours: {count}</title></rect><text class="chart-label" x="{cx:.2}" y="{ly:.2}" text-anchor="middle">{start:.0}h</text>"#,
            h = plot_y(0.0) - top,
            start = bin.start_hours,
            end = bin.end_hours,
            count = bin.count,
            cx = x + bar_width / 2.0,
            ly = CHART_HEIGHT - CHART_PAD_BOTTOM + 18.0,
        );
    }
    let _ = write!(
        svg,
        r#"<text class="chart-label" x="{x}" y="{y}" text-anchor="middle">Hours between completions</text>"#,
        x = CHART_WIDTH / 2.0,
        y = CHART_HEIGHT - 4.0,
    );
    svg
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
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


const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Domestic Tasks Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Source+Sans+3:wght@400;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #f8f1e4;
      --ink: #5c3e2d;
      --accent: #8b6b4d;
      --line: #e8d5b5;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 18px 44px rgba(92, 62, 45, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #f0e2c5 70%);
      color: var(--ink);
      font-family: "Source Sans 3", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle,
    .hint {
      margin: 0;
      color: var(--accent);
    }

    .add-form {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 20px;
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .add-form input[type="text"],
    .add-form input[type="number"],
    .update-group input {
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 8px 10px;
      font: inherit;
      color: inherit;
    }

    .tabs {
      display: flex;
      gap: 6px;
    }

    .tab {
      padding: 6px 14px;
      border-radius: 999px;
      color: var(--accent);
      text-decoration: none;
      font-weight: 600;
    }

    .tab.active {
      background: white;
      box-shadow: 0 6px 14px rgba(92, 62, 45, 0.12);
    }

    .item {
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 14px 18px;
      margin-bottom: 14px;
    }

    .item summary {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      cursor: pointer;
    }

    .item h3 {
      margin: 0;
    }

    .meta {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      align-items: center;
      margin-left: auto;
    }

    .badge,
    .time-badge {
      font-size: 0.85rem;
      border-radius: 999px;
      padding: 4px 10px;
      background: rgba(255, 255, 255, 0.7);
    }

    .action-btn {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      background: var(--ink);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    .update-group {
      display: inline-flex;
      gap: 6px;
    }

    .stats-row {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      margin: 12px 0;
    }

    .chart-card {
      background: white;
      border-radius: 14px;
      padding: 10px;
    }

    .chart {
      width: 100%;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--ink);
      stroke-width: 2;
    }

    .chart-point {
      fill: var(--accent);
    }

    .chart-bar {
      fill: var(--ink);
      opacity: 0.8;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--accent);
      font-size: 11px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Domestic Tasks Tracker</h1>
      <p class="subtitle">Track your recurring household chores</p>
    </header>

    <form class="add-form" method="post" action="/items">
      <label><input type="radio" name="kind" value="task" checked /> Task</label>
      <label><input type="radio" name="kind" value="tracking-item" /> Tracking</label>
      <input type="text" name="name" placeholder="Name" required />
      <input type="number" name="target" placeholder="Days / max value" min="1" step="1" required />
      <button class="action-btn" type="submit">Add</button>
    </form>

    <nav class="tabs">{{TABS}}</nav>

    <section id="items">
{{ITEMS}}
    </section>

    <p class="hint">Labels refresh once a minute. Cards turn redder the longer an item sits untouched.</p>
  </main>

  <script>
    const windowName = '{{WINDOW}}';
    const cards = Array.from(document.querySelectorAll('.item'));

    const refreshLabels = async () => {
      const res = await fetch(`/api/cards?window=${windowName}`);
      if (!res.ok) {
        return;
      }
      const fresh = await res.json();
      fresh.forEach((card) => {
        const el = document.querySelector(`.item[data-id="${card.id}"]`);
        if (!el) {
          return;
        }
        el.style.backgroundColor = card.tint;
        const label = el.querySelector('[data-label-for]');
        if (label) {
          label.textContent = card.label;
        }
      });
    };

    if (cards.length > 0) {
      const timer = setInterval(() => {
        refreshLabels().catch((err) => console.error('label refresh failed', err));
      }, 60000);
      window.addEventListener('pagehide', () => clearInterval(timer));
    }
  </script>
</body>
</html>
"#;
