// HTML page - live stream with trail overlay next to the metric cards
use crate::domain::trail::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::presentation::view::{DashboardView, MetricCardView};
use std::fmt::Write;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_card(out: &mut String, card: &MetricCardView) {
    let _ = write!(
        out,
        r#"<div class="card">
  <div class="card-head"><div class="heading">{heading}</div><div class="standard">{standard}</div></div>
  <div class="bar"><div class="fill" style="width: {pct}%; background: {color};"></div></div>
  <div class="caption">{caption}</div>
</div>
"#,
        heading = escape(&card.heading()),
        standard = escape(&card.standard_text()),
        pct = card.percentage,
        color = card.color,
        caption = escape(&card.percentage_text),
    );
}

/// Applies each pushed view to the cards in place and reloads the overlay
const LIVE_UPDATE_SCRIPT: &str = r#"<script>
  const cards = document.querySelectorAll('.card');
  const overlay = document.querySelector('.overlay');
  const advice = document.querySelector('.advice');
  const events = new EventSource('/api/events');
  events.onmessage = (e) => {
    const view = JSON.parse(e.data);
    view.cards.forEach((card, i) => {
      const el = cards[i];
      if (!el) return;
      el.querySelector('.heading').textContent = `${card.emoji} ${card.label}: ${card.current}`;
      el.querySelector('.standard').textContent = `Standard: ${card.standard}`;
      const fill = el.querySelector('.fill');
      fill.style.width = card.percentage + '%';
      fill.style.background = card.color;
      el.querySelector('.caption').textContent = card.percentage_text;
    });
    advice.textContent = view.recommendation;
    overlay.src = '/overlay.svg?cycle=' + view.cycle;
  };
</script>"#;

pub fn render_page(view: &DashboardView, stream_url: &str) -> String {
    let mut cards = String::new();
    for card in &view.cards {
        render_card(&mut cards, card);
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Pet Activity Dashboard</title>
<style>
  body {{ display: flex; padding: 20px; border: 2px solid black; font-family: sans-serif; }}
  .stream {{ position: relative; width: {w}px; height: {h}px; border: 2px solid black; }}
  .stream img {{ position: absolute; top: 0; left: 0; }}
  .overlay {{ pointer-events: none; }}
  .cards {{ margin-left: 20px; display: flex; flex-direction: column; align-items: center; }}
  .card {{ border: 2px solid #ccc; padding: 15px; border-radius: 10px; background: #f9f9f9; width: 380px; margin-bottom: 10px; }}
  .card-head {{ display: flex; justify-content: space-between; }}
  .bar {{ background: #e0e0e0; height: 10px; border-radius: 5px; overflow: hidden; margin-top: 8px; }}
  .bar div {{ height: 100%; }}
  .caption {{ font-size: 12px; color: #666; margin-top: 4px; }}
  .advice {{ margin-top: 3px; font-size: 15px; font-weight: bold; color: #333; width: 380px; text-align: center; }}
</style>
</head>
<body>
<div class="stream">
  <img src="{stream}" alt="Live Stream" width="{w}" height="{h}">
  <img class="overlay" src="/overlay.svg" alt="" width="{w}" height="{h}">
</div>
<div class="cards">
{cards}<div class="advice">{advice}</div>
</div>
{script}
</body>
</html>
"#,
        w = FRAME_WIDTH,
        h = FRAME_HEIGHT,
        stream = escape(stream_url),
        cards = cards,
        advice = escape(&view.recommendation),
        script = LIVE_UPDATE_SCRIPT,
    )
}
