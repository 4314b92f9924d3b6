//! Embedded HTML/CSS/JS frontend for the salesboard dashboard.
//!
//! The whole SPA is compiled into the binary as a string constant. Charts
//! are drawn as inline SVG straight from the JSON view-models, so there are
//! no external assets, build tools or CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Agent Performance Dashboard</title>
<style>
:root {
  --primary: #673ab7;
  --primary-light: #9575cd;
  --surface: #ffffff;
  --panel: #f5f5f5;
  --border: rgba(0,0,0,0.08);
  --text: #212121;
  --text-muted: #757575;
  --error: #f44336;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: #fafafa; color: var(--text); font-family: var(--font); font-size: 14px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 14px 24px;
  color: #fff;
  background: linear-gradient(90deg, var(--primary) 0%, var(--primary-light) 100%);
}
header h1 { font-size: 20px; font-weight: 600; }
nav button {
  background: transparent;
  border: none;
  color: #fff;
  font-size: 14px;
  padding: 6px 14px;
  border-radius: var(--radius);
  cursor: pointer;
}
nav button.active { background: rgba(255,255,255,0.2); }

main { max-width: 1100px; margin: 0 auto; padding: 24px; }
.page { display: none; }
.page.active { display: block; }

.search { display: flex; gap: 12px; margin-bottom: 16px; }
.search input {
  flex: 1;
  padding: 14px;
  font-size: 15px;
  border: 1px solid #ccc;
  border-radius: var(--radius);
}
.search button {
  min-width: 120px;
  background: var(--primary);
  color: #fff;
  border: none;
  border-radius: var(--radius);
  font-size: 15px;
  cursor: pointer;
}
.error-line { color: var(--error); text-align: center; margin-bottom: 12px; }
.muted { color: var(--text-muted); }

.cards { display: flex; gap: 12px; margin-bottom: 12px; }
.card {
  flex: 1;
  border-radius: var(--radius);
  padding: 18px;
  text-align: center;
  box-shadow: 0 2px 4px rgba(0,0,0,0.08);
}
.card h2 { font-size: 16px; margin-bottom: 8px; }
.card .big { font-size: 28px; font-weight: 700; margin: 8px 0; }
.trend { font-size: 40px; }
.stars { font-size: 36px; letter-spacing: 4px; }
.stars .hollow { opacity: 0.5; }

.recs { background: var(--panel); border-radius: var(--radius); padding: 18px; }
.recs h2 { font-size: 16px; padding-bottom: 10px; margin-bottom: 12px; border-bottom: 2px solid var(--primary); }
.recs li {
  list-style: none;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px 14px;
  margin-bottom: 8px;
}

.charts { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.chart { background: var(--panel); border-radius: var(--radius); padding: 18px; }
.chart h2 { font-size: 16px; margin-bottom: 12px; }
.legend { display: flex; justify-content: center; gap: 24px; margin-top: 12px; border-top: 1px solid #ddd; padding-top: 12px; }
.legend div { text-align: center; }
.legend .count { font-size: 18px; font-weight: 600; }
@media (max-width: 800px) { .charts { grid-template-columns: 1fr; } .cards { flex-direction: column; } }
</style>
</head>
<body>
<header>
  <h1>Agent Performance Dashboard</h1>
  <nav id="nav">
    <button data-page="lookup" class="active">Prediction</button>
    <button data-page="distribution">Distribution</button>
  </nav>
</header>

<main>
  <section id="page-lookup" class="page active">
    <form class="search" id="lookup-form">
      <input id="agent-id" placeholder="Enter Agent ID" autocomplete="off">
      <button type="submit">Analyze</button>
    </form>
    <div id="lookup-status"></div>
    <div id="lookup-result"></div>
  </section>

  <section id="page-distribution" class="page">
    <div class="charts">
      <div class="chart">
        <h2>Performance Level Distribution</h2>
        <div id="pie"></div>
        <div class="legend" id="pie-legend"></div>
      </div>
      <div class="chart">
        <h2>Sales Forecast Overview</h2>
        <div id="bar"></div>
        <div class="legend" id="bar-legend"></div>
      </div>
    </div>
  </section>
</main>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let lookupGeneration = 0;
let distributionGeneration = 0;
let distributionMounted = false;

function esc(s) {
  return String(s).replace(/[&<>"']/g, c => ({
    '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
  })[c]);
}

async function getJson(path) {
  const res = await fetch(path);
  return res.json();
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------
document.getElementById('nav').addEventListener('click', e => {
  const page = e.target.dataset.page;
  if (!page) return;

  document.querySelectorAll('nav button').forEach(b => b.classList.remove('active'));
  e.target.classList.add('active');
  document.querySelectorAll('.page').forEach(p => p.classList.remove('active'));
  document.getElementById('page-' + page).classList.add('active');

  if (page === 'distribution') {
    mountDistribution();
  } else {
    // Leaving the distribution page drops any response still in flight.
    distributionGeneration++;
    distributionMounted = false;
  }
});

// ---------------------------------------------------------------------------
// Lookup page
// ---------------------------------------------------------------------------
document.getElementById('lookup-form').addEventListener('submit', async e => {
  e.preventDefault();
  const agentId = document.getElementById('agent-id').value;
  const generation = ++lookupGeneration;

  document.getElementById('lookup-status').innerHTML = '<p class="muted">Loading...</p>';
  document.getElementById('lookup-result').innerHTML = '';

  let snapshot;
  try {
    snapshot = await getJson('/api/lookup/' + encodeURIComponent(agentId));
  } catch (err) {
    snapshot = { state: 'failure', error: 'Agent not found' };
  }
  if (generation !== lookupGeneration) return;
  renderLookup(snapshot);
});

function renderLookup(snapshot) {
  const status = document.getElementById('lookup-status');
  const result = document.getElementById('lookup-result');
  status.innerHTML = '';
  result.innerHTML = '';

  if (snapshot.state === 'failure') {
    status.innerHTML = '<p class="error-line">' + esc(snapshot.error) + '</p>';
    return;
  }
  if (snapshot.state !== 'success') return;

  const d = snapshot.detail;
  const f = d.forecast;
  const t = d.tier;
  const stars = '★'.repeat(t.star_count) +
    '<span class="hollow">' + '☆'.repeat(t.max_stars - t.star_count) + '</span>';

  result.innerHTML =
    '<div class="cards">' +
      '<div class="card" style="background:' + f.background_color + '">' +
        '<h2 style="color:' + f.primary_color + '">Sales Forecast</h2>' +
        '<div class="trend" style="color:' + f.primary_color + '">' + (f.trend === 'up' ? '▲' : '▼') + '</div>' +
        '<div class="big" style="color:' + f.primary_color + '">' + esc(f.label) + '</div>' +
        '<p class="muted">' + esc(f.caption) + '</p>' +
      '</div>' +
      '<div class="card" style="background:' + t.background_color + '">' +
        '<h2 style="color:' + t.primary_color + '">Performance Level</h2>' +
        '<div class="stars" style="color:' + t.primary_color + '">' + stars + '</div>' +
        '<div class="big" style="color:' + t.primary_color + '">' + esc(t.name) + '</div>' +
        '<p class="muted">Current performance rating</p>' +
      '</div>' +
    '</div>' +
    '<div class="recs"><h2>Recommendations</h2><ul>' +
      d.recommendations.map(r => '<li>' + esc(r) + '</li>').join('') +
    '</ul></div>';
}

// ---------------------------------------------------------------------------
// Distribution page
// ---------------------------------------------------------------------------
async function mountDistribution() {
  if (distributionMounted) return;
  distributionMounted = true;
  const generation = ++distributionGeneration;

  renderDistribution({ pie: { categories: [], counts: [], colors: [] },
                       bar: { categories: ['No Sales Expected', 'Sales Expected'], counts: [0, 0], colors: ['#f44336', '#4caf50'] } });

  let snapshot;
  try {
    snapshot = await getJson('/api/distribution');
  } catch (err) {
    console.error('Error fetching distributions:', err);
    return;
  }
  if (generation !== distributionGeneration) return;
  renderDistribution(snapshot);
}

function renderDistribution(snapshot) {
  renderPie(snapshot.pie);
  renderBar(snapshot.bar);
}

function legend(categories, counts, colors) {
  return categories.map((c, i) =>
    '<div><div class="count" style="color:' + colors[i] + '">' + counts[i] + '</div>' +
    '<div style="color:' + colors[i] + ';opacity:0.8">' + esc(c) + '</div></div>'
  ).join('');
}

function renderPie(pie) {
  const total = pie.counts.reduce((a, b) => a + b, 0);
  const r = 120, cx = 150, cy = 150;
  let svg = '<svg viewBox="0 0 300 300" width="100%" height="300">';

  if (total === 0) {
    svg += '<circle cx="' + cx + '" cy="' + cy + '" r="' + r + '" fill="#e0e0e0"/>';
  } else {
    let angle = -Math.PI / 2;
    pie.counts.forEach((count, i) => {
      if (count === 0) return;
      const sweep = count / total * 2 * Math.PI;
      if (count === total) {
        svg += '<circle cx="' + cx + '" cy="' + cy + '" r="' + r + '" fill="' + pie.colors[i] + '"/>';
        return;
      }
      const x1 = cx + r * Math.cos(angle), y1 = cy + r * Math.sin(angle);
      angle += sweep;
      const x2 = cx + r * Math.cos(angle), y2 = cy + r * Math.sin(angle);
      const large = sweep > Math.PI ? 1 : 0;
      svg += '<path d="M' + cx + ',' + cy + ' L' + x1 + ',' + y1 +
        ' A' + r + ',' + r + ' 0 ' + large + ' 1 ' + x2 + ',' + y2 + ' Z" fill="' + pie.colors[i] + '">' +
        '<title>' + esc(pie.categories[i]) + ': ' + count + '</title></path>';
    });
  }
  svg += '</svg>';

  document.getElementById('pie').innerHTML = svg;
  document.getElementById('pie-legend').innerHTML = legend(pie.categories, pie.counts, pie.colors);
}

function renderBar(bar) {
  const max = Math.max(1, ...bar.counts);
  const h = 240, base = 270, w = 90;
  let svg = '<svg viewBox="0 0 300 300" width="100%" height="300">';
  svg += '<line x1="20" y1="' + base + '" x2="280" y2="' + base + '" stroke="#bbb"/>';
  bar.counts.forEach((count, i) => {
    const bh = count / max * h;
    const x = 45 + i * 120;
    svg += '<rect x="' + x + '" y="' + (base - bh) + '" width="' + w + '" height="' + bh +
      '" fill="' + bar.colors[i] + '"><title>' + esc(bar.categories[i]) + ': ' + count + '</title></rect>';
    svg += '<text x="' + (x + w / 2) + '" y="' + (base - bh - 6) + '" text-anchor="middle" font-size="13">' + count + '</text>';
  });
  svg += '</svg>';

  document.getElementById('bar').innerHTML = svg;
  document.getElementById('bar-legend').innerHTML = legend(bar.categories, bar.counts, bar.colors);
}
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_calls_dashboard_endpoints() {
        assert!(INDEX_HTML.contains("/api/lookup/"));
        assert!(INDEX_HTML.contains("/api/distribution"));
    }

    #[test]
    fn lookup_guards_against_stale_responses() {
        assert!(INDEX_HTML.contains("generation !== lookupGeneration"));
    }
}
