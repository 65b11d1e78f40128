//! Embedded single-page site.
//!
//! The whole front end (pages, concierge orb, elite guide, membership modal)
//! is compiled into the binary as a string constant and talks to `/api/v1`.

/// The complete single-page site HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>FVG Luxury Portal</title>
<style>
:root {
  --teal: #002B2B;
  --white: #F8F9FA;
  --gold: #C5A059;
  --glass: rgba(255, 255, 255, 0.06);
  --line: rgba(255, 255, 255, 0.12);
  --dim: rgba(255, 255, 255, 0.5);
  --serif: 'Playfair Display', Georgia, serif;
  --sans: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--teal); color: var(--white); font-family: var(--sans); line-height: 1.6; }
a { color: inherit; text-decoration: none; }
.serif { font-family: var(--serif); }
.eyebrow { color: var(--gold); font-size: 11px; font-weight: 700; letter-spacing: .3em; text-transform: uppercase; display: block; margin-bottom: 12px; }

nav { position: fixed; top: 0; left: 0; right: 0; z-index: 50; display: flex; align-items: center; justify-content: space-between; padding: 20px 40px; background: rgba(0, 43, 43, .85); backdrop-filter: blur(10px); border-bottom: 1px solid var(--line); }
nav .brand { color: var(--gold); font-size: 22px; font-weight: 700; }
nav .links a { margin-left: 28px; font-size: 12px; letter-spacing: .2em; text-transform: uppercase; color: var(--dim); }
nav .links a.active, nav .links a:hover { color: var(--gold); }
.btn { background: var(--gold); color: var(--teal); border: none; border-radius: 999px; padding: 12px 28px; font-size: 12px; font-weight: 700; letter-spacing: .15em; text-transform: uppercase; cursor: pointer; }
.btn:disabled { opacity: .5; cursor: default; }
.btn.ghost { background: transparent; color: var(--gold); border: 1px solid var(--gold); }

main { padding: 120px 40px 80px; max-width: 1200px; margin: 0 auto; min-height: 100vh; }
header.page { text-align: center; margin-bottom: 56px; }
header.page h1 { font-family: var(--serif); font-size: 52px; margin-bottom: 12px; }
header.page p { color: var(--dim); max-width: 640px; margin: 0 auto; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 28px; }
.card { background: var(--glass); border: 1px solid var(--line); border-radius: 28px; overflow: hidden; }
.card img { width: 100%; height: 220px; object-fit: cover; display: block; }
.card .body { padding: 24px; }
.card h3 { font-family: var(--serif); font-size: 22px; margin-bottom: 4px; }
.card .meta { color: var(--dim); font-size: 11px; letter-spacing: .2em; text-transform: uppercase; margin-bottom: 10px; }
.filters { display: flex; gap: 10px; justify-content: center; margin-bottom: 36px; flex-wrap: wrap; }
.filters button { background: none; border: 1px solid var(--line); color: var(--dim); border-radius: 999px; padding: 8px 18px; cursor: pointer; }
.filters button.active { border-color: var(--gold); color: var(--gold); }
.map { position: relative; aspect-ratio: 16 / 9; border-radius: 28px; border: 1px solid var(--line); background: linear-gradient(135deg, #002B2B, #001F1F); margin-top: 56px; }
.map .pin { position: absolute; transform: translate(-50%, -50%); color: var(--gold); font-size: 12px; letter-spacing: .15em; text-transform: uppercase; }
.map .pin::before { content: ''; display: block; width: 10px; height: 10px; border-radius: 50%; background: var(--gold); margin: 0 auto 6px; box-shadow: 0 0 18px var(--gold); }
.split { display: grid; grid-template-columns: 1fr 2fr; gap: 40px; align-items: start; }
.dish { display: block; width: 100%; text-align: left; background: var(--glass); border: 1px solid var(--line); color: var(--white); border-radius: 20px; padding: 18px 22px; margin-bottom: 12px; cursor: pointer; }
.dish.active { border-color: var(--gold); }
.dish small { display: block; color: var(--dim); }
.recipe { background: var(--glass); border: 1px solid var(--line); border-radius: 28px; padding: 36px; min-height: 320px; }
.recipe h1, .recipe h2, .recipe h3 { font-family: var(--serif); color: var(--gold); margin: 18px 0 8px; }
.recipe ul, .recipe ol { padding-left: 22px; }
.panel { background: var(--glass); border: 1px solid var(--line); border-radius: 36px; padding: 32px; margin-bottom: 40px; display: flex; gap: 16px; flex-wrap: wrap; align-items: center; }
.panel input, .panel select { flex: 1; min-width: 220px; background: rgba(255, 255, 255, .05); border: 1px solid var(--line); border-radius: 999px; color: var(--white); padding: 14px 22px; }
.panel select { flex: 0; min-width: 110px; }
.chips { display: flex; gap: 8px; flex-wrap: wrap; margin-bottom: 32px; }
.chips button { background: none; border: 1px dashed var(--line); color: var(--dim); border-radius: 999px; padding: 6px 14px; cursor: pointer; font-size: 12px; }
.attraction { display: grid; grid-template-columns: 1fr 1fr; gap: 40px; align-items: center; margin-bottom: 80px; }
.attraction img { width: 100%; border-radius: 32px; }
.attraction h2 { font-family: var(--serif); font-size: 40px; }
.attraction .actions { display: flex; gap: 12px; margin-top: 20px; }
footer { border-top: 1px solid var(--line); padding: 40px; text-align: center; color: var(--dim); font-size: 12px; }
.muted { color: var(--dim); }

.widget { position: fixed; bottom: 32px; z-index: 100; }
.widget.right { right: 32px; }
.widget.left { left: 32px; }
.orb { width: 64px; height: 64px; border-radius: 50%; border: 1px solid rgba(197, 160, 89, .5); background: radial-gradient(circle at 30% 30%, var(--gold), var(--teal)); color: var(--white); font-size: 24px; cursor: pointer; }
.chat { position: absolute; bottom: 84px; width: 380px; height: 540px; background: rgba(0, 30, 30, .96); border: 1px solid var(--line); border-radius: 32px; display: none; flex-direction: column; overflow: hidden; }
.widget.right .chat { right: 0; }
.widget.left .chat { left: 0; }
.chat.open { display: flex; }
.chat .head { padding: 18px 24px; border-bottom: 1px solid var(--line); background: rgba(197, 160, 89, .1); }
.chat .head h4 { color: var(--gold); font-size: 13px; letter-spacing: .2em; text-transform: uppercase; }
.chat .head span { color: var(--dim); font-size: 10px; letter-spacing: .2em; text-transform: uppercase; }
.chat .log { flex: 1; overflow-y: auto; padding: 20px; display: flex; flex-direction: column; gap: 12px; }
.msg { max-width: 85%; padding: 12px 16px; border-radius: 20px; font-size: 14px; white-space: pre-wrap; }
.msg.user { align-self: flex-end; background: var(--gold); color: var(--teal); border-top-right-radius: 4px; }
.msg.model { align-self: flex-start; background: rgba(255, 255, 255, .08); border: 1px solid var(--line); border-top-left-radius: 4px; }
.msg .sources { margin-top: 8px; font-size: 11px; }
.msg .sources a { display: block; color: var(--gold); }
.msg.loading { font-style: italic; color: var(--dim); }
.chat .toggles { display: flex; justify-content: space-between; padding: 8px 20px; border-top: 1px solid var(--line); font-size: 10px; letter-spacing: .15em; text-transform: uppercase; color: var(--dim); }
.chat form { display: flex; gap: 8px; padding: 14px; border-top: 1px solid var(--line); }
.chat input[type=text] { flex: 1; background: rgba(255, 255, 255, .05); border: 1px solid var(--line); border-radius: 999px; color: var(--white); padding: 10px 16px; }
.modal { position: fixed; inset: 0; z-index: 200; background: rgba(0, 0, 0, .8); display: none; align-items: center; justify-content: center; padding: 24px; }
.modal.open { display: flex; }
.modal .box { max-width: 640px; width: 100%; background: var(--teal); border: 1px solid var(--line); border-radius: 40px; padding: 48px; text-align: center; position: relative; }
.modal .box .cols { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; text-align: left; margin: 28px 0; }
.modal .close { position: absolute; top: 20px; right: 24px; background: none; border: none; color: var(--dim); font-size: 22px; cursor: pointer; }
@media (max-width: 800px) {
  .split, .attraction { grid-template-columns: 1fr; }
  nav .links { display: none; }
  .chat { width: calc(100vw - 48px); }
}
</style>
</head>
<body>
<nav>
  <a class="brand serif" href="#/">FVG Luxury</a>
  <div class="links">
    <a href="#/destinations">Destinations</a>
    <a href="#/gastronomy">Gastronomy</a>
    <a href="#/events">Events</a>
    <a href="#/discovery">Discovery</a>
    <a href="#/gallery">Gallery</a>
  </div>
  <button class="btn ghost" id="join">Membership</button>
</nav>

<main id="view"></main>

<footer>
  <p class="serif" style="color: var(--gold); font-size: 18px;">Friuli-Venezia Giulia Luxury Portal</p>
  <p>Villas &middot; Vineyards &middot; Experiences &middot; Yachting</p>
</footer>

<div class="widget left" id="guide">
  <div class="chat">
    <div class="head"><h4>The Elite Guide</h4><span id="guide-mode">Gemini Pro</span></div>
    <div class="log"></div>
    <div class="toggles">
      <label><input type="checkbox" id="guide-fast"> Swift Mode</label>
      <label><input type="checkbox" id="guide-deep"> Deep Insight</label>
    </div>
    <form><input type="text" placeholder="Tell me about Venice..."><button class="btn">&rarr;</button></form>
  </div>
  <button class="orb" title="The Elite Guide">&#10022;</button>
</div>

<div class="widget right" id="concierge">
  <div class="chat">
    <div class="head"><h4>Concierge</h4><span>Always Online</span></div>
    <div class="log"></div>
    <div class="toggles"><label><input type="checkbox" id="concierge-near"> Near me</label></div>
    <form><input type="text" placeholder="Ask our concierge..."><button class="btn">&rarr;</button></form>
  </div>
  <button class="orb" title="AI Concierge">&#9889;</button>
</div>

<div class="modal" id="membership">
  <div class="box">
    <button class="close">&times;</button>
    <span class="eyebrow" id="membership-title">The Inner Circle</span>
    <h2 class="serif" style="font-size: 40px;">Elegance is an <em>exclusive journey.</em></h2>
    <div class="cols">
      <div><span class="eyebrow">Privileges</span><ul id="membership-privileges"></ul></div>
      <div><span class="eyebrow">Events</span><ul id="membership-events"></ul></div>
    </div>
    <button class="btn" style="width: 100%;">Request Invitation</button>
    <p class="muted" id="membership-limit" style="margin-top: 16px; font-size: 11px;"></p>
  </div>
</div>

<script>
function esc(s) {
  return String(s == null ? '' : s)
    .replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;')
    .replace(/"/g, '&quot;').replace(/'/g, '&#39;');
}

async function getJson(path) {
  const res = await fetch(path);
  if (!res.ok) throw new Error('HTTP ' + res.status);
  return res.json();
}

async function postJson(path, body) {
  const res = await fetch(path, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const data = await res.json().catch(() => ({}));
  if (!res.ok) throw new Error((data.error && data.error.message) || ('HTTP ' + res.status));
  return data;
}

function card(img, title, meta, text) {
  return '<div class="card"><img src="' + esc(img) + '" alt="' + esc(title) + '" loading="lazy">' +
    '<div class="body"><div class="meta">' + esc(meta) + '</div><h3>' + esc(title) + '</h3>' +
    '<p class="muted">' + esc(text) + '</p></div></div>';
}

// ---------- Pages ----------

const pages = {
  async '/'(view) {
    const [dest, points] = await Promise.all([getJson('/api/v1/destinations'), getJson('/api/v1/map')]);
    view.innerHTML =
      '<header class="page"><span class="eyebrow">Friuli-Venezia Giulia</span>' +
      '<h1>Where the Alps meet the Adriatic</h1>' +
      '<p>Private villas, storied vineyards and a coastline of Habsburg grandeur.</p></header>' +
      '<div class="grid">' + dest.slice(0, 3).map(d => card(d.image, d.name, d.location, d.description)).join('') + '</div>' +
      '<div class="map">' + points.map(p =>
        '<div class="pin" style="left:' + p.x + '%;top:' + p.y + '%">' + esc(p.name) + '</div>').join('') + '</div>';
  },

  async '/destinations'(view, params) {
    const category = params.get('category') || '';
    const list = await getJson('/api/v1/destinations' + (category ? '?category=' + encodeURIComponent(category) : ''));
    const cats = ['', 'Villa', 'Vineyard', 'Coastal', 'Mountain'];
    view.innerHTML =
      '<header class="page"><span class="eyebrow">Curated Stays</span><h1>Destinations</h1></header>' +
      '<div class="filters">' + cats.map(c =>
        '<button data-cat="' + c + '" class="' + (c === category ? 'active' : '') + '">' + (c || 'All') + '</button>').join('') + '</div>' +
      '<div class="grid">' + list.map(d => card(d.image, d.name, d.category + ' · ' + d.location, d.description)).join('') + '</div>';
    view.querySelectorAll('[data-cat]').forEach(b => b.onclick = () => {
      location.hash = '#/destinations' + (b.dataset.cat ? '?category=' + b.dataset.cat : '');
    });
  },

  async '/gastronomy'(view) {
    const dishes = await getJson('/api/v1/dishes');
    view.innerHTML =
      '<header class="page"><span class="eyebrow">Gastronomy</span><h1>Culinary Masterpieces</h1>' +
      '<p>A melting pot of Latin, Slavic and Germanic flavors. Consult our Michelin-trained AI chef for regional secrets.</p></header>' +
      '<div class="split"><div id="dishes">' + dishes.map(d =>
        '<button class="dish" data-dish="' + esc(d.name) + '">' + esc(d.name) + '<small>' + esc(d.description) + '</small></button>').join('') +
      '</div><div class="recipe" id="recipe"><p class="muted">Select a dish to consult the chef.</p></div></div>';
    const out = view.querySelector('#recipe');
    let busy = false;
    view.querySelectorAll('.dish').forEach(b => b.onclick = async () => {
      if (busy) return;
      busy = true;
      view.querySelectorAll('.dish').forEach(x => x.classList.toggle('active', x === b));
      out.innerHTML = '<p class="muted">The chef is composing ' + esc(b.dataset.dish) + '...</p>';
      try {
        const recipe = await postJson('/api/v1/recipes', { dish: b.dataset.dish });
        out.innerHTML = recipe.html;
      } catch (e) {
        out.innerHTML = '<p>An error occurred while consulting the chef. Please try again.</p>';
      } finally {
        busy = false;
      }
    });
  },

  async '/events'(view) {
    const events = await getJson('/api/v1/events');
    view.innerHTML =
      '<header class="page"><span class="eyebrow">Season Calendar</span><h1>Events</h1></header>' +
      '<div class="grid">' + events.map(e => card(e.image, e.title, e.category + ' · ' + e.display_date, e.description)).join('') + '</div>';
  },

  async '/discovery'(view) {
    const list = await getJson('/api/v1/attractions');
    view.innerHTML =
      '<header class="page"><span class="eyebrow">Curated Discovery</span><h1>The Hidden Treasures.</h1>' +
      '<p>Beyond the famous vistas lie centuries of history.</p></header>' +
      list.map(a =>
        '<div class="attraction"><img src="' + esc(a.image) + '" alt="' + esc(a.name) + '" loading="lazy"><div>' +
        '<span class="eyebrow">' + esc(a.city) + '</span><h2>' + esc(a.name) + '</h2><p class="muted">' + esc(a.description) + '</p>' +
        '<div class="actions"><button class="btn" data-ask="' + esc(a.concierge_question) + '">Ask the Concierge</button>' +
        '<a class="btn ghost" target="_blank" rel="noopener" href="' + esc(a.maps_url) + '">Open in Maps</a></div></div></div>').join('');
    view.querySelectorAll('[data-ask]').forEach(b => b.onclick = () => concierge.open(b.dataset.ask));
  },

  async '/gallery'(view) {
    const opts = await getJson('/api/v1/gallery/suggestions');
    view.innerHTML =
      '<header class="page"><span class="eyebrow">The Digital Atelier</span><h1>Visualizing Paradise</h1>' +
      '<p>Describe a scene, and our digital artisans will bring it to life.</p></header>' +
      '<div class="panel"><input type="text" id="g-prompt" placeholder="Describe your dream FVG experience...">' +
      '<select id="g-ratio">' + opts.aspect_ratios.map(r => '<option>' + r + '</option>').join('') + '</select>' +
      '<button class="btn" id="g-go">Generate</button></div>' +
      '<div class="chips">' + opts.suggestions.map(s => '<button>' + esc(s) + '</button>').join('') + '</div>' +
      '<p class="muted" id="g-status"></p><div class="grid" id="g-images"></div>';
    const input = view.querySelector('#g-prompt');
    const go = view.querySelector('#g-go');
    const status = view.querySelector('#g-status');
    view.querySelectorAll('.chips button').forEach(b => b.onclick = () => { input.value = b.textContent; });
    go.onclick = async () => {
      const prompt = input.value.trim();
      if (!prompt || go.disabled) return;
      go.disabled = true;
      status.textContent = 'Our artisans are at work...';
      try {
        const img = await postJson('/api/v1/gallery', { prompt, aspect_ratio: view.querySelector('#g-ratio').value });
        view.querySelector('#g-images').insertAdjacentHTML('afterbegin',
          '<div class="card"><img src="' + esc(img.url) + '" alt="' + esc(img.prompt) + '"><div class="body"><p class="muted">' + esc(img.prompt) + '</p></div></div>');
        input.value = '';
        status.textContent = '';
      } catch (e) {
        console.error('Image generation failed', e);
        status.textContent = 'The atelier could not complete this piece.';
      } finally {
        go.disabled = false;
      }
    };
  },
};

async function route() {
  const raw = location.hash.replace(/^#/, '') || '/';
  const [path, query] = raw.split('?');
  const view = document.getElementById('view');
  const page = pages[path] || pages['/'];
  document.querySelectorAll('nav .links a').forEach(a =>
    a.classList.toggle('active', a.getAttribute('href') === '#' + path));
  window.scrollTo(0, 0);
  try {
    await page(view, new URLSearchParams(query || ''));
  } catch (e) {
    view.innerHTML = '<header class="page"><h1>Momentarily unavailable</h1><p>' + esc(e.message) + '</p></header>';
  }
}

// ---------- Assistant widgets ----------

function chatWidget(root, options) {
  const panel = root.querySelector('.chat');
  const log = root.querySelector('.log');
  const form = root.querySelector('form');
  const input = form.querySelector('input');
  const messages = [];
  let loading = false;

  function render() {
    log.innerHTML = messages.length === 0
      ? '<p class="muted" style="text-align:center;margin-top:40px">' + esc(options.welcome) + '</p>'
      : messages.map(m => '<div class="msg ' + m.role + '">' + esc(m.content) +
          (m.sources && m.sources.length
            ? '<div class="sources">' + m.sources.map(s =>
                '<a target="_blank" rel="noopener" href="' + esc(s.uri) + '">' + esc(s.title) + '</a>').join('') + '</div>'
            : '') + '</div>').join('');
    if (loading) log.insertAdjacentHTML('beforeend', '<div class="msg model loading">' + esc(options.loadingText()) + '</div>');
    log.scrollTop = log.scrollHeight;
  }

  async function send(text) {
    if (!text.trim() || loading) return;
    const history = messages.slice();
    messages.push({ role: 'user', content: text });
    input.value = '';
    loading = true;
    render();
    try {
      const reply = await postJson(options.endpoint, await options.body(text, history));
      messages.push({ role: 'model', content: reply.content, sources: reply.sources || [] });
    } catch (e) {
      messages.push({ role: 'model', content: options.apology });
    } finally {
      loading = false;
      render();
    }
  }

  root.querySelector('.orb').onclick = () => panel.classList.toggle('open');
  form.onsubmit = e => { e.preventDefault(); send(input.value); };
  render();

  return {
    open(text) {
      panel.classList.add('open');
      if (text) send(text);
    },
  };
}

function currentPosition() {
  return new Promise(resolve => {
    if (!navigator.geolocation) return resolve(null);
    navigator.geolocation.getCurrentPosition(
      p => resolve({ latitude: p.coords.latitude, longitude: p.coords.longitude }),
      () => resolve(null),
      { timeout: 5000 });
  });
}

const concierge = chatWidget(document.getElementById('concierge'), {
  endpoint: '/api/v1/concierge',
  welcome: 'Welcome to the FVG Luxury Portal. How may I assist you today?',
  apology: 'I apologize, my connection to the portal is weak. Please try again.',
  loadingText: () => 'Typing...',
  async body(message, history) {
    const near = document.getElementById('concierge-near').checked;
    return { message, history, location: near ? await currentPosition() : null };
  },
});

const fast = document.getElementById('guide-fast');
const deep = document.getElementById('guide-deep');
fast.onchange = () => {
  if (fast.checked) deep.checked = false;
  deep.disabled = fast.checked;
  document.getElementById('guide-mode').textContent = fast.checked ? 'Fast Mode Lite' : 'Gemini Pro';
};

chatWidget(document.getElementById('guide'), {
  endpoint: '/api/v1/guide',
  welcome: '"La Dolce Vita awaits." Ask me about the finest experiences across Italy.',
  apology: 'My sincere apologies. I am currently unavailable to guide you. Please try again in a moment.',
  loadingText: () => fast.checked ? 'Instant delivery...' : (deep.checked ? 'The Guide is reflecting deeply...' : '...'),
  body(message, history) {
    return { message, history, mode: fast.checked ? 'fast' : 'elite', deep_thinking: deep.checked };
  },
});

// ---------- Membership ----------

const modal = document.getElementById('membership');
document.getElementById('join').onclick = async () => {
  try {
    const m = await getJson('/api/v1/membership');
    document.getElementById('membership-title').textContent = m.title;
    document.getElementById('membership-privileges').innerHTML = m.privileges.map(p => '<li>' + esc(p) + '</li>').join('');
    document.getElementById('membership-events').innerHTML = m.events.map(p => '<li>' + esc(p) + '</li>').join('');
    document.getElementById('membership-limit').textContent = 'Limited to ' + m.annual_limit + ' select members annually';
  } catch (e) { /* keep static copy */ }
  modal.classList.add('open');
};
modal.querySelector('.close').onclick = () => modal.classList.remove('open');
modal.onclick = e => { if (e.target === modal) modal.classList.remove('open'); };

window.addEventListener('hashchange', route);
route();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::colors;

    #[test]
    fn test_site_wires_every_endpoint() {
        for path in [
            "/api/v1/concierge",
            "/api/v1/guide",
            "/api/v1/recipes",
            "/api/v1/gallery",
            "/api/v1/destinations",
            "/api/v1/events",
            "/api/v1/attractions",
            "/api/v1/membership",
        ] {
            assert!(INDEX_HTML.contains(path), "missing {}", path);
        }
    }

    #[test]
    fn test_site_uses_brand_colors() {
        for color in [colors::TEAL, colors::WHITE, colors::GOLD] {
            assert!(INDEX_HTML.contains(color), "missing {}", color);
        }
    }
}
