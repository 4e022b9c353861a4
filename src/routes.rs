use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    campus,
    composer::{compose, DraftForm},
    dto::{CampusDto, FeedQuery, ImageDto, LiveDto, PostDto, ReactRequest, ReactionsDto, ThemeDto},
    error::{AppError, Result},
    feed::{derive_feed, CampusFilter, TabFilter},
    image::ImageRef,
    post::Reaction,
    state::AppState,
};

/// Feed frontend page (HTML + JS).
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "OK"
}

/// All registry entries, wildcard first.
pub async fn list_campuses() -> Json<Vec<CampusDto>> {
    Json(campus::all().iter().map(CampusDto::from).collect())
}

/// The feed for a campus and tab.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<PostDto>>> {
    let tab = match query.tab.as_deref() {
        Some(t) => t.parse::<TabFilter>()?,
        None => TabFilter::default(),
    };
    let campus = CampusFilter::parse(query.campus.as_deref());

    let store = state.store.read().await;
    let now = Utc::now();
    let out: Vec<PostDto> = derive_feed(store.posts(), &campus, tab)
        .into_iter()
        .map(|p| PostDto::new(p, now))
        .collect();
    debug!(%tab, ?campus, shown = out.len(), total = store.len(), "Derived feed");

    Ok(Json(out))
}

/// Compose a post and put it at the top of the feed.
pub async fn create_post(
    State(state): State<AppState>,
    Json(form): Json<DraftForm>,
) -> Result<impl IntoResponse> {
    let mut store = state.store.write().await;
    let post = compose(form, &mut store).map_err(|e| {
        info!(violations = ?e.violations, "Rejected post");
        e
    })?;
    info!(id = %post.id, kind = ?post.kind, campus = %post.campus, "Created post");

    Ok((StatusCode::CREATED, Json(PostDto::new(&post, Utc::now()))))
}

/// Add one reaction to a post.
pub async fn react_to_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(payload): Json<ReactRequest>,
) -> Result<Json<ReactionsDto>> {
    let reaction = payload.reaction.parse::<Reaction>()?;
    let mut store = state.store.write().await;
    let reactions = store
        .react(&post_id, reaction)
        .ok_or_else(|| AppError::PostNotFound(post_id.clone()))?;
    debug!(id = %post_id, %reaction, "Reacted to post");

    Ok(Json(ReactionsDto {
        id: post_id,
        total_reactions: reactions.total(),
        reactions,
    }))
}

/// Accepted and logged only; the post stays in the feed.
pub async fn report_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<StatusCode> {
    ensure_post_exists(&state, &post_id).await?;
    warn!(id = %post_id, "Post reported");
    Ok(StatusCode::ACCEPTED)
}

/// Accepted and logged only; nothing is hidden.
pub async fn block_author(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<StatusCode> {
    ensure_post_exists(&state, &post_id).await?;
    info!(id = %post_id, "Author block requested");
    Ok(StatusCode::ACCEPTED)
}

async fn ensure_post_exists(state: &AppState, post_id: &str) -> Result<()> {
    let store = state.store.read().await;
    match store.get(post_id) {
        Some(_) => Ok(()),
        None => Err(AppError::PostNotFound(post_id.to_string())),
    }
}

/// Turn an uploaded image into an inline `data:` reference for a meme post.
pub async fn upload_image(headers: HeaderMap, body: Bytes) -> Result<Json<ImageDto>> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let image = ImageRef::from_bytes(content_type, &body)?;
    debug!(content_type, bytes = body.len(), "Inlined image");

    Ok(Json(ImageDto {
        image_url: image.into_string(),
    }))
}

pub async fn live_status(State(state): State<AppState>) -> Json<LiveDto> {
    Json(LiveDto {
        new_posts_available: state.notifier.is_flagged(),
    })
}

/// Dismiss the "new posts" banner. No data is refreshed.
pub async fn acknowledge_live(State(state): State<AppState>) -> Json<LiveDto> {
    state.notifier.acknowledge();
    Json(LiveDto {
        new_posts_available: false,
    })
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeDto> {
    Json(ThemeDto {
        theme: *state.theme.read().await,
    })
}

pub async fn toggle_theme(State(state): State<AppState>) -> Json<ThemeDto> {
    let mut theme = state.theme.write().await;
    let toggled = theme.toggled();
    *theme = toggled;
    debug!(theme = %toggled, "Theme toggled");
    Json(ThemeDto { theme: toggled })
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>campus-feed</title>
  <style>
    :root { --bg: #f9fafb; --card: #fff; --fg: #111827; --muted: #6b7280; --chip: #f3f4f6; --accent: #8b5cf6; }
    .dark { --bg: #0f0f14; --card: #1b1b24; --fg: #f9fafb; --muted: #9ca3af; --chip: #2a2a36; }
    body { font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); margin: 0; }
    header { display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1rem; background: var(--card); }
    main { max-width: 640px; margin: 0 auto; padding: 1rem 1rem 5rem; }
    button { cursor: pointer; border: 0; border-radius: 999px; padding: 0.35rem 0.8rem; background: var(--chip); color: var(--fg); }
    button.active { background: var(--accent); color: #fff; }
    .row { display: flex; gap: 0.4rem; flex-wrap: wrap; margin-bottom: 0.75rem; }
    .card { background: var(--card); border-radius: 12px; padding: 1rem; margin-bottom: 1rem; }
    .muted { color: var(--muted); font-size: 0.85rem; }
    .avatar { width: 2.5rem; height: 2.5rem; border-radius: 50%; background: var(--accent); color: #fff; display: inline-flex; align-items: center; justify-content: center; font-weight: 600; margin-right: 0.6rem; }
    .kind { font-size: 0.75rem; font-weight: 600; margin-left: 0.4rem; }
    .kind-confession { color: #a855f7; } .kind-mood { color: #3b82f6; } .kind-meme { color: #22c55e; } .kind-text { color: var(--muted); }
    .content { white-space: pre-wrap; margin: 0.75rem 0; }
    img.post-image { width: 100%; max-height: 24rem; object-fit: cover; border-radius: 8px; }
    #banner { display: none; width: 100%; margin-bottom: 1rem; background: var(--accent); color: #fff; border-radius: 8px; padding: 0.5rem; }
    #fab { position: fixed; right: 1.5rem; bottom: 1.5rem; width: 3.5rem; height: 3.5rem; font-size: 1.6rem; background: var(--accent); color: #fff; }
    #composer { display: none; }
    #composer textarea, #composer input[type=text], #composer select { width: 100%; box-sizing: border-box; margin-bottom: 0.5rem; }
    #composer textarea { min-height: 5rem; }
    .error { color: #ef4444; font-size: 0.85rem; }
  </style>
</head>
<body>
  <header>
    <strong>campus-feed</strong>
    <button id="theme-toggle">Theme</button>
  </header>

  <main>
    <div id="campuses" class="row"></div>
    <div id="tabs" class="row"></div>
    <button id="banner">New Posts Available</button>

    <section id="composer" class="card">
      <div class="row">
        <button data-compose-tab="text" class="active">Text Post</button>
        <button data-compose-tab="meme">Meme Post</button>
      </div>
      <select id="post-type">
        <option value="text">Regular Post</option>
        <option value="confession">Confession</option>
        <option value="mood">Mood</option>
      </select>
      <div id="meme-upload" style="display:none">
        <input type="file" id="image-file" accept="image/*">
        <img id="image-preview" class="post-image" style="display:none" alt="Preview">
      </div>
      <textarea id="content" maxlength="280" placeholder="What's on your mind?"></textarea>
      <div class="muted"><span id="count">0</span>/280</div>
      <div id="quick-emojis" class="row"></div>
      <input type="text" id="username" placeholder="Enter your username">
      <label><input type="checkbox" id="anonymous"> Post anonymously</label>
      <select id="campus-select"></select>
      <div id="compose-errors" class="error"></div>
      <div class="row">
        <button id="submit" class="active">Post Now</button>
        <button id="cancel">Cancel</button>
      </div>
    </section>

    <div id="feed"></div>
  </main>

  <button id="fab" title="New post">+</button>

  <script>
    const TABS = [['all', 'All'], ['confessions', 'Confessions'], ['moods', 'Moods'], ['trending', 'Trending 🔥']];
    const EMOJI = { laugh: '😂', heart: '❤', fire: '🔥', eyes: '👀' };
    const QUICK = ['😂', '😭', '😍', '🔥', '💀', '✨', '💯', '👀', '🤔', '❤️'];
    let selectedCampus = 'all';
    let activeTab = 'all';
    let composeTab = 'text';
    let imageUrl = '';

    function el(tag, props, children) {
      const node = document.createElement(tag);
      Object.assign(node, props || {});
      (children || []).forEach(c => node.appendChild(c));
      return node;
    }

    async function applyTheme(res) {
      const { theme } = await res.json();
      document.documentElement.classList.toggle('dark', theme === 'dark');
      document.getElementById('theme-toggle').textContent = theme === 'dark' ? '☀' : '☾';
    }

    async function loadCampuses() {
      const campuses = await (await fetch('/campuses')).json();
      const row = document.getElementById('campuses');
      const select = document.getElementById('campus-select');
      row.innerHTML = '';
      select.innerHTML = '';
      campuses.forEach(c => {
        const chip = el('button', { textContent: c.short_name, className: c.id === selectedCampus ? 'active' : '' });
        chip.onclick = () => { selectedCampus = c.id; loadCampuses(); loadFeed(); };
        row.appendChild(chip);
        if (c.id !== 'all') {
          select.appendChild(el('option', { value: c.short_name, textContent: c.name + ' (' + c.short_name + ')' }));
        }
      });
    }

    function renderTabs() {
      const row = document.getElementById('tabs');
      row.innerHTML = '';
      TABS.forEach(([id, label]) => {
        const tab = el('button', { textContent: label, className: id === activeTab ? 'active' : '' });
        tab.onclick = () => { activeTab = id; renderTabs(); loadFeed(); };
        row.appendChild(tab);
      });
    }

    function renderPost(post) {
      const header = el('div', {}, [
        el('span', { className: 'avatar', textContent: post.author_initial }),
        el('strong', { textContent: post.author }),
        el('span', { className: 'kind kind-' + post.kind, textContent: post.kind_label }),
        el('div', { className: 'muted', textContent: post.campus + ' • ' + post.time_ago }),
      ]);
      const card = el('div', { className: 'card' }, [header]);
      if (post.image_url) {
        card.appendChild(el('img', { className: 'post-image', src: post.image_url, alt: 'Post image', loading: 'lazy' }));
      }
      card.appendChild(el('div', { className: 'content', textContent: post.content }));

      const reactions = el('div', { className: 'row' });
      Object.keys(EMOJI).forEach(key => {
        const btn = el('button', { textContent: EMOJI[key] + ' ' + post.reactions[key] });
        btn.onclick = async () => {
          const res = await fetch('/posts/' + encodeURIComponent(post.id) + '/reactions', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ reaction: key })
          });
          if (res.ok) {
            const data = await res.json();
            btn.textContent = EMOJI[key] + ' ' + data.reactions[key];
          }
        };
        reactions.appendChild(btn);
      });
      reactions.appendChild(el('span', { className: 'muted', textContent: '💬 ' + post.comment_count }));
      ['report', 'block'].forEach(action => {
        const btn = el('button', { textContent: action === 'report' ? 'Report' : 'Block' });
        btn.onclick = () => fetch('/posts/' + encodeURIComponent(post.id) + '/' + action, { method: 'POST' });
        reactions.appendChild(btn);
      });
      card.appendChild(reactions);
      return card;
    }

    async function loadFeed() {
      const params = new URLSearchParams({ campus: selectedCampus, tab: activeTab });
      const res = await fetch('/posts?' + params);
      if (!res.ok) {
        console.error('Failed to load feed:', res.status);
        return;
      }
      const posts = await res.json();
      const feed = document.getElementById('feed');
      feed.innerHTML = '';
      if (posts.length === 0) {
        feed.appendChild(el('div', { className: 'card muted', textContent: 'No posts yet. Be the first to share something!' }));
        return;
      }
      posts.forEach(p => feed.appendChild(renderPost(p)));
    }

    async function pollLive() {
      const { new_posts_available } = await (await fetch('/live')).json();
      document.getElementById('banner').style.display = new_posts_available ? 'block' : 'none';
    }

    function setComposeTab(tab) {
      composeTab = tab;
      document.querySelectorAll('[data-compose-tab]').forEach(b => b.classList.toggle('active', b.dataset.composeTab === tab));
      document.getElementById('meme-upload').style.display = tab === 'meme' ? 'block' : 'none';
      document.getElementById('content').placeholder = tab === 'meme' ? 'Add a caption to your meme...' : "What's on your mind?";
    }

    function openComposer(open) {
      document.getElementById('composer').style.display = open ? 'block' : 'none';
      document.getElementById('compose-errors').textContent = '';
    }

    document.querySelectorAll('[data-compose-tab]').forEach(b => b.onclick = () => setComposeTab(b.dataset.composeTab));
    QUICK.forEach(e => {
      const btn = el('button', { textContent: e });
      btn.onclick = () => {
        const content = document.getElementById('content');
        content.value += e;
        content.dispatchEvent(new Event('input'));
      };
      document.getElementById('quick-emojis').appendChild(btn);
    });
    document.getElementById('content').addEventListener('input', (e) => {
      document.getElementById('count').textContent = e.target.value.length;
    });
    document.getElementById('anonymous').addEventListener('change', (e) => {
      document.getElementById('username').style.display = e.target.checked ? 'none' : 'block';
    });
    document.getElementById('image-file').addEventListener('change', async (e) => {
      const file = e.target.files[0];
      if (!file) return;
      const res = await fetch('/images', { method: 'POST', headers: { 'Content-Type': file.type }, body: file });
      if (!res.ok) {
        document.getElementById('compose-errors').textContent = await res.text();
        return;
      }
      imageUrl = (await res.json()).image_url;
      const preview = document.getElementById('image-preview');
      preview.src = imageUrl;
      preview.style.display = 'block';
    });

    document.getElementById('submit').addEventListener('click', async () => {
      const res = await fetch('/posts', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          tab: composeTab,
          content: document.getElementById('content').value,
          image_url: composeTab === 'meme' ? imageUrl : null,
          username: document.getElementById('username').value,
          is_anonymous: document.getElementById('anonymous').checked,
          campus: document.getElementById('campus-select').value,
          post_type: document.getElementById('post-type').value
        })
      });
      if (!res.ok) {
        const body = await res.json().catch(() => null);
        const errors = body && body.error && body.error.violations
          ? body.error.violations.map(v => v.message).join('; ')
          : 'Failed: ' + res.status;
        document.getElementById('compose-errors').textContent = errors;
        return;
      }
      document.getElementById('content').value = '';
      document.getElementById('count').textContent = '0';
      imageUrl = '';
      document.getElementById('image-preview').style.display = 'none';
      openComposer(false);
      await loadFeed();
    });

    document.getElementById('cancel').onclick = () => openComposer(false);
    document.getElementById('fab').onclick = () => openComposer(true);
    document.getElementById('banner').onclick = async () => {
      await fetch('/live/ack', { method: 'POST' });
      document.getElementById('banner').style.display = 'none';
    };
    document.getElementById('theme-toggle').onclick = async () => applyTheme(await fetch('/theme/toggle', { method: 'POST' }));

    // Initial load
    fetch('/theme').then(applyTheme).catch(console.error);
    loadCampuses().catch(console.error);
    renderTabs();
    loadFeed().catch(console.error);
    setInterval(() => pollLive().catch(console.error), 5000);
  </script>
</body>
</html>
"#;
