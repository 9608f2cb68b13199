//! Frontend file bodies. Only the vanilla variant is a complete application;
//! the framework variants get a README that says what is still missing.

use super::{fill, html_escape};
use crate::domain::{FrontendKind, ProjectConfig, registry};

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{{NAME}}</title>
    <link rel="stylesheet" href="styles.css" />
  </head>
  <body>
    <main class="container">
      <header>
        <h1>{{NAME}}</h1>
        <p class="subtitle">{{DESCRIPTION}}</p>
      </header>

      <div id="error-banner" class="error-banner" role="alert" hidden>
        <span id="error-message"></span>
        <button id="error-dismiss" type="button" aria-label="Dismiss">&times;</button>
      </div>

      <form id="task-form" class="task-form">
        <input id="task-title" type="text" placeholder="What needs doing?" maxlength="200" required />
        <button type="submit">Add</button>
      </form>

      <div id="loading" class="loading" hidden>Loading&hellip;</div>

      <ul id="task-list" class="task-list"></ul>

      <footer>
        <small id="mode">{{MODE}}</small>
      </footer>
    </main>

    <script src="app.js"></script>
  </body>
</html>
"##;

const STYLES_CSS: &str = r##":root {
  --bg: #f5f7fa;
  --card: #ffffff;
  --text: #1f2933;
  --muted: #7b8794;
  --accent: #3f51b5;
  --danger: #d64545;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
  background: var(--bg);
  color: var(--text);
}

.container {
  max-width: 640px;
  margin: 3rem auto;
  padding: 2rem;
  background: var(--card);
  border-radius: 12px;
  box-shadow: 0 8px 24px rgba(0, 0, 0, 0.06);
}

.subtitle {
  color: var(--muted);
  margin-top: -0.5rem;
}

.error-banner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 0.75rem 1rem;
  margin-bottom: 1rem;
  border-radius: 8px;
  background: #fde8e8;
  color: var(--danger);
}

.error-banner button {
  border: none;
  background: transparent;
  color: inherit;
  font-size: 1.25rem;
  cursor: pointer;
}

.task-form {
  display: flex;
  gap: 0.5rem;
  margin-bottom: 1.5rem;
}

.task-form input {
  flex: 1;
  padding: 0.6rem 0.8rem;
  border: 1px solid #cbd2d9;
  border-radius: 8px;
  font-size: 1rem;
}

button {
  padding: 0.6rem 1rem;
  border: none;
  border-radius: 8px;
  background: var(--accent);
  color: #fff;
  font-size: 1rem;
  cursor: pointer;
}

.loading {
  color: var(--muted);
  margin-bottom: 1rem;
}

.task-list {
  list-style: none;
  padding: 0;
  margin: 0;
}

.task-list li {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  padding: 0.75rem 0;
  border-bottom: 1px solid #e4e7eb;
}

.task-list li.completed span {
  text-decoration: line-through;
  color: var(--muted);
}

.task-list li span {
  flex: 1;
}

.task-list li button.delete {
  background: transparent;
  color: var(--danger);
}

footer {
  margin-top: 1.5rem;
  color: var(--muted);
}
"##;

const APP_JS: &str = r##"const API_BASE = '{{API_BASE}}';
const USE_API = {{USE_API}};
const POLL_INTERVAL_MS = 10000;
const STORAGE_KEY = '{{NAME}}-tasks';

const els = {
  form: document.getElementById('task-form'),
  title: document.getElementById('task-title'),
  list: document.getElementById('task-list'),
  loading: document.getElementById('loading'),
  banner: document.getElementById('error-banner'),
  message: document.getElementById('error-message'),
  dismiss: document.getElementById('error-dismiss'),
};

let tasks = [];

// ---- Storage backends ----

async function request(path, options = {}) {
  const res = await fetch(`${API_BASE}${path}`, {
    headers: { 'Content-Type': 'application/json' },
    ...options,
  });
  if (!res.ok) {
    const body = await res.json().catch(() => ({}));
    throw new Error(body.error?.message || `Request failed with status ${res.status}`);
  }
  return res.status === 204 ? null : res.json();
}

const apiStore = {
  list: () => request('/tasks'),
  create: (title) => request('/tasks', { method: 'POST', body: JSON.stringify({ title }) }),
  update: (id, patch) =>
    request(`/tasks/${id}`, { method: 'PATCH', body: JSON.stringify(patch) }),
  remove: (id) => request(`/tasks/${id}`, { method: 'DELETE' }),
};

function readLocal() {
  try {
    return JSON.parse(localStorage.getItem(STORAGE_KEY)) || [];
  } catch {
    return [];
  }
}

function writeLocal(items) {
  localStorage.setItem(STORAGE_KEY, JSON.stringify(items));
}

const localStore = {
  list: async () => readLocal(),
  create: async (title) => {
    const now = new Date().toISOString();
    const task = { id: crypto.randomUUID(), title, completed: false, createdAt: now, updatedAt: now };
    writeLocal([...readLocal(), task]);
    return task;
  },
  update: async (id, patch) => {
    const items = readLocal().map((t) =>
      t.id === id ? { ...t, ...patch, updatedAt: new Date().toISOString() } : t,
    );
    writeLocal(items);
    return items.find((t) => t.id === id);
  },
  remove: async (id) => {
    writeLocal(readLocal().filter((t) => t.id !== id));
    return null;
  },
};

const store = USE_API ? apiStore : localStore;

// ---- UI ----

function showError(message) {
  els.message.textContent = message;
  els.banner.hidden = false;
}

function clearError() {
  els.banner.hidden = true;
}

function setLoading(on) {
  els.loading.hidden = !on;
}

function render() {
  els.list.replaceChildren(
    ...tasks.map((task) => {
      const li = document.createElement('li');
      li.className = task.completed ? 'completed' : '';

      const checkbox = document.createElement('input');
      checkbox.type = 'checkbox';
      checkbox.checked = task.completed;
      checkbox.addEventListener('change', () => run(() => store.update(task.id, { completed: checkbox.checked })));

      const title = document.createElement('span');
      title.textContent = task.title;

      const remove = document.createElement('button');
      remove.className = 'delete';
      remove.type = 'button';
      remove.textContent = 'Delete';
      remove.addEventListener('click', () => run(() => store.remove(task.id)));

      li.append(checkbox, title, remove);
      return li;
    }),
  );
}

async function refresh() {
  try {
    tasks = await store.list();
    clearError();
    render();
  } catch (err) {
    showError(err.message);
  }
}

async function run(action) {
  setLoading(true);
  try {
    await action();
    await refresh();
  } catch (err) {
    showError(err.message);
  } finally {
    setLoading(false);
  }
}

els.form.addEventListener('submit', (event) => {
  event.preventDefault();
  const title = els.title.value.trim();
  if (!title) {
    return;
  }
  els.title.value = '';
  run(() => store.create(title));
});

els.dismiss.addEventListener('click', clearError);

setLoading(true);
refresh().finally(() => setLoading(false));

if (USE_API) {
  setInterval(refresh, POLL_INTERVAL_MS);
}
"##;

/// `index.html`, `styles.css`, `app.js` and `README.md` of the vanilla frontend.
pub fn vanilla_files(config: &ProjectConfig) -> Vec<(String, String)> {
    let api_base = config.api_base_url();
    let mode = if config.connect_to_backend() {
        format!("Connected to {api_base}")
    } else {
        "Offline mode: tasks are stored in this browser".to_string()
    };
    let use_api = config.connect_to_backend().to_string();
    let vars = [
        ("NAME", config.name()),
        ("API_BASE", api_base.as_str()),
        ("USE_API", use_api.as_str()),
    ];

    let html_name = html_escape(config.name());
    let html_description = html_escape(config.description());
    let html_mode = html_escape(&mode);
    let html_vars = [
        ("NAME", html_name.as_str()),
        ("DESCRIPTION", html_description.as_str()),
        ("MODE", html_mode.as_str()),
    ];

    vec![
        ("index.html".to_string(), fill(INDEX_HTML, &html_vars)),
        ("styles.css".to_string(), STYLES_CSS.to_string()),
        ("app.js".to_string(), fill(APP_JS, &vars)),
        ("README.md".to_string(), vanilla_readme(config)),
    ]
}

fn vanilla_readme(config: &ProjectConfig) -> String {
    let port = registry::frontend_port(FrontendKind::Vanilla).unwrap_or_default();
    let backend = if config.connect_to_backend() {
        format!(
            "The app talks to the backend at `{}`. Start the backend first.",
            config.api_base_url()
        )
    } else {
        "The app is not connected to the backend; tasks live in `localStorage`.".to_string()
    };
    format!(
        "# {name} frontend\n\nPlain HTML, CSS and JavaScript. No build step.\n\n\
## Run\n\n```bash\nnpm start\n```\n\nThen open http://localhost:{port}.\n\n{backend}\n",
        name = config.name()
    )
}

/// Command that scaffolds the real application for a stub frontend.
fn scaffold_hint(kind: FrontendKind) -> &'static str {
    match kind {
        FrontendKind::Vue => "npm create vue@latest .",
        FrontendKind::React => "npm create vite@latest . -- --template react-ts",
        FrontendKind::Svelte => "npm create vite@latest . -- --template svelte-ts",
        FrontendKind::Angular => "npx @angular/cli new app --directory .",
        FrontendKind::Next => "npx create-next-app@latest .",
        FrontendKind::Vanilla | FrontendKind::None => "",
    }
}

/// README of a frontend whose sources are not generated yet.
pub fn stub_readme(config: &ProjectConfig) -> String {
    let kind = config.frontend();
    let (display, port) = registry::find_frontend(kind)
        .map(|def| (def.display_name, def.port))
        .unwrap_or((kind.as_str(), 0));
    let backend = if config.connect_to_backend() {
        format!("\nPoint API calls at `{}`.\n", config.api_base_url())
    } else {
        String::new()
    };
    format!(
        "# {name} frontend ({display})\n\n\
> **Pending:** only `package.json` has been generated for this framework.\n\n\
Finish scaffolding with:\n\n```bash\n{hint}\n```\n\n\
The dev server is expected on http://localhost:{port}, which the backend's\n\
`CORS_ORIGIN` already allows.\n{backend}",
        name = config.name(),
        hint = scaffold_hint(kind),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanilla(port: u16, connect: bool) -> ProjectConfig {
        ProjectConfig::builder()
            .name("demo-web")
            .frontend(FrontendKind::Vanilla)
            .port(port)
            .connect_to_backend(connect)
            .build()
            .unwrap()
    }

    fn body<'a>(files: &'a [(String, String)], name: &str) -> &'a str {
        &files.iter().find(|(p, _)| p == name).unwrap().1
    }

    #[test]
    fn vanilla_targets_backend_api() {
        let files = vanilla_files(&vanilla(4000, true));
        let app = body(&files, "app.js");
        assert!(app.contains("const API_BASE = 'http://localhost:4000/api';"));
        assert!(app.contains("const USE_API = true;"));
        assert!(app.contains("setInterval(refresh, POLL_INTERVAL_MS)"));
        assert!(!app.contains("{{"));
    }

    #[test]
    fn disconnected_vanilla_uses_local_storage() {
        let files = vanilla_files(&vanilla(5000, false));
        assert!(body(&files, "app.js").contains("const USE_API = false;"));
        assert!(body(&files, "README.md").contains("localStorage"));
    }

    #[test]
    fn html_has_banner_and_loading_indicator() {
        let files = vanilla_files(&vanilla(5000, true));
        let html = body(&files, "index.html");
        assert!(html.contains("id=\"error-banner\""));
        assert!(html.contains("id=\"loading\""));
        assert!(html.contains("<title>demo-web</title>"));
    }

    #[test]
    fn html_escapes_the_description() {
        let config = ProjectConfig::builder()
            .name("demo-web")
            .description(r#"Tasks <b>& "more"</b>"#)
            .frontend(FrontendKind::Vanilla)
            .build()
            .unwrap();
        let files = vanilla_files(&config);
        let html = body(&files, "index.html");
        assert!(html.contains(
            r#"<p class="subtitle">Tasks &lt;b&gt;&amp; &quot;more&quot;&lt;/b&gt;</p>"#
        ));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn stub_readme_announces_pending_generation() {
        let config = ProjectConfig::builder()
            .name("demo")
            .frontend(FrontendKind::Angular)
            .build()
            .unwrap();
        let readme = stub_readme(&config);
        assert!(readme.contains("Pending"));
        assert!(readme.contains("http://localhost:4200"));
        assert!(readme.contains("@angular/cli"));
    }
}
