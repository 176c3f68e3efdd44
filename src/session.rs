//! The headless SPA session: navigation state machine plus content loader.
//!
//! A `Session` is the explicit application-state object: route table, shell,
//! content container, reveal animator, theme state, and the environment
//! seams, all in one place. Events arrive as method calls (`start`, `click`,
//! `pop_state`) and each completes synchronously before the next begins, so
//! no partial state is ever observable. A click issued while a previous
//! fetch is still unresolved is a concern only for callers that interleave
//! sessions themselves; see `AsyncSession` for the serialized variant.

use log::{debug, error};

use crate::dom::{ContentContainer, NavLink, Shell};
use crate::env::Environment;
use crate::reveal::RevealAnimator;
use crate::routes::RouteTable;
use crate::theme::{Theme, ThemeController, ToggleIcon};
use crate::{AppConfig, Error, PageSnapshot, Result};

/// A single-page-app session over a static shell
pub struct Session {
    config: AppConfig,
    routes: RouteTable,
    shell: Shell,
    container: ContentContainer,
    reveal: RevealAnimator,
    theme: ThemeController,
    env: Environment,
    current_path: String,
    last_load_failed: bool,
}

impl Session {
    /// Build a session: parse the shell, restore the persisted theme, and
    /// take the initial logical path from the address bar. No content is
    /// loaded until [`start`](Session::start).
    pub fn new(
        config: AppConfig,
        routes: RouteTable,
        shell_html: &str,
        env: Environment,
    ) -> Result<Self> {
        let shell = Shell::parse(shell_html, &config)?;
        let theme = ThemeController::restore(env.store.as_ref(), &config.theme_key);
        let current_path = env.history.current_path();

        Ok(Self {
            config,
            routes,
            shell,
            container: ContentContainer::default(),
            reveal: RevealAnimator::new(),
            theme,
            env,
            current_path,
            last_load_failed: false,
        })
    }

    /// Initial page load: loads content for the current address-bar path.
    /// No history push; the entry already exists from the page load itself.
    pub fn start(&mut self) {
        let path = self.env.history.current_path();
        self.load_content(path);
    }

    /// An intercepted click on a designated nav link. Pushes the target
    /// path onto history (the address changes, no reload), then loads it.
    pub fn click(&mut self, href: &str) {
        self.env.history.push(href);
        self.load_content(href.to_string());
    }

    /// Back/forward notification: the address changed without a reload and
    /// the entry already exists, so load the current address without
    /// pushing.
    pub fn pop_state(&mut self) {
        let path = self.env.history.current_path();
        self.load_content(path);
    }

    /// The content load pipeline. On success: inject the fragment verbatim,
    /// re-arm the reveal animator against the new subtree (required
    /// lifecycle hook, the old watch list died with the old subtree), and
    /// recompute active links. On any failure: log it, swap in the error
    /// card, and leave links and animator untouched. Nothing propagates
    /// past this boundary; there is no retry.
    fn load_content(&mut self, path: String) {
        debug!("navigate: {}", path);
        match self.fetch_fragment(&path) {
            Ok(body) => {
                self.container.set_html(&body);
                let candidates = self.container.reveal_candidates(&self.config.hidden_class);
                self.reveal.arm(candidates);
                self.update_active_links(&path);
                self.last_load_failed = false;
            }
            Err(e) => {
                error!("Error loading page: {}", e);
                self.container.set_html(&self.config.error_card_html);
                self.last_load_failed = true;
            }
        }
        // The address bar already shows the new path either way
        self.current_path = path;
    }

    fn fetch_fragment(&self, path: &str) -> Result<String> {
        let resource = self.routes.resolve(path);
        let response = self.env.fetcher.fetch(resource)?;
        if !response.is_success() {
            return Err(Error::PageLoad {
                resource: resource.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Mark each nav link active iff its target equals the loaded path.
    /// Zero matches is allowed: an unmapped path normalizes to the root
    /// content but highlights nothing.
    fn update_active_links(&mut self, path: &str) {
        for link in &mut self.shell.nav_links {
            link.active = link.href == path;
        }
    }

    /// Flip the theme; all mirrors and the persisted preference update
    /// within this call.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme
            .toggle(self.env.store.as_ref(), &self.config.theme_key)
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn toggle_icon(&self) -> ToggleIcon {
        self.theme.icon()
    }

    /// Current logical path, mirroring the address bar
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.shell.nav_links
    }

    /// Target of the link currently marked active, if any
    pub fn active_link(&self) -> Option<&str> {
        self.shell
            .nav_links
            .iter()
            .find(|l| l.active)
            .map(|l| l.href.as_str())
    }

    pub fn container(&self) -> &ContentContainer {
        &self.container
    }

    /// The animator, for feeding visibility reports
    pub fn reveal_mut(&mut self) -> &mut RevealAnimator {
        &mut self.reveal
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            path: self.current_path.clone(),
            html: self.container.html().to_string(),
            text: self.container.text(),
            active_link: self.active_link().map(str::to_string),
            theme: self.theme.theme(),
            load_failed: self.last_load_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::history::HistorySink;
    use crate::env::{MemoryHistory, MemoryStore, StaticFetcher};
    use std::sync::Arc;

    const SHELL: &str = r#"<nav>
        <a class="nav-link" href="/">Home</a>
        <a class="nav-link" href="/projects">Projects</a>
        <a class="nav-link" href="/certifications">Certifications</a>
        <button id="theme-toggle"></button>
    </nav>"#;

    fn site_fetcher() -> StaticFetcher {
        StaticFetcher::new()
            .with("pages/home.html", "<h1>Home</h1><p>Welcome</p>")
            .with(
                "pages/projects.html",
                r#"<h1 class="hidden" id="projects-title">Projects</h1>"#,
            )
            .with("pages/certifications.html", "<h1>Certifications</h1>")
    }

    fn session_at(path: &str) -> (Session, Arc<MemoryHistory>) {
        let history = Arc::new(MemoryHistory::new(path));
        let env = Environment {
            fetcher: Arc::new(site_fetcher()),
            history: history.clone(),
            store: Arc::new(MemoryStore::new()),
        };
        let session =
            Session::new(AppConfig::default(), RouteTable::personal_site(), SHELL, env)
                .expect("session builds");
        (session, history)
    }

    #[test]
    fn initial_load_uses_address_bar_path() {
        let (mut session, history) = session_at("/projects");
        session.start();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.path, "/projects");
        assert_eq!(snapshot.text, "Projects");
        assert_eq!(snapshot.active_link.as_deref(), Some("/projects"));
        assert!(!snapshot.load_failed);
        // No push happened: the load-time entry is the only one
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn click_pushes_one_entry_and_swaps_content() {
        let (mut session, history) = session_at("/");
        session.start();

        session.click("/certifications");

        assert_eq!(history.len(), 2);
        assert_eq!(history.current_path(), "/certifications");
        assert_eq!(session.current_path(), "/certifications");
        assert_eq!(session.container().text(), "Certifications");
        assert_eq!(session.active_link(), Some("/certifications"));
    }

    #[test]
    fn back_swaps_content_without_new_entry() {
        let (mut session, history) = session_at("/");
        session.start();
        session.click("/certifications");

        assert_eq!(history.back().as_deref(), Some("/"));
        session.pop_state();

        assert_eq!(history.len(), 2);
        assert_eq!(session.current_path(), "/");
        assert_eq!(session.container().text(), "Home Welcome");
        assert_eq!(session.active_link(), Some("/"));
    }

    #[test]
    fn unknown_path_shows_home_but_highlights_nothing() {
        let (mut session, _) = session_at("/no-such-page");
        session.start();

        assert_eq!(session.container().text(), "Home Welcome");
        assert_eq!(session.active_link(), None);
        assert_eq!(session.current_path(), "/no-such-page");
    }

    #[test]
    fn exactly_one_link_active_after_each_navigation() {
        let (mut session, _) = session_at("/");
        session.start();
        session.click("/projects");
        session.click("/certifications");

        let active: Vec<&NavLink> =
            session.nav_links().iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "/certifications");
    }

    #[test]
    fn failed_load_swaps_in_error_card_and_leaves_links_alone() {
        let history = Arc::new(MemoryHistory::new("/"));
        let mut routes = std::collections::HashMap::new();
        routes.insert("/".to_string(), "pages/home.html".to_string());
        routes.insert("/broken".to_string(), "pages/missing.html".to_string());

        let shell = r#"<nav>
            <a class="nav-link" href="/">Home</a>
            <a class="nav-link" href="/broken">Broken</a>
        </nav>"#;

        let env = Environment {
            fetcher: Arc::new(StaticFetcher::new().with("pages/home.html", "<h1>Home</h1>")),
            history: history.clone(),
            store: Arc::new(MemoryStore::new()),
        };
        let mut session = Session::new(
            AppConfig::default(),
            RouteTable::new(routes).unwrap(),
            shell,
            env,
        )
        .unwrap();

        session.start();
        assert_eq!(session.active_link(), Some("/"));

        session.click("/broken");
        let snapshot = session.snapshot();
        assert!(snapshot.load_failed);
        assert_eq!(
            snapshot.text,
            "Error: Could not load page content. Please try again."
        );
        // The failed attempt did not touch active-link state
        assert_eq!(session.active_link(), Some("/"));
        // The push still happened before the load, like the original flow
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn successful_load_rearms_reveal_animator() {
        let (mut session, _) = session_at("/");
        session.start();
        assert_eq!(session.reveal().watched().count(), 0);

        session.click("/projects");
        let watched: Vec<&str> = session.reveal().watched().collect();
        assert_eq!(watched, vec!["projects-title"]);

        assert!(session.reveal_mut().report_visibility("projects-title", 0.5));
        assert!(session.reveal().is_shown("projects-title"));

        // Navigating away replaces the watch list
        session.click("/");
        assert!(!session.reveal().is_shown("projects-title"));
    }

    #[test]
    fn theme_survives_a_simulated_reload() {
        let store = Arc::new(MemoryStore::new());
        let env = Environment {
            fetcher: Arc::new(site_fetcher()),
            history: Arc::new(MemoryHistory::new("/")),
            store: store.clone(),
        };
        let mut session =
            Session::new(AppConfig::default(), RouteTable::personal_site(), SHELL, env)
                .unwrap();
        assert_eq!(session.theme(), Theme::Light);
        session.toggle_theme().unwrap();
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.toggle_icon(), ToggleIcon::Sun);

        // Fresh session over the same store: dark applies before any input
        let env = Environment {
            fetcher: Arc::new(site_fetcher()),
            history: Arc::new(MemoryHistory::new("/")),
            store,
        };
        let reloaded =
            Session::new(AppConfig::default(), RouteTable::personal_site(), SHELL, env)
                .unwrap();
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(reloaded.toggle_icon(), ToggleIcon::Sun);
    }
}
