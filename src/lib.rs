//! microspa
//!
//! A headless single-page-app engine for static sites. It reproduces the
//! behavior of a minimal client-side page router — fetch an HTML fragment,
//! swap it into a content container, keep browser history and the active
//! nav link in sync, re-arm scroll-reveal animations, persist a light/dark
//! theme — without a live document. Every browser surface (fetch, history,
//! durable key-value storage) is a trait seam with an in-memory
//! implementation, so sessions can be driven by synthetic events in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use microspa::env::{Environment, MemoryHistory, MemoryStore, StaticFetcher};
//! use microspa::{AppConfig, RouteTable, Session};
//!
//! # fn main() -> microspa::Result<()> {
//! let fetcher = StaticFetcher::new()
//!     .with("pages/home.html", "<h1>Home</h1>")
//!     .with("pages/projects.html", "<h1 class=\"hidden\">Projects</h1>");
//!
//! let env = Environment {
//!     fetcher: Arc::new(fetcher),
//!     history: Arc::new(MemoryHistory::new("/projects")),
//!     store: Arc::new(MemoryStore::new()),
//! };
//!
//! let shell = r#"<nav>
//!     <a class="nav-link" href="/">Home</a>
//!     <a class="nav-link" href="/projects">Projects</a>
//! </nav>"#;
//!
//! let mut session = Session::new(AppConfig::default(), RouteTable::personal_site(), shell, env)?;
//! session.start();
//! assert_eq!(session.active_link(), Some("/projects"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod routes;
pub use routes::RouteTable;

pub mod dom;
pub mod reveal;
pub mod theme;
pub use theme::{Theme, ToggleIcon};

// Environment seams: fragment fetch, history, preference storage
pub mod env;

pub mod session;
pub use session::Session;

// Async-friendly session API (simple worker-backed abstraction)
pub mod async_api;
pub use async_api::AsyncSession;

use serde::Serialize;

/// Fixed markup swapped into the container when a load fails.
pub const ERROR_CARD_HTML: &str =
    r#"<p class="card">Error: Could not load page content. Please try again.</p>"#;

/// Configuration for a headless SPA session
///
/// The defaults mirror the markup conventions of the static site this engine
/// was built for: nav links carry the `nav-link` class, reveal candidates the
/// `hidden` class, and the theme preference lives under the `theme` key.
///
/// # Examples
///
/// ```
/// let cfg = microspa::AppConfig::default();
/// assert_eq!(cfg.nav_link_selector, ".nav-link");
/// assert_eq!(cfg.theme_key, "theme");
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// User agent string to send with fragment requests
    pub user_agent: String,
    /// Timeout for fragment fetches in milliseconds
    pub timeout_ms: u64,
    /// CSS selector identifying designated navigation links in the shell
    pub nav_link_selector: String,
    /// CSS selector identifying the theme toggle control in the shell
    pub theme_toggle_selector: String,
    /// Class marking elements as initially hidden (scroll-reveal candidates)
    pub hidden_class: String,
    /// Storage key the theme preference is persisted under
    pub theme_key: String,
    /// Markup injected into the container when a load fails
    pub error_card_html: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/115.0 microspa/0.1"
                .to_string(),
            timeout_ms: 30000,
            nav_link_selector: ".nav-link".to_string(),
            theme_toggle_selector: "#theme-toggle".to_string(),
            hidden_class: "hidden".to_string(),
            theme_key: "theme".to_string(),
            error_card_html: ERROR_CARD_HTML.to_string(),
        }
    }
}

/// A snapshot of the session's user-visible state
///
/// Returned by [`Session::snapshot`] after any navigation. `text` is the
/// container's visible text, suitable for textual tests and quick inspection.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    /// Current logical path (mirrors the address bar)
    pub path: String,
    /// Raw HTML currently held by the content container
    pub html: String,
    /// Visible text extracted from the container
    pub text: String,
    /// Target of the nav link currently marked active, if any
    pub active_link: Option<String>,
    /// Applied visual theme
    pub theme: Theme,
    /// Whether the most recent load ended in the error card
    pub load_failed: bool,
}
