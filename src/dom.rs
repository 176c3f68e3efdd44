//! Headless document model: the static page shell and the swap container.
//!
//! The engine never touches a live DOM. The two surfaces the original page
//! mutates are modeled explicitly instead: the shell (nav links and the
//! theme toggle, parsed once at startup) and the content container (holds
//! exactly the current fragment or the error card, replaced wholesale on
//! every navigation).

use scraper::{Html, Selector};

use crate::{AppConfig, Error, Result};

/// A designated navigation link discovered in the shell
#[derive(Debug, Clone)]
pub struct NavLink {
    /// Target logical path, read from the link's `href`
    pub href: String,
    /// Visible label text
    pub label: String,
    /// Whether this link is currently marked active. Derived state: it is
    /// recomputed against the loaded path on every successful navigation.
    pub active: bool,
}

/// The static page shell, parsed once per session
#[derive(Debug, Clone)]
pub struct Shell {
    /// Navigation links, in document order
    pub nav_links: Vec<NavLink>,
    /// Whether the shell carries a theme toggle control
    pub has_theme_toggle: bool,
}

impl Shell {
    /// Parse the shell HTML, discovering nav links by the configured
    /// selector. Links without an `href` are not navigation targets and are
    /// skipped.
    pub fn parse(html: &str, config: &AppConfig) -> Result<Self> {
        let document = Html::parse_document(html);

        let link_sel = Selector::parse(&config.nav_link_selector).map_err(|_| {
            Error::Config(format!(
                "invalid nav link selector: {:?}",
                config.nav_link_selector
            ))
        })?;
        let toggle_sel = Selector::parse(&config.theme_toggle_selector).map_err(|_| {
            Error::Config(format!(
                "invalid theme toggle selector: {:?}",
                config.theme_toggle_selector
            ))
        })?;

        let mut nav_links = Vec::new();
        for element in document.select(&link_sel) {
            if let Some(href) = element.value().attr("href") {
                nav_links.push(NavLink {
                    href: href.to_string(),
                    label: element.text().collect::<String>().trim().to_string(),
                    active: false,
                });
            }
        }

        let has_theme_toggle = document.select(&toggle_sel).next().is_some();

        Ok(Self {
            nav_links,
            has_theme_toggle,
        })
    }
}

/// The content container: holds the current fragment verbatim, or the error
/// card, never a mix.
#[derive(Debug, Clone, Default)]
pub struct ContentContainer {
    html: String,
}

impl ContentContainer {
    /// Replace the container's contents wholesale.
    pub fn set_html(&mut self, html: &str) {
        self.html = html.to_string();
    }

    /// The raw HTML as last injected
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Visible text of the container, whitespace-normalized
    pub fn text(&self) -> String {
        let fragment = Html::parse_fragment(&self.html);
        let raw = fragment.root_element().text().collect::<Vec<_>>().join(" ");
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Reveal-candidate keys in the current contents: every element tagged
    /// with the hidden marker class, keyed by its `id` attribute or, when it
    /// has none, by tag name and position.
    pub fn reveal_candidates(&self, hidden_class: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(&format!(".{}", hidden_class)) else {
            return Vec::new();
        };

        let fragment = Html::parse_fragment(&self.html);
        fragment
            .select(&selector)
            .enumerate()
            .map(|(index, element)| match element.value().attr("id") {
                Some(id) => id.to_string(),
                None => format!("{}:{}", element.value().name(), index),
            })
            .collect()
    }
}
