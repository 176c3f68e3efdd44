//! Light/dark theme state, mirrored in three places that always move
//! together: the document-level class, the toggle icon glyph, and the
//! persisted preference string.

use serde::{Deserialize, Serialize};

use crate::env::PreferenceStore;
use crate::Result;

/// Class applied at the document level while dark mode is active
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// The two-valued visual theme. Absence of a stored value means light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The literal persisted under the storage key
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored preference; anything but `"dark"` (including
    /// nothing, or junk) is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Glyph shown on the toggle control: moon while light, sun while dark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    Moon,
    Sun,
}

/// Owns the theme state and keeps the three mirrors in sync
#[derive(Debug)]
pub struct ThemeController {
    theme: Theme,
}

impl ThemeController {
    /// Startup: read the persisted preference and apply it immediately,
    /// before any user interaction.
    pub fn restore(store: &dyn PreferenceStore, key: &str) -> Self {
        let theme = Theme::from_stored(store.get(key).as_deref());
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn icon(&self) -> ToggleIcon {
        match self.theme {
            Theme::Light => ToggleIcon::Moon,
            Theme::Dark => ToggleIcon::Sun,
        }
    }

    /// The document-level class currently applied, if any
    pub fn body_class(&self) -> Option<&'static str> {
        match self.theme {
            Theme::Light => None,
            Theme::Dark => Some(DARK_MODE_CLASS),
        }
    }

    /// Flip the theme and persist the new preference. All three mirrors
    /// update within this one synchronous call; no intermediate state is
    /// observable.
    pub fn toggle(&mut self, store: &dyn PreferenceStore, key: &str) -> Result<Theme> {
        self.theme = self.theme.flipped();
        store.set(key, self.theme.as_str())?;
        Ok(self.theme)
    }
}
