//! Theme preference store.

use std::sync::Arc;

use crate::storage::{Storage, THEME_KEY};

/// Light or dark theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted representation, the literal key value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    fn flipped(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Tracks the theme preference and persists it under [`THEME_KEY`].
pub struct ThemeStore {
    theme: Theme,
    storage: Arc<dyn Storage>,
}

impl ThemeStore {
    /// Read the persisted preference; absent or unreadable values fall back
    /// to `system_preference` (light when the platform reports nothing).
    pub fn load(storage: Arc<dyn Storage>, system_preference: Theme) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::from_str(raw.trim()).unwrap_or(system_preference),
            Ok(None) => system_preference,
            Err(e) => {
                tracing::warn!("Failed to read theme preference, using system default: {}", e);
                system_preference
            }
        };

        Self { theme, storage }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip between light and dark, persist, and return the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();

        if let Err(e) = self.storage.set(THEME_KEY, self.theme.as_str()) {
            tracing::error!("Failed to save theme preference: {}", e);
        }

        self.theme
    }
}
