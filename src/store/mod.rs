use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// UI color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Explicit, injectable holder for the current theme: a single mutable cell
/// with change notification, instead of a process-wide singleton.
pub struct ThemeStore {
    sender: watch::Sender<Theme>,
}

impl ThemeStore {
    /// Starts dark, matching the application default.
    pub fn new() -> Self {
        Self::with_initial(Theme::Dark)
    }

    pub fn with_initial(theme: Theme) -> Self {
        let (sender, _) = watch::channel(theme);
        Self { sender }
    }

    pub fn current(&self) -> Theme {
        *self.sender.borrow()
    }

    pub fn set(&self, theme: Theme) {
        self.sender.send_replace(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Receiver that observes every subsequent theme change.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}
