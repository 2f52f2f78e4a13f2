//! Palette behaviour: initial text, per-mode timing, cache sizes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Palette session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Text the input starts with when the palette opens.
    pub default_text: String,
    /// Debounce for command-mode matching, in milliseconds (0-2000).
    pub command_debounce_ms: u64,
    /// How many recent bookmarks are fetched when a session starts (1-1000).
    pub recent_bookmarks: u32,
    /// Maximum queued notifications (1-256).
    pub notification_capacity: u32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            default_text: ">".into(),
            command_debounce_ms: 128,
            recent_bookmarks: 100,
            notification_capacity: 16,
        }
    }
}

impl PaletteConfig {
    pub fn command_debounce(&self) -> Duration {
        Duration::from_millis(self.command_debounce_ms)
    }
}
