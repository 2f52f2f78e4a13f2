//! Mode dispatch on the leading sigil of the query text.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Where a mode draws its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// The command registry's full set.
    Registry,
    /// The static help menu.
    HelpMenu,
    /// Recent bookmarks plus bookmark search results.
    Bookmarks,
    /// Open tabs.
    Tabs,
}

/// Candidates shown while the search term is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyTermPolicy {
    /// The whole candidate set, in source order.
    ShowAll,
    /// Only the mode's "recent" subset; live search results are held back
    /// until a term is typed.
    RecentOnly,
}

/// The palette's input modes, selected by the first character of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Command,
    Help,
    Bookmark,
    Tab,
}

impl Mode {
    /// In dispatch precedence order.
    pub const ALL: [Mode; 4] = [Mode::Command, Mode::Help, Mode::Bookmark, Mode::Tab];

    /// Pick the mode for `text`: `>` commands, `?` help, `#` bookmarks,
    /// anything else (including empty text) tabs.
    pub fn dispatch(text: &str) -> Mode {
        let first = text.chars().next();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.sigil().is_some() && mode.sigil() == first)
            .unwrap_or(Mode::Tab)
    }

    pub fn sigil(self) -> Option<char> {
        match self {
            Mode::Command => Some('>'),
            Mode::Help => Some('?'),
            Mode::Bookmark => Some('#'),
            Mode::Tab => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Mode::Command => 0,
            Mode::Help => 1,
            Mode::Bookmark => 2,
            Mode::Tab => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Command => "command",
            Mode::Help => "help",
            Mode::Bookmark => "bookmark",
            Mode::Tab => "tab",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the session needs to know about one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSpec {
    pub mode: Mode,
    pub source: CandidateSource,
    /// Characters stripped from the front of the text before matching.
    pub strip_prefix: usize,
    pub empty_term: EmptyTermPolicy,
    /// Delay before a text edit is re-ranked; zero means immediately.
    pub debounce: Duration,
}

impl ModeSpec {
    /// The search term for `text`: prefix stripped, then trimmed.
    pub fn search_term(&self, text: &str) -> String {
        let stripped = match text.char_indices().nth(self.strip_prefix) {
            Some((byte, _)) => &text[byte..],
            None => "",
        };
        stripped.trim().to_string()
    }
}

/// Lookup table from [`Mode`] to its [`ModeSpec`].
#[derive(Debug, Clone)]
pub struct ModeTable {
    specs: [ModeSpec; 4],
}

impl ModeTable {
    pub fn new(command_debounce: Duration) -> Self {
        let spec = |mode, source, strip_prefix, empty_term, debounce| ModeSpec {
            mode,
            source,
            strip_prefix,
            empty_term,
            debounce,
        };
        Self {
            specs: [
                spec(
                    Mode::Command,
                    CandidateSource::Registry,
                    1,
                    EmptyTermPolicy::ShowAll,
                    command_debounce,
                ),
                spec(
                    Mode::Help,
                    CandidateSource::HelpMenu,
                    1,
                    EmptyTermPolicy::ShowAll,
                    Duration::ZERO,
                ),
                spec(
                    Mode::Bookmark,
                    CandidateSource::Bookmarks,
                    1,
                    EmptyTermPolicy::RecentOnly,
                    Duration::ZERO,
                ),
                spec(
                    Mode::Tab,
                    CandidateSource::Tabs,
                    0,
                    EmptyTermPolicy::ShowAll,
                    Duration::ZERO,
                ),
            ],
        }
    }

    pub fn spec(&self, mode: Mode) -> &ModeSpec {
        &self.specs[mode.index()]
    }

    /// The spec of the mode `text` selects.
    pub fn dispatch(&self, text: &str) -> &ModeSpec {
        self.spec(Mode::dispatch(text))
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::new(Duration::from_millis(128))
    }
}
