//! Desktop host backed by a JSON snapshot of browser state.
//!
//! Tabs and bookmarks come from the snapshot. With system access enabled,
//! URLs open in the system browser and clipboard writes go to the system
//! clipboard; otherwise both are only recorded in [`Activity`].

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use cmdpal_common::{Bookmark, PlatformError, Tab, TabId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clipboard;
use crate::provider::BrowserProvider;

/// Browser state as stored on disk. Bookmarks are listed newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserFixture {
    pub tabs: Vec<Tab>,
    pub bookmarks: Vec<Bookmark>,
}

impl BrowserFixture {
    pub fn from_json(json: &str) -> Result<Self, PlatformError> {
        serde_json::from_str(json)
            .map_err(|e| PlatformError::PathError(format!("invalid browser fixture: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, PlatformError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlatformError::PathError(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }
}

/// Side effects performed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub active_tab: Option<TabId>,
    pub opened: Vec<String>,
    pub clipboard: Option<String>,
}

pub struct DesktopBrowser {
    fixture: BrowserFixture,
    system_access: bool,
    activity: Mutex<Activity>,
}

impl DesktopBrowser {
    pub fn new(fixture: BrowserFixture) -> Self {
        Self {
            fixture,
            system_access: false,
            activity: Mutex::new(Activity::default()),
        }
    }

    pub fn with_system_access(mut self, enabled: bool) -> Self {
        self.system_access = enabled;
        self
    }

    pub fn activity(&self) -> Activity {
        match self.activity.lock() {
            Ok(activity) => activity.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, update: impl FnOnce(&mut Activity)) {
        let mut activity = match self.activity.lock() {
            Ok(activity) => activity,
            Err(poisoned) => poisoned.into_inner(),
        };
        update(&mut activity);
    }
}

#[async_trait]
impl BrowserProvider for DesktopBrowser {
    async fn list_tabs(&self) -> Result<Vec<Tab>, PlatformError> {
        Ok(self.fixture.tabs.clone())
    }

    async fn list_recent_bookmarks(&self, limit: usize) -> Result<Vec<Bookmark>, PlatformError> {
        Ok(self
            .fixture
            .bookmarks
            .iter()
            .filter(|bookmark| !bookmark.is_folder())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_bookmarks(&self, term: &str) -> Result<Vec<Bookmark>, PlatformError> {
        let needle = term.to_lowercase();
        let found: Vec<Bookmark> = self
            .fixture
            .bookmarks
            .iter()
            .filter(|bookmark| {
                bookmark.title.to_lowercase().contains(&needle)
                    || bookmark
                        .url
                        .as_deref()
                        .is_some_and(|url| url.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        debug!(term, count = found.len(), "bookmark search");
        Ok(found)
    }

    async fn activate_tab(&self, tab: TabId) -> Result<(), PlatformError> {
        if !self.fixture.tabs.iter().any(|t| t.id == tab) {
            return Err(PlatformError::NavigationError(format!("no such tab: {tab}")));
        }
        info!(%tab, "activating tab");
        self.record(|activity| activity.active_tab = Some(tab));
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        info!(url, "opening url");
        if self.system_access {
            launch(url)?;
        }
        self.record(|activity| activity.opened.push(url.to_string()));
        Ok(())
    }

    async fn write_clipboard_text(&self, text: &str) -> Result<(), PlatformError> {
        if self.system_access {
            clipboard::write_text(text)?;
        }
        debug!(len = text.len(), "clipboard written");
        self.record(|activity| activity.clipboard = Some(text.to_string()));
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener() -> std::process::Command {
    std::process::Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener() -> std::process::Command {
    let mut command = std::process::Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener() -> std::process::Command {
    std::process::Command::new("xdg-open")
}

fn launch(url: &str) -> Result<(), PlatformError> {
    let status = opener()
        .arg(url)
        .status()
        .map_err(|e| PlatformError::NavigationError(format!("failed to launch browser: {e}")))?;
    if !status.success() {
        return Err(PlatformError::NavigationError(format!(
            "browser launcher exited with {status}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> BrowserFixture {
        BrowserFixture::from_json(
            r#"{
                "tabs": [
                    {"id": 1, "title": "Rust", "url": "https://www.rust-lang.org/"},
                    {"id": 2, "title": "Docs", "url": "https://docs.rs/", "favIconUrl": "https://docs.rs/favicon.ico"}
                ],
                "bookmarks": [
                    {"id": "10", "title": "Crates", "url": "https://crates.io/"},
                    {"id": "11", "title": "Reading list"},
                    {"id": "12", "title": "Tokio", "url": "https://tokio.rs/"},
                    {"id": "13", "title": "Serde", "url": "https://serde.rs/"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn fixture_parses_camel_case_tabs() {
        let fixture = fixture();
        assert_eq!(fixture.tabs.len(), 2);
        assert_eq!(
            fixture.tabs[1].fav_icon_url.as_deref(),
            Some("https://docs.rs/favicon.ico")
        );
        assert!(fixture.bookmarks[1].is_folder());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let fixture = BrowserFixture::from_json("{}").unwrap();
        assert!(fixture.tabs.is_empty());
        assert!(fixture.bookmarks.is_empty());
    }

    #[test]
    fn invalid_fixture_is_an_error() {
        assert!(BrowserFixture::from_json("[").is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browser.json");
        std::fs::write(&path, r#"{"tabs": [{"id": 5}]}"#).unwrap();
        let fixture = BrowserFixture::load(&path).unwrap();
        assert_eq!(fixture.tabs[0].id, TabId(5));
    }

    #[tokio::test]
    async fn recent_bookmarks_skip_folders_and_respect_limit() {
        let browser = DesktopBrowser::new(fixture());
        let recent = browser.list_recent_bookmarks(2).await.unwrap();
        let ids: Vec<_> = recent.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "12"]);
    }

    #[tokio::test]
    async fn search_matches_title_and_url_case_insensitively() {
        let browser = DesktopBrowser::new(fixture());
        let by_title = browser.search_bookmarks("TOKIO").await.unwrap();
        assert_eq!(by_title.len(), 1);
        let by_url = browser.search_bookmarks("serde.rs").await.unwrap();
        assert_eq!(by_url[0].id, "13");
        let folders = browser.search_bookmarks("reading").await.unwrap();
        assert!(folders[0].is_folder());
    }

    #[tokio::test]
    async fn activate_unknown_tab_fails() {
        let browser = DesktopBrowser::new(fixture());
        assert!(browser.activate_tab(TabId(99)).await.is_err());
        browser.activate_tab(TabId(2)).await.unwrap();
        assert_eq!(browser.activity().active_tab, Some(TabId(2)));
    }

    #[tokio::test]
    async fn poisoned_activity_lock_still_records() {
        let browser = DesktopBrowser::new(fixture());
        let joined = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = browser.activity.lock().unwrap();
                    panic!("writer died holding the lock");
                })
                .join()
        });
        assert!(joined.is_err());
        assert!(browser.activity.is_poisoned());

        browser.open_url("https://example.com/").await.unwrap();
        browser.write_clipboard_text("hello").await.unwrap();

        let activity = browser.activity();
        assert_eq!(activity.opened, vec!["https://example.com/".to_string()]);
        assert_eq!(activity.clipboard.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn side_effects_are_recorded_without_system_access() {
        let browser = DesktopBrowser::new(fixture());
        browser.open_url("https://example.com/").await.unwrap();
        browser.write_clipboard_text("hello").await.unwrap();

        let activity = browser.activity();
        assert_eq!(activity.opened, vec!["https://example.com/".to_string()]);
        assert_eq!(activity.clipboard.as_deref(), Some("hello"));
    }
}
