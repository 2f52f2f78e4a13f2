//! Candidate lists built from browser state.

use std::sync::Arc;

use cmdpal_common::{Bookmark, Tab, TabId, TriggerError};
use cmdpal_palette::{Command, TriggerOutcome, TABS_GROUP};
use cmdpal_platform::BrowserProvider;

pub const BOOKMARKS_GROUP: &str = "bookmarks";

/// One command per tab; triggering it switches to the tab.
pub fn tab_commands(tabs: &[Tab], browser: &Arc<dyn BrowserProvider>) -> Vec<Command> {
    tabs.iter()
        .map(|tab| {
            let browser = Arc::clone(browser);
            let id = tab.id;
            let title = tab
                .title
                .clone()
                .or_else(|| tab.url.clone())
                .unwrap_or_default();
            let mut command = Command::new(id.to_string(), title, move || {
                activate(Arc::clone(&browser), id)
            })
            .in_group(TABS_GROUP);
            if let Some(url) = &tab.url {
                command = command.with_detail(url.clone());
            }
            if let Some(icon) = &tab.fav_icon_url {
                command = command.with_icon_url(icon.clone());
            }
            command
        })
        .collect()
}

/// One command per bookmark with a URL; folders are skipped. Triggering
/// opens the bookmark in a new tab.
pub fn bookmark_commands(bookmarks: &[Bookmark], browser: &Arc<dyn BrowserProvider>) -> Vec<Command> {
    bookmarks
        .iter()
        .filter_map(|bookmark| {
            let url = bookmark.url.clone()?;
            let browser = Arc::clone(browser);
            let target = url.clone();
            Some(
                Command::new(
                    format!("bookmark-{}", bookmark.id),
                    bookmark.title.clone(),
                    move || open(Arc::clone(&browser), target.clone()),
                )
                .with_detail(url)
                .in_group(BOOKMARKS_GROUP),
            )
        })
        .collect()
}

async fn activate(browser: Arc<dyn BrowserProvider>, tab: TabId) -> Result<TriggerOutcome, TriggerError> {
    browser.activate_tab(tab).await?;
    Ok(TriggerOutcome::Close)
}

async fn open(browser: Arc<dyn BrowserProvider>, url: String) -> Result<TriggerOutcome, TriggerError> {
    browser.open_url(&url).await?;
    Ok(TriggerOutcome::Close)
}
