use async_trait::async_trait;
use cmdpal_common::{Bookmark, InputBoxOptions, PlatformError, Tab, TabId};

/// Access to the browser the palette is attached to.
///
/// Implementations must be shareable across tasks: trigger actions capture
/// an `Arc<dyn BrowserProvider>` and run after the palette call returns.
#[async_trait]
pub trait BrowserProvider: Send + Sync {
    /// Every open tab, in window order.
    async fn list_tabs(&self) -> Result<Vec<Tab>, PlatformError>;

    /// The `limit` most recently added bookmarks, newest first.
    async fn list_recent_bookmarks(&self, limit: usize) -> Result<Vec<Bookmark>, PlatformError>;

    /// Bookmarks (and folders) whose title or URL contains `term`.
    async fn search_bookmarks(&self, term: &str) -> Result<Vec<Bookmark>, PlatformError>;

    /// Bring `tab` to the front.
    async fn activate_tab(&self, tab: TabId) -> Result<(), PlatformError>;

    /// Open `url` in a new tab.
    async fn open_url(&self, url: &str) -> Result<(), PlatformError>;

    async fn write_clipboard_text(&self, text: &str) -> Result<(), PlatformError>;
}

/// Asks the user for a line of text.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    /// `Ok(None)` means the user cancelled.
    async fn show_input_box(
        &self,
        options: InputBoxOptions,
    ) -> Result<Option<String>, PlatformError>;
}
