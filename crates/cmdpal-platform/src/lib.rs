//! Host-side collaborators of the palette: browser state (tabs and
//! bookmarks), navigation, the clipboard and the text prompt.

pub mod clipboard;
pub mod desktop;
pub mod paths;
pub mod provider;

pub use clipboard::Clipboard;
pub use desktop::{Activity, BrowserFixture, DesktopBrowser};
pub use paths::{config_dir, data_dir, ensure_dirs, fixture_file};
pub use provider::{BrowserProvider, PromptProvider};
