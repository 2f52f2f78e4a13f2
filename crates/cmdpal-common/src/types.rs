use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser tab identifier as reported by the tab provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// An open browser tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
}

impl Tab {
    pub fn new(id: u32) -> Self {
        Self {
            id: TabId(id),
            title: None,
            url: None,
            fav_icon_url: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A bookmark tree node. Folders carry no URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Bookmark {
    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }
}

/// Options for the external text prompt a command may require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBoxOptions {
    pub description: String,
}

impl InputBoxOptions {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_id_display() {
        assert_eq!(TabId(42).to_string(), "tab-42");
    }

    #[test]
    fn tab_id_is_transparent_in_json() {
        assert_eq!(serde_json::to_string(&TabId(7)).unwrap(), "7");
    }

    #[test]
    fn tab_deserializes_browser_shape() {
        let json = r#"{"id":3,"title":"Docs","url":"https://docs.rs","favIconUrl":"https://docs.rs/favicon.ico"}"#;
        let tab: Tab = serde_json::from_str(json).unwrap();
        assert_eq!(tab.id, TabId(3));
        assert_eq!(tab.title.as_deref(), Some("Docs"));
        assert_eq!(tab.fav_icon_url.as_deref(), Some("https://docs.rs/favicon.ico"));
    }

    #[test]
    fn tab_missing_optional_fields() {
        let tab: Tab = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(tab, Tab::new(1));
    }

    #[test]
    fn bookmark_folder_detection() {
        let folder: Bookmark = serde_json::from_str(r#"{"id":"1","title":"Bar"}"#).unwrap();
        assert!(folder.is_folder());

        let leaf = Bookmark {
            id: "2".into(),
            title: "Rust".into(),
            url: Some("https://rust-lang.org".into()),
        };
        assert!(!leaf.is_folder());
    }

    #[test]
    fn input_box_options_json_shape() {
        let opts = InputBoxOptions::new("Enter a keyword");
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json, serde_json::json!({ "description": "Enter a keyword" }));
    }
}
