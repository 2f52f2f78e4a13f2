use std::fmt;
use std::future::Future;
use std::sync::Arc;

use cmdpal_common::TriggerError;
use futures_util::future::{BoxFuture, FutureExt};

/// Group of the commands derived from the host tab.
pub const BUILTIN_GROUP: &str = "builtin";
/// Group of the open-tab candidates.
pub const TABS_GROUP: &str = "tabs";

/// What the palette should do once a trigger action settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Normal completion: the palette closes.
    Close,
    /// Keep the palette open, optionally replacing the input text.
    KeepOpen { input_text: Option<String> },
}

impl TriggerOutcome {
    pub fn keep_open() -> Self {
        Self::KeepOpen { input_text: None }
    }

    pub fn rewrite_input(text: impl Into<String>) -> Self {
        Self::KeepOpen {
            input_text: Some(text.into()),
        }
    }
}

pub type TriggerFuture = BoxFuture<'static, Result<TriggerOutcome, TriggerError>>;

type TriggerFn = dyn Fn() -> TriggerFuture + Send + Sync;

/// A palette entry and the action it runs.
///
/// Cloning is cheap: the trigger is shared.
#[derive(Clone)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub icon_url: Option<String>,
    pub group: Option<String>,
    trigger: Arc<TriggerFn>,
}

impl Command {
    pub fn new<F, Fut>(id: impl Into<String>, title: impl Into<String>, trigger: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<TriggerOutcome, TriggerError>> + Send + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            detail: None,
            icon_url: None,
            group: None,
            trigger: Arc::new(move || trigger().boxed()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Start the trigger action.
    pub fn trigger(&self) -> TriggerFuture {
        (self.trigger)()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_runs_action() {
        let command = Command::new("help.cmd", ">", || async {
            Ok(TriggerOutcome::rewrite_input(">"))
        });
        let outcome = command.trigger().await.unwrap();
        assert_eq!(
            outcome,
            TriggerOutcome::KeepOpen {
                input_text: Some(">".into())
            }
        );
    }

    #[tokio::test]
    async fn clones_share_the_trigger() {
        let command = Command::new("a", "Alpha", || async {
            Err(TriggerError::Other("no focus".into()))
        });
        let copy = command.clone();
        let err = copy.trigger().await.unwrap_err();
        assert_eq!(err.to_string(), "no focus");
    }

    #[test]
    fn builders_fill_optional_fields() {
        let command = Command::new("tab-1", "Docs", || async { Ok(TriggerOutcome::Close) })
            .with_detail("https://docs.rs")
            .with_icon_url("https://docs.rs/favicon.ico")
            .in_group(TABS_GROUP);
        assert_eq!(command.detail.as_deref(), Some("https://docs.rs"));
        assert_eq!(command.group.as_deref(), Some("tabs"));
        assert!(command.description.is_none());
    }

    #[test]
    fn debug_omits_trigger() {
        let command = Command::new("x", "X", || async { Ok(TriggerOutcome::Close) });
        let debug = format!("{command:?}");
        assert!(debug.contains("\"x\""));
        assert!(debug.contains(".."));
    }
}
