//! Message shapes exchanged with pages.
//!
//! A [`PageEvent`] mirrors the `detail` of the page-side `cmdpal` DOM event:
//! an object with any of `open`, `register` or `execute` set.

use cmdpal_common::{new_correlation_id, BridgeError, InputBoxOptions, TabId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPayload {}

/// A page command as declared by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCommandSpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// When set, the user is prompted before the command executes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_box: Option<InputBoxOptions>,
}

impl PageCommandSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            detail: None,
            input_box: None,
        }
    }

    pub fn with_input_box(mut self, description: impl Into<String>) -> Self {
        self.input_box = Some(InputBoxOptions::new(description));
        self
    }
}

/// Add or replace the commands of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub group: String,
    #[serde(default)]
    pub commands: Vec<PageCommandSpec>,
}

/// Ask the page to run one of its commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePayload {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_input: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<OpenPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<RegisterPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute: Option<ExecutePayload>,
}

impl PageEvent {
    pub fn open() -> Self {
        Self {
            open: Some(OpenPayload {}),
            ..Self::default()
        }
    }

    pub fn register(group: impl Into<String>, commands: Vec<PageCommandSpec>) -> Self {
        Self {
            register: Some(RegisterPayload {
                group: group.into(),
                commands,
            }),
            ..Self::default()
        }
    }

    pub fn execute(command: impl Into<String>, text_input: Option<String>) -> Self {
        Self {
            execute: Some(ExecutePayload {
                command: command.into(),
                text_input,
            }),
            ..Self::default()
        }
    }

    /// Names of the fields that are set, in declaration order.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        if self.open.is_some() {
            kinds.push("open");
        }
        if self.register.is_some() {
            kinds.push("register");
        }
        if self.execute.is_some() {
            kinds.push("execute");
        }
        kinds
    }
}

/// A message a page sent towards the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Tab the message came from; `None` for non-tab senders such as
    /// extension pages.
    #[serde(default)]
    pub sender: Option<TabId>,
    pub event: PageEvent,
}

impl InboundMessage {
    pub fn new(sender: Option<TabId>, event: PageEvent) -> Self {
        Self { sender, event }
    }

    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::Parse(e.to_string()))
    }
}

/// A message the palette sends to the page in `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub target: TabId,
    pub correlation_id: String,
    pub event: PageEvent,
}

impl OutboundMessage {
    pub fn new(target: TabId, event: PageEvent) -> Self {
        Self {
            target,
            correlation_id: new_correlation_id(),
            event,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_serializes_as_empty_object() {
        let json = serde_json::to_value(PageEvent::open()).unwrap();
        assert_eq!(json, serde_json::json!({ "open": {} }));
    }

    #[test]
    fn execute_uses_camel_case_and_skips_missing_input() {
        let with_input = PageEvent::execute("example.search", Some("rust".into()));
        assert_eq!(
            serde_json::to_value(with_input).unwrap(),
            serde_json::json!({ "execute": { "command": "example.search", "textInput": "rust" } })
        );

        let without = PageEvent::execute("example.copy", None);
        assert_eq!(
            serde_json::to_value(without).unwrap(),
            serde_json::json!({ "execute": { "command": "example.copy" } })
        );
    }

    #[test]
    fn register_parses_page_payload() {
        let raw = r#"{
            "sender": 4,
            "event": {
                "register": {
                    "group": "example",
                    "commands": [
                        {"id": "example.copy-links", "title": "Copy All Links"},
                        {"id": "example.search", "title": "Search", "inputBox": {"description": "Keyword"}}
                    ]
                }
            }
        }"#;
        let msg = InboundMessage::from_json(raw).unwrap();
        assert_eq!(msg.sender, Some(TabId(4)));
        let register = msg.event.register.unwrap();
        assert_eq!(register.group, "example");
        assert_eq!(
            register.commands[1].input_box,
            Some(InputBoxOptions::new("Keyword"))
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = InboundMessage::from_json("{not json").unwrap_err();
        assert!(matches!(err, BridgeError::Parse(_)));
    }

    #[test]
    fn kinds_lists_set_fields() {
        let mut event = PageEvent::open();
        event.execute = Some(ExecutePayload {
            command: "x".into(),
            text_input: None,
        });
        assert_eq!(event.kinds(), vec!["open", "execute"]);
        assert!(PageEvent::default().kinds().is_empty());
    }

    #[test]
    fn outbound_carries_short_correlation_id() {
        let msg = OutboundMessage::new(TabId(1), PageEvent::open());
        assert_eq!(msg.correlation_id.len(), 8);
        assert!(msg.to_json().contains("\"correlationId\""));
    }
}
