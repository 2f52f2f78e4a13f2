//! The palette's side of the page registration bridge.

use std::sync::Arc;

use cmdpal_common::{BridgeError, InputBoxOptions, TabId, TriggerError};
use cmdpal_config::BridgeConfig;
use cmdpal_palette::{Command, TriggerOutcome};
use cmdpal_platform::PromptProvider;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::context::PageContexts;
use crate::message::{InboundMessage, OutboundMessage, PageCommandSpec, PageEvent};
use crate::validation::{inbound_registration, sanitize_registration};

/// Commands accepted from a page, ready for
/// [`PaletteSession::replace_group`](cmdpal_palette::PaletteSession::replace_group).
#[derive(Debug)]
pub struct Registration {
    pub group: String,
    pub commands: Vec<Command>,
}

pub struct PageBridge {
    host: Option<TabId>,
    contexts: PageContexts,
    outbound: UnboundedSender<OutboundMessage>,
    prompt: Arc<dyn PromptProvider>,
    max_commands: usize,
}

impl PageBridge {
    pub fn new(
        config: &BridgeConfig,
        outbound: UnboundedSender<OutboundMessage>,
        prompt: Arc<dyn PromptProvider>,
    ) -> Self {
        Self {
            host: None,
            contexts: PageContexts::new(),
            outbound,
            prompt,
            max_commands: config.max_commands_per_group as usize,
        }
    }

    /// The tab the palette is currently open over.
    pub fn host(&self) -> Option<TabId> {
        self.host
    }

    pub fn contexts(&self) -> &PageContexts {
        &self.contexts
    }

    /// Start accepting registrations from `host` and tell its page the
    /// palette opened.
    pub fn attach(&mut self, host: TabId) -> Result<(), BridgeError> {
        if self.contexts.ensure_listener(host) {
            debug!(tab_id = %host, "page listener installed");
        }
        self.host = Some(host);
        info!(tab_id = %host, "page bridge attached");
        send(&self.outbound, OutboundMessage::new(host, PageEvent::open()))
    }

    /// Stop accepting registrations. Called when the palette closes.
    pub fn detach(&mut self) {
        if let Some(host) = self.host.take() {
            info!(tab_id = %host, "page bridge detached");
        }
    }

    /// The page in `tab` navigated away; its listener is gone.
    pub fn page_unloaded(&mut self, tab: TabId) {
        self.contexts.forget(tab);
    }

    /// Parse and [`accept`](Self::accept) a raw JSON message.
    pub fn accept_json(&self, raw: &str) -> Option<Registration> {
        match InboundMessage::from_json(raw) {
            Ok(message) => self.accept(message),
            Err(e) => {
                warn!(body_len = raw.len(), error = %e, "page message rejected");
                None
            }
        }
    }

    /// Turn an inbound message into a registration.
    ///
    /// Messages are dropped while detached and when the sender is not the
    /// host tab. Anything but a valid `register` is rejected.
    pub fn accept(&self, message: InboundMessage) -> Option<Registration> {
        let Some(host) = self.host else {
            debug!("page message dropped, palette not open");
            return None;
        };
        if message.sender != Some(host) {
            debug!(
                tab_id = %host,
                sender = ?message.sender,
                "page message dropped, sender is not the host tab"
            );
            return None;
        }

        let payload = match inbound_registration(message.event)
            .and_then(|payload| sanitize_registration(payload, self.max_commands))
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!(tab_id = %host, error = %e, "page message rejected");
                return None;
            }
        };

        let commands: Vec<Command> = payload
            .commands
            .into_iter()
            .map(|spec| self.page_command(host, spec))
            .collect();
        info!(
            tab_id = %host,
            group = %payload.group,
            count = commands.len(),
            "page commands registered"
        );
        Some(Registration {
            group: payload.group,
            commands,
        })
    }

    /// A command whose trigger asks the page to run `spec`.
    ///
    /// With an input box the user is prompted first; cancelling keeps the
    /// palette open and sends nothing.
    fn page_command(&self, target: TabId, spec: PageCommandSpec) -> Command {
        let outbound = self.outbound.clone();
        let prompt = Arc::clone(&self.prompt);
        let id = spec.id.clone();
        let input_box = spec.input_box.clone();

        let mut command = Command::new(spec.id, spec.title, move || {
            let outbound = outbound.clone();
            let prompt = Arc::clone(&prompt);
            let id = id.clone();
            let input_box = input_box.clone();
            execute_on_page(outbound, prompt, target, id, input_box)
        });
        if let Some(description) = spec.description {
            command = command.with_description(description);
        }
        if let Some(detail) = spec.detail {
            command = command.with_detail(detail);
        }
        command
    }
}

async fn execute_on_page(
    outbound: UnboundedSender<OutboundMessage>,
    prompt: Arc<dyn PromptProvider>,
    target: TabId,
    command: String,
    input_box: Option<InputBoxOptions>,
) -> Result<TriggerOutcome, TriggerError> {
    let text_input = match input_box {
        Some(options) => match prompt.show_input_box(options).await? {
            Some(text) => Some(text),
            None => {
                debug!(command = %command, "input cancelled");
                return Ok(TriggerOutcome::keep_open());
            }
        },
        None => None,
    };
    send(
        &outbound,
        OutboundMessage::new(target, PageEvent::execute(command, text_input)),
    )?;
    Ok(TriggerOutcome::Close)
}

fn send(
    outbound: &UnboundedSender<OutboundMessage>,
    message: OutboundMessage,
) -> Result<(), BridgeError> {
    let target = message.target;
    outbound
        .send(message)
        .map_err(|_| BridgeError::ChannelClosed(target.0))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cmdpal_common::PlatformError;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;

    /// Answers every prompt with the queued reply.
    struct ScriptedPrompt {
        reply: Option<String>,
        asked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PromptProvider for ScriptedPrompt {
        async fn show_input_box(
            &self,
            options: InputBoxOptions,
        ) -> Result<Option<String>, PlatformError> {
            self.asked.lock().unwrap().push(options.description);
            Ok(self.reply.clone())
        }
    }

    fn bridge(reply: Option<&str>) -> (PageBridge, UnboundedReceiver<OutboundMessage>, Arc<ScriptedPrompt>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let prompt = Arc::new(ScriptedPrompt {
            reply: reply.map(str::to_string),
            asked: Mutex::new(Vec::new()),
        });
        let bridge = PageBridge::new(&BridgeConfig::default(), tx, prompt.clone());
        (bridge, rx, prompt)
    }

    fn register(sender: u32, specs: Vec<PageCommandSpec>) -> InboundMessage {
        InboundMessage::new(Some(TabId(sender)), PageEvent::register("example", specs))
    }

    #[test]
    fn attach_sends_open_to_host() {
        let (mut bridge, mut rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();

        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.target, TabId(3));
        assert_eq!(msg.event, PageEvent::open());
        assert!(bridge.contexts().has_listener(TabId(3)));
    }

    #[test]
    fn reattach_reuses_listener() {
        let (mut bridge, _rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        bridge.detach();
        bridge.attach(TabId(3)).unwrap();
        assert_eq!(bridge.contexts().open_count(TabId(3)), 2);
    }

    #[test]
    fn unloaded_page_gets_a_fresh_listener() {
        let (mut bridge, _rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        bridge.page_unloaded(TabId(3));
        assert!(!bridge.contexts().has_listener(TabId(3)));

        bridge.attach(TabId(3)).unwrap();
        assert_eq!(bridge.contexts().open_count(TabId(3)), 1);
    }

    #[test]
    fn attach_fails_when_channel_closed() {
        let (mut bridge, rx, _) = bridge(None);
        drop(rx);
        let err = bridge.attach(TabId(3)).unwrap_err();
        assert!(matches!(err, BridgeError::ChannelClosed(3)));
    }

    #[test]
    fn registration_from_host_is_accepted() {
        let (mut bridge, _rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();

        let mut spec = PageCommandSpec::new("example.copy-links", "Copy All Links");
        spec.detail = Some("Copy all tag a links to clipboard".into());
        let registration = bridge.accept(register(3, vec![spec])).unwrap();

        assert_eq!(registration.group, "example");
        assert_eq!(registration.commands[0].id, "example.copy-links");
        assert_eq!(
            registration.commands[0].detail.as_deref(),
            Some("Copy all tag a links to clipboard")
        );
    }

    #[test]
    fn registration_from_other_tab_is_dropped() {
        let (mut bridge, _rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        assert!(bridge.accept(register(4, vec![PageCommandSpec::new("a", "A")])).is_none());

        let anonymous = InboundMessage::new(None, PageEvent::register("example", vec![]));
        assert!(bridge.accept(anonymous).is_none());
    }

    #[test]
    fn registration_while_detached_is_dropped() {
        let (mut bridge, _rx, _) = bridge(None);
        assert!(bridge.accept(register(3, vec![])).is_none());

        bridge.attach(TabId(3)).unwrap();
        bridge.detach();
        assert!(bridge.accept(register(3, vec![])).is_none());
    }

    #[test]
    fn malformed_json_is_dropped() {
        let (mut bridge, _rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        assert!(bridge.accept_json("{\"sender\": 3").is_none());
    }

    #[test]
    fn accept_json_parses_registration() {
        let (mut bridge, _rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        let raw = r#"{"sender":3,"event":{"register":{"group":"g","commands":[{"id":"x","title":"X"}]}}}"#;
        let registration = bridge.accept_json(raw).unwrap();
        assert_eq!(registration.commands.len(), 1);
    }

    #[tokio::test]
    async fn trigger_sends_execute_to_page() {
        let (mut bridge, mut rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        rx.try_recv().unwrap();

        let registration = bridge
            .accept(register(3, vec![PageCommandSpec::new("example.copy-links", "Copy")]))
            .unwrap();
        let outcome = registration.commands[0].trigger().await.unwrap();

        assert_eq!(outcome, TriggerOutcome::Close);
        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.target, TabId(3));
        assert_eq!(msg.event, PageEvent::execute("example.copy-links", None));
    }

    #[tokio::test]
    async fn input_box_text_is_forwarded() {
        let (mut bridge, mut rx, prompt) = bridge(Some("lofi"));
        bridge.attach(TabId(3)).unwrap();
        rx.try_recv().unwrap();

        let spec = PageCommandSpec::new("example.search-youtube", "Search").with_input_box("Keyword");
        let registration = bridge.accept(register(3, vec![spec])).unwrap();
        registration.commands[0].trigger().await.unwrap();

        assert_eq!(prompt.asked.lock().unwrap().as_slice(), ["Keyword".to_string()]);
        let msg = rx.try_recv().unwrap();
        assert_eq!(
            msg.event,
            PageEvent::execute("example.search-youtube", Some("lofi".into()))
        );
    }

    #[tokio::test]
    async fn cancelled_input_box_sends_nothing() {
        let (mut bridge, mut rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        rx.try_recv().unwrap();

        let spec = PageCommandSpec::new("example.search-youtube", "Search").with_input_box("Keyword");
        let registration = bridge.accept(register(3, vec![spec])).unwrap();
        let outcome = registration.commands[0].trigger().await.unwrap();

        assert_eq!(outcome, TriggerOutcome::keep_open());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn trigger_fails_once_page_channel_closed() {
        let (mut bridge, rx, _) = bridge(None);
        bridge.attach(TabId(3)).unwrap();
        let registration = bridge
            .accept(register(3, vec![PageCommandSpec::new("a", "A")]))
            .unwrap();
        drop(rx);

        let err = registration.commands[0].trigger().await.unwrap_err();
        assert!(matches!(err, TriggerError::Bridge(BridgeError::ChannelClosed(3))));
    }
}
