//! The event loop: one session, its collaborators and a script of user
//! events.
//!
//! Every state change happens on this loop. Trigger actions, prompts and
//! bookmark searches are futures polled by the same `select!`, so the
//! session is never touched from two places at once. Script lines are read
//! one at a time, each once the effects of the previous one have settled.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use cmdpal_bridge::{
    bookmark_commands, builtin_commands, tab_commands, OutboundMessage, PageBridge,
};
use cmdpal_common::{Bookmark, CmdpalError, Notification, PlatformError, Tab, TabId, TriggerError};
use cmdpal_config::CmdpalConfig;
use cmdpal_palette::{
    Command, CommitOutcome, PaletteSession, SessionRequest, TriggerFuture, TriggerOutcome,
    BUILTIN_GROUP,
};
use cmdpal_platform::BrowserProvider;
use futures_util::future::{BoxFuture, FutureExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::prompt::{ChannelPrompt, PromptRequest};
use crate::render::render_text;
use crate::script::ScriptCommand;

type SearchFuture = BoxFuture<'static, (String, Result<Vec<Bookmark>, PlatformError>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct PaletteApp<W: Write> {
    session: PaletteSession,
    bridge: PageBridge,
    browser: Arc<dyn BrowserProvider>,
    outbound: mpsc::UnboundedReceiver<OutboundMessage>,
    prompts: mpsc::Receiver<PromptRequest>,
    prompting: Option<PromptRequest>,
    trigger: Option<TriggerFuture>,
    search: Option<SearchFuture>,
    format: OutputFormat,
    out: W,
}

impl<W: Write> PaletteApp<W> {
    /// Open a palette over `host_tab` (or the first tab) and load its
    /// candidates.
    pub async fn open(
        config: &CmdpalConfig,
        browser: Arc<dyn BrowserProvider>,
        host_tab: Option<TabId>,
        format: OutputFormat,
        out: W,
    ) -> Result<Self, CmdpalError> {
        let (prompt, prompts) = ChannelPrompt::channel(1);
        let prompt = Arc::new(prompt);
        let (outbound_tx, outbound) = mpsc::unbounded_channel();
        let mut bridge = PageBridge::new(&config.bridge, outbound_tx, prompt.clone());
        let mut session = PaletteSession::new(&config.palette);

        let tabs = browser.list_tabs().await?;
        let host = match host_tab {
            Some(id) => Some(
                tabs.iter()
                    .find(|tab| tab.id == id)
                    .cloned()
                    .ok_or_else(|| PlatformError::NavigationError(format!("no such tab: {id}")))?,
            ),
            None => tabs.first().cloned(),
        };
        session.set_tabs(tab_commands(&tabs, &browser));

        let recent = browser
            .list_recent_bookmarks(config.palette.recent_bookmarks as usize)
            .await?;
        session.set_recent_bookmarks(bookmark_commands(&recent, &browser));

        let builtin_host = host.clone().unwrap_or_else(|| Tab::new(0));
        session.replace_group(
            BUILTIN_GROUP,
            builtin_commands(&builtin_host, browser.clone(), prompt),
        );

        if let Some(host) = &host {
            bridge.attach(host.id)?;
        }
        info!(
            session = %session.id(),
            host = ?host.as_ref().map(|tab| tab.id),
            tabs = tabs.len(),
            recent_bookmarks = recent.len(),
            "palette opened"
        );

        Ok(Self {
            session,
            bridge,
            browser,
            outbound,
            prompts,
            prompting: None,
            trigger: None,
            search: None,
            format,
            out,
        })
    }

    pub fn session(&self) -> &PaletteSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Replay `script` until it ends and every effect has settled, or the
    /// palette closes.
    pub async fn run<R>(&mut self, script: R) -> Result<(), CmdpalError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = script.lines();
        let mut script_done = false;
        self.render()?;

        while self.session.is_open() {
            if script_done {
                if let Some(request) = self.prompting.take() {
                    debug!("script ended with a prompt open, cancelling it");
                    request.cancel();
                }
                if self.is_idle() {
                    break;
                }
            }

            let ready = !script_done && self.ready_for_input();
            let deadline = self
                .session
                .next_deadline()
                .map(tokio::time::Instant::from_std);

            tokio::select! {
                biased;

                result = settle(&mut self.trigger) => {
                    self.trigger = None;
                    self.on_trigger_settled(result)?;
                }
                Some(request) = self.prompts.recv() => {
                    self.on_prompt(request)?;
                }
                Some(message) = self.outbound.recv() => {
                    self.on_outbound(&message)?;
                }
                (term, result) = finish_search(&mut self.search) => {
                    self.search = None;
                    self.on_search_results(&term, result)?;
                }
                _ = sleep_until(deadline) => {
                    if self.session.poll_pending(Instant::now()) {
                        self.render()?;
                    }
                }
                line = lines.next_line(), if ready => match line? {
                    Some(line) => self.on_script_line(&line)?,
                    None => script_done = true,
                },
                else => break,
            }
        }

        self.bridge.detach();
        while let Ok(message) = self.outbound.try_recv() {
            self.on_outbound(&message)?;
        }
        Ok(())
    }

    fn is_idle(&self) -> bool {
        self.trigger.is_none()
            && self.search.is_none()
            && self.prompting.is_none()
            && self.session.next_deadline().is_none()
    }

    /// A script line may run once earlier effects settled. A trigger that is
    /// waiting on a prompt counts as settled so the prompt can be answered.
    fn ready_for_input(&self) -> bool {
        (self.trigger.is_none() || self.prompting.is_some())
            && self.search.is_none()
            && self.session.next_deadline().is_none()
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    fn on_script_line(&mut self, line: &str) -> Result<(), CmdpalError> {
        let command = match ScriptCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!(line, error = %e, "script line skipped");
                writeln!(self.out, "error: {e}")?;
                return Ok(());
            }
        };
        debug!(?command, "script event");

        match command {
            ScriptCommand::Type(text) => {
                if let Some(request) = self.session.set_input_text(text, Instant::now()) {
                    self.start(request);
                }
                self.render()?;
            }
            ScriptCommand::Up => {
                self.session.move_up();
                self.render()?;
            }
            ScriptCommand::Down => {
                self.session.move_down();
                self.render()?;
            }
            ScriptCommand::Select(index) => {
                self.session.select(index);
                self.render()?;
            }
            ScriptCommand::Enter => {
                let command = self.session.begin_commit();
                self.start_trigger(command)?;
            }
            ScriptCommand::Pick(index) => {
                let command = self.session.begin_commit_at(index);
                self.start_trigger(command)?;
            }
            ScriptCommand::Answer(text) => match self.prompting.take() {
                Some(request) => request.answer(text),
                None => writeln!(self.out, "error: no prompt is open")?,
            },
            ScriptCommand::Cancel => match self.prompting.take() {
                Some(request) => request.cancel(),
                None => writeln!(self.out, "error: no prompt is open")?,
            },
            ScriptCommand::Register(raw) => {
                if let Some(registration) = self.bridge.accept_json(&raw) {
                    self.session
                        .replace_group(&registration.group, registration.commands);
                    self.render()?;
                }
            }
            ScriptCommand::Escape => {
                self.session.close();
                writeln!(self.out, "closed")?;
            }
        }
        Ok(())
    }

    fn start_trigger(&mut self, command: Option<Command>) -> Result<(), CmdpalError> {
        match command {
            Some(command) => {
                writeln!(self.out, "run {}", command.id)?;
                self.trigger = Some(command.trigger());
            }
            None => writeln!(self.out, "nothing to run")?,
        }
        Ok(())
    }

    fn start(&mut self, request: SessionRequest) {
        match request {
            SessionRequest::SearchBookmarks(term) => {
                let browser = Arc::clone(&self.browser);
                // Replacing the future drops a search still in flight, so
                // results never arrive out of order.
                self.search = Some(
                    async move {
                        let result = browser.search_bookmarks(&term).await;
                        (term, result)
                    }
                    .boxed(),
                );
            }
        }
    }

    fn on_trigger_settled(
        &mut self,
        result: Result<TriggerOutcome, TriggerError>,
    ) -> Result<(), CmdpalError> {
        match self.session.finish_commit(result, Instant::now()) {
            CommitOutcome::Close => {
                self.bridge.detach();
                writeln!(self.out, "closed")?;
            }
            CommitOutcome::KeepOpen { request } => {
                if let Some(request) = request {
                    self.start(request);
                }
                self.render()?;
            }
            CommitOutcome::Failed => {}
        }
        self.flush_notifications()
    }

    fn on_prompt(&mut self, request: PromptRequest) -> Result<(), CmdpalError> {
        writeln!(self.out, "? {}", request.options.description)?;
        if let Some(stale) = self.prompting.replace(request) {
            stale.cancel();
        }
        Ok(())
    }

    fn on_outbound(&mut self, message: &OutboundMessage) -> Result<(), CmdpalError> {
        match self.format {
            OutputFormat::Text => {
                let event = serde_json::to_string(&message.event)
                    .map_err(|e| CmdpalError::Other(e.to_string()))?;
                writeln!(self.out, "page {} <- {event}", message.target)?;
            }
            OutputFormat::Json => writeln!(self.out, "{}", message.to_json())?,
        }
        Ok(())
    }

    fn on_search_results(
        &mut self,
        term: &str,
        result: Result<Vec<Bookmark>, PlatformError>,
    ) -> Result<(), CmdpalError> {
        match result {
            Ok(bookmarks) => {
                debug!(term, count = bookmarks.len(), "bookmark search finished");
                self.session
                    .set_bookmark_search_results(bookmark_commands(&bookmarks, &self.browser));
                self.render()
            }
            Err(e) => {
                warn!(term, error = %e, "bookmark search failed");
                self.session
                    .notifications()
                    .push(Notification::warning("Bookmark search failed", e.to_string()));
                self.flush_notifications()
            }
        }
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    fn render(&mut self) -> Result<(), CmdpalError> {
        let view = self.session.view();
        match self.format {
            OutputFormat::Text => write!(self.out, "{}", render_text(&view))?,
            OutputFormat::Json => {
                let json = serde_json::to_string(&view)
                    .map_err(|e| CmdpalError::Other(e.to_string()))?;
                writeln!(self.out, "{json}")?;
            }
        }
        Ok(())
    }

    fn flush_notifications(&mut self) -> Result<(), CmdpalError> {
        for notification in self.session.notifications().drain() {
            writeln!(self.out, "! {}: {}", notification.title, notification.body)?;
        }
        Ok(())
    }
}

async fn settle(trigger: &mut Option<TriggerFuture>) -> Result<TriggerOutcome, TriggerError> {
    match trigger {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

async fn finish_search(
    search: &mut Option<SearchFuture>,
) -> (String, Result<Vec<Bookmark>, PlatformError>) {
    match search {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
