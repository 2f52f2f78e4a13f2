//! Palette session: one popup lifetime.
//!
//! Holds the input text, the per-mode candidate caches and the last
//! ranking of each mode. Every method runs to completion; the host drives
//! it from a single event loop and performs the [`SessionRequest`]s it
//! returns.


use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use cmdpal_common::{Notification, NotificationQueue, SessionId, TriggerError};
use cmdpal_config::PaletteConfig;
use tracing::{debug, info, warn};

use crate::command::{Command, TriggerOutcome};
use crate::help::help_commands;
use crate::matcher::filter;
use crate::mode::{CandidateSource, EmptyTermPolicy, Mode, ModeTable};
use crate::reconcile::RankedResult;
use crate::registry::CommandRegistry;
use crate::view::PaletteView;

/// Work the session needs a collaborator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    /// Run a bookmark search and hand the results to
    /// [`PaletteSession::set_bookmark_search_results`].
    SearchBookmarks(String),
}

/// Result of a settled trigger action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The palette closed.
    Close,
    /// The palette stays open; rewriting the input may have produced a
    /// request.
    KeepOpen { request: Option<SessionRequest> },
    /// The action failed; a notification was queued.
    Failed,
}

#[derive(Debug)]
struct PendingSearch {
    mode: Mode,
    term: String,
    due: Instant,
}

pub struct PaletteSession {
    id: SessionId,
    modes: ModeTable,
    registry: CommandRegistry,
    tabs: Arc<[Command]>,
    recent_bookmarks: Arc<[Command]>,
    bookmark_results: Arc<[Command]>,
    help: Arc<[Command]>,
    text: String,
    mode: Mode,
    results: [RankedResult; 4],
    pending: Option<PendingSearch>,
    in_flight: Option<String>,
    open: bool,
    notifications: NotificationQueue,
}

impl PaletteSession {
    pub fn new(config: &PaletteConfig) -> Self {
        let modes = ModeTable::new(config.command_debounce());
        let text = config.default_text.clone();
        let spec = modes.dispatch(&text).clone();
        let term = spec.search_term(&text);

        let mut session = Self {
            id: SessionId::new(),
            modes,
            registry: CommandRegistry::new(),
            tabs: Arc::from(Vec::new()),
            recent_bookmarks: Arc::from(Vec::new()),
            bookmark_results: Arc::from(Vec::new()),
            help: Arc::from(help_commands()),
            text,
            mode: spec.mode,
            results: Default::default(),
            pending: None,
            in_flight: None,
            open: true,
            notifications: NotificationQueue::new(config.notification_capacity as usize),
        };
        session.apply(spec.mode, &term);
        info!(session = %session.id, mode = ?session.mode, "palette session opened");
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn input_text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn modes(&self) -> &ModeTable {
        &self.modes
    }

    /// The active mode's ranking.
    pub fn result(&self) -> &RankedResult {
        self.result_for(self.mode)
    }

    pub fn result_for(&self, mode: Mode) -> &RankedResult {
        &self.results[mode.index()]
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn view(&self) -> PaletteView {
        PaletteView::build(&self.text, self.mode, self.result())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a trigger action has been started and not yet finished.
    pub fn trigger_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Replace the input text.
    ///
    /// Switching mode re-ranks at once. An edit inside a debounced mode is
    /// scheduled for `now + debounce`, superseding any earlier pending edit;
    /// other edits re-rank at once.
    pub fn set_input_text(
        &mut self,
        text: impl Into<String>,
        now: Instant,
    ) -> Option<SessionRequest> {
        let text = text.into();
        let spec = self.modes.dispatch(&text).clone();
        let term = spec.search_term(&text);
        let switched = spec.mode != self.mode;

        self.text = text;
        self.mode = spec.mode;

        if switched || spec.debounce.is_zero() {
            self.pending = None;
            self.apply(spec.mode, &term);
        } else {
            debug!(session = %self.id, term = %term, "re-rank scheduled");
            self.pending = Some(PendingSearch {
                mode: spec.mode,
                term: term.clone(),
                due: now + spec.debounce,
            });
        }

        (spec.mode == Mode::Bookmark && !term.is_empty())
            .then(|| SessionRequest::SearchBookmarks(term))
    }

    /// When the scheduled re-rank is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Apply any scheduled re-rank now, due or not.
    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            if pending.mode == self.mode {
                debug!(session = %self.id, term = %pending.term, "re-rank flushed early");
                self.apply(pending.mode, &pending.term);
            }
        }
    }

    /// Apply the scheduled re-rank if it is due. Returns whether it ran.
    pub fn poll_pending(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some(pending) if now >= pending.due => {}
            _ => return false,
        }
        match self.pending.take() {
            Some(pending) if pending.mode == self.mode => {
                self.apply(pending.mode, &pending.term);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // CANDIDATES
    // =========================================================================

    /// Replace a registry group and re-rank command mode.
    pub fn replace_group(&mut self, group: &str, commands: Vec<Command>) {
        self.registry.replace_group(group, commands);
        self.refresh(Mode::Command);
    }

    pub fn set_tabs(&mut self, tabs: Vec<Command>) {
        self.tabs = Arc::from(tabs);
        self.refresh(Mode::Tab);
    }

    pub fn set_recent_bookmarks(&mut self, bookmarks: Vec<Command>) {
        self.recent_bookmarks = Arc::from(bookmarks);
        self.refresh(Mode::Bookmark);
    }

    pub fn set_bookmark_search_results(&mut self, bookmarks: Vec<Command>) {
        self.bookmark_results = Arc::from(bookmarks);
        self.refresh(Mode::Bookmark);
    }

    fn candidates(&self, mode: Mode, term: &str) -> Vec<Command> {
        let spec = self.modes.spec(mode);
        match spec.source {
            CandidateSource::Registry => self.registry.commands().to_vec(),
            CandidateSource::HelpMenu => self.help.to_vec(),
            CandidateSource::Tabs => self.tabs.to_vec(),
            CandidateSource::Bookmarks => {
                let mut candidates = self.recent_bookmarks.to_vec();
                if term.is_empty() && spec.empty_term == EmptyTermPolicy::RecentOnly {
                    return candidates;
                }
                let recent: HashSet<&str> = self
                    .recent_bookmarks
                    .iter()
                    .map(|command| command.id.as_str())
                    .collect();
                candidates.extend(
                    self.bookmark_results
                        .iter()
                        .filter(|command| !recent.contains(command.id.as_str()))
                        .cloned(),
                );
                candidates
            }
        }
    }

    /// Re-rank `mode` under its last applied term.
    fn refresh(&mut self, mode: Mode) {
        let term = self.result_for(mode).searched_term().to_string();
        self.apply(mode, &term);
    }

    fn apply(&mut self, mode: Mode, term: &str) {
        let candidates = self.candidates(mode, term);
        let ranked = filter(term, &candidates);
        let next = self.results[mode.index()].advance(term, ranked);
        debug!(
            session = %self.id,
            mode = ?mode,
            term,
            candidates = candidates.len(),
            matches = next.len(),
            selected = next.selected_index(),
            "re-ranked"
        );
        self.results[mode.index()] = next;
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    pub fn move_up(&mut self) {
        let index = self.mode.index();
        self.results[index] = self.results[index].select_above();
    }

    pub fn move_down(&mut self) {
        let index = self.mode.index();
        self.results[index] = self.results[index].select_below();
    }

    /// Highlight `index` (pointer hover).
    pub fn select(&mut self, index: usize) {
        let slot = self.mode.index();
        self.results[slot] = self.results[slot].select(index);
    }

    // =========================================================================
    // COMMIT
    // =========================================================================

    /// Start committing the highlighted command.
    ///
    /// A re-rank still waiting on its debounce is applied first, so the
    /// committed command always matches the current input text.
    ///
    /// Returns `None` (a no-op) when the list is empty, the session is
    /// closed, or an earlier trigger has not settled yet. Otherwise the
    /// caller runs [`Command::trigger`] and reports back through
    /// [`finish_commit`](Self::finish_commit).
    pub fn begin_commit(&mut self) -> Option<Command> {
        if !self.open {
            return None;
        }
        if let Some(id) = &self.in_flight {
            debug!(session = %self.id, pending = %id, "commit ignored, trigger still pending");
            return None;
        }
        self.flush_pending();
        let command = self.result().selected()?.clone();
        info!(session = %self.id, command = %command.id, "triggering command");
        self.in_flight = Some(command.id.clone());
        Some(command)
    }

    /// Pointer activation of the entry at `index`.
    ///
    /// With a re-rank pending, the clicked command only runs if it still
    /// matches the current input text.
    pub fn begin_commit_at(&mut self, index: usize) -> Option<Command> {
        if !self.open || self.in_flight.is_some() {
            return None;
        }
        let clicked = self.result().commands().get(index)?.id.clone();
        self.flush_pending();
        let position = self
            .result()
            .commands()
            .iter()
            .position(|command| command.id == clicked)?;
        self.select(position);
        self.begin_commit()
    }

    /// Settle the trigger started by [`begin_commit`](Self::begin_commit).
    pub fn finish_commit(
        &mut self,
        result: Result<TriggerOutcome, TriggerError>,
        now: Instant,
    ) -> CommitOutcome {
        let command = self.in_flight.take().unwrap_or_default();
        match result {
            Ok(TriggerOutcome::Close) => {
                self.close();
                CommitOutcome::Close
            }
            Ok(TriggerOutcome::KeepOpen { input_text }) => {
                debug!(session = %self.id, command = %command, "command kept palette open");
                let request = input_text.and_then(|text| self.set_input_text(text, now));
                CommitOutcome::KeepOpen { request }
            }
            Err(e) => {
                warn!(session = %self.id, command = %command, error = %e, "command failed");
                self.notifications
                    .push(Notification::error("Command failed", e.to_string()));
                CommitOutcome::Failed
            }
        }
    }

    /// Trigger the highlighted command and wait for it to settle.
    pub async fn run_selected(&mut self, now: Instant) -> Option<CommitOutcome> {
        let command = self.begin_commit()?;
        let result = command.trigger().await;
        Some(self.finish_commit(result, now))
    }

    /// End the session. Further commits are ignored.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.pending = None;
            info!(session = %self.id, "palette session closed");
        }
    }
}
