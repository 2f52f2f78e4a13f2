//! Selection continuity between successive rankings.

use std::sync::Arc;

use crate::command::Command;

/// Compute the selected index for a new ranking.
///
/// A changed search term restarts selection at the top. Under a stable
/// term the previously highlighted command (by id) stays highlighted at its
/// new position; if it is gone, or `prev_selected` was out of range, the
/// selection falls back to 0.
pub fn reconcile(
    prev: &[Command],
    prev_selected: usize,
    prev_term: &str,
    next: &[Command],
    next_term: &str,
) -> usize {
    if prev_term != next_term {
        return 0;
    }
    prev.get(prev_selected)
        .and_then(|selected| next.iter().position(|command| command.id == selected.id))
        .unwrap_or(0)
}

/// One ranking of the active candidate set.
///
/// Never mutated in place: every recomputation or navigation step builds a
/// new value. `selected_index < len()` whenever the list is non-empty, and
/// is 0 when it is empty.
#[derive(Debug, Clone)]
pub struct RankedResult {
    commands: Arc<[Command]>,
    searched_term: String,
    selected_index: usize,
}

impl RankedResult {
    pub fn empty() -> Self {
        Self {
            commands: Arc::from(Vec::new()),
            searched_term: String::new(),
            selected_index: 0,
        }
    }

    /// Unsearched result showing `commands` as given.
    pub fn initial(commands: Vec<Command>) -> Self {
        Self {
            commands: Arc::from(commands),
            searched_term: String::new(),
            selected_index: 0,
        }
    }

    /// The result that follows this one when `term` produced `ranked`.
    pub fn advance(&self, term: &str, ranked: Vec<Command>) -> Self {
        let selected_index = reconcile(
            &self.commands,
            self.selected_index,
            &self.searched_term,
            &ranked,
            term,
        );
        Self {
            commands: Arc::from(ranked),
            searched_term: term.to_string(),
            selected_index,
        }
    }

    /// Move the highlight up, wrapping from the first entry to the last.
    pub fn select_above(&self) -> Self {
        let selected_index = if self.selected_index == 0 {
            self.commands.len().saturating_sub(1)
        } else {
            self.selected_index - 1
        };
        self.with_selection(selected_index)
    }

    /// Move the highlight down, wrapping from the last entry to the first.
    pub fn select_below(&self) -> Self {
        let selected_index = if self.selected_index + 1 >= self.commands.len() {
            0
        } else {
            self.selected_index + 1
        };
        self.with_selection(selected_index)
    }

    /// Highlight `index`; out-of-range values fall back to 0.
    pub fn select(&self, index: usize) -> Self {
        let index = if index < self.commands.len() { index } else { 0 };
        self.with_selection(index)
    }

    fn with_selection(&self, selected_index: usize) -> Self {
        Self {
            commands: Arc::clone(&self.commands),
            searched_term: self.searched_term.clone(),
            selected_index,
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn searched_term(&self) -> &str {
        &self.searched_term
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Command> {
        self.commands.get(self.selected_index)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for RankedResult {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::TriggerOutcome;

    fn list(ids: &[&str]) -> Vec<Command> {
        ids.iter()
            .map(|id| Command::new(*id, *id, || async { Ok(TriggerOutcome::Close) }))
            .collect()
    }

    #[test]
    fn unchanged_inputs_keep_selection() {
        let c = list(&["a", "b", "c", "d"]);
        for i in 0..c.len() {
            assert_eq!(reconcile(&c, i, "t", &c, "t"), i);
        }
    }

    #[test]
    fn term_change_resets_to_top() {
        let c1 = list(&["a", "b", "c"]);
        let c2 = list(&["c", "b", "a"]);
        assert_eq!(reconcile(&c1, 2, "ab", &c2, "abc"), 0);
        assert_eq!(reconcile(&c1, 1, "", &c1, "x"), 0);
        assert_eq!(reconcile(&c1, 9, "x", &c2, ""), 0);
    }

    #[test]
    fn stable_term_follows_command_to_new_index() {
        let c1 = list(&["a", "b", "c"]);
        let c2 = list(&["new", "c", "a", "b"]);
        assert_eq!(reconcile(&c1, 1, "q", &c2, "q"), 3);
        assert_eq!(reconcile(&c1, 2, "q", &c2, "q"), 1);
    }

    #[test]
    fn stable_term_with_vanished_command_resets() {
        let c1 = list(&["a", "b", "c"]);
        let c2 = list(&["a", "c"]);
        assert_eq!(reconcile(&c1, 1, "q", &c2, "q"), 0);
    }

    #[test]
    fn invalid_previous_index_resets() {
        let c = list(&["a", "b"]);
        assert_eq!(reconcile(&c, 5, "q", &c, "q"), 0);
        assert_eq!(reconcile(&[], 0, "q", &c, "q"), 0);
    }

    #[test]
    fn advance_preserves_selection_under_background_update() {
        let result = RankedResult::initial(list(&["tab-1", "tab-2", "tab-3"])).select(2);
        let next = result.advance("", list(&["tab-0", "tab-1", "tab-2", "tab-3"]));
        assert_eq!(next.selected_index(), 3);
        assert_eq!(next.selected().unwrap().id, "tab-3");
        // The previous value is untouched.
        assert_eq!(result.selected_index(), 2);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn advance_records_searched_term() {
        let next = RankedResult::empty().advance("doc", list(&["docs"]));
        assert_eq!(next.searched_term(), "doc");
        assert_eq!(next.selected_index(), 0);
    }

    #[test]
    fn select_above_wraps_to_last() {
        let result = RankedResult::initial(list(&["a", "b", "c"]));
        assert_eq!(result.select_above().selected_index(), 2);
        assert_eq!(result.select(2).select_above().selected_index(), 1);
    }

    #[test]
    fn select_below_wraps_to_first() {
        let result = RankedResult::initial(list(&["a", "b", "c"])).select(2);
        assert_eq!(result.select_below().selected_index(), 0);
        assert_eq!(result.select(0).select_below().selected_index(), 1);
    }

    #[test]
    fn navigation_on_empty_list_stays_at_zero() {
        let empty = RankedResult::empty();
        assert_eq!(empty.select_above().selected_index(), 0);
        assert_eq!(empty.select_below().selected_index(), 0);
        assert!(empty.selected().is_none());
    }

    #[test]
    fn down_then_up_returns_to_start() {
        let result = RankedResult::initial(list(&["a", "b"]));
        assert_eq!(result.select_below().select_above().selected_index(), 0);
    }
}
