//! Per-page bridge state.
//!
//! A page needs the `cmdpal` listener installed once per document. The
//! state lives here, keyed by tab, instead of in a flag on the page's
//! global object.

use std::collections::HashMap;

use cmdpal_common::TabId;

#[derive(Debug, Default)]
struct PageContext {
    opens: u32,
}

#[derive(Debug, Default)]
pub struct PageContexts {
    contexts: HashMap<TabId, PageContext>,
}

impl PageContexts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a palette opening over `tab`. Returns `true` when the page
    /// listener had to be installed first.
    pub fn ensure_listener(&mut self, tab: TabId) -> bool {
        let installed = !self.contexts.contains_key(&tab);
        self.contexts.entry(tab).or_default().opens += 1;
        installed
    }

    pub fn has_listener(&self, tab: TabId) -> bool {
        self.contexts.contains_key(&tab)
    }

    /// How often the palette was opened over `tab` since its listener was
    /// installed.
    pub fn open_count(&self, tab: TabId) -> u32 {
        self.contexts.get(&tab).map_or(0, |context| context.opens)
    }

    /// Forget `tab`, e.g. after it navigated and lost its listener.
    pub fn forget(&mut self, tab: TabId) {
        self.contexts.remove(&tab);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_is_installed_once_per_tab() {
        let mut contexts = PageContexts::new();
        assert!(contexts.ensure_listener(TabId(1)));
        assert!(!contexts.ensure_listener(TabId(1)));
        assert!(contexts.ensure_listener(TabId(2)));
        assert_eq!(contexts.open_count(TabId(1)), 2);
    }

    #[test]
    fn forget_requires_reinstall() {
        let mut contexts = PageContexts::new();
        contexts.ensure_listener(TabId(1));
        contexts.forget(TabId(1));
        assert!(!contexts.has_listener(TabId(1)));
        assert!(contexts.ensure_listener(TabId(1)));
        assert_eq!(contexts.open_count(TabId(1)), 1);
    }
}
