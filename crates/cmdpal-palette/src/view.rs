use serde::Serialize;

use crate::matcher::fuzzy_match;
use crate::mode::Mode;
use crate::reconcile::RankedResult;

/// A single row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteViewItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Char indices of `title` matched by the search term.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<usize>,
    pub selected: bool,
}

/// Snapshot of the palette for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteView {
    pub text: String,
    pub mode: Mode,
    pub items: Vec<PaletteViewItem>,
    pub selected_index: usize,
}

impl PaletteView {
    pub(crate) fn build(text: &str, mode: Mode, result: &RankedResult) -> Self {
        let term = result.searched_term();
        let items = result
            .commands()
            .iter()
            .enumerate()
            .map(|(index, command)| PaletteViewItem {
                id: command.id.clone(),
                title: command.title.clone(),
                description: command.description.clone(),
                detail: command.detail.clone(),
                icon_url: command.icon_url.clone(),
                highlights: fuzzy_match(term, &command.title)
                    .map(|m| m.positions)
                    .unwrap_or_default(),
                selected: index == result.selected_index(),
            })
            .collect();

        Self {
            text: text.to_string(),
            mode,
            items,
            selected_index: result.selected_index(),
        }
    }
}
