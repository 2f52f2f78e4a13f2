use cmdpal_palette::PaletteView;

/// Plain-text rendering of a palette state, one row per line.
pub fn render_text(view: &PaletteView) -> String {
    let mut out = format!("[{}] {}\n", view.text, view.mode);
    if view.items.is_empty() {
        out.push_str("  (no results)\n");
    }
    for item in &view.items {
        let marker = if item.selected { '>' } else { ' ' };
        out.push(marker);
        out.push(' ');
        out.push_str(&item.title);
        if let Some(detail) = &item.detail {
            out.push_str("  (");
            out.push_str(detail);
            out.push(')');
        }
        out.push('\n');
    }
    out
}
