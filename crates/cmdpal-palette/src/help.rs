use crate::command::{Command, TriggerOutcome};

/// The `?` menu. Each entry keeps the palette open and rewrites the input
/// to switch mode.
pub fn help_commands() -> Vec<Command> {
    [
        ("help.tabs", "…", "Search Open Tabs", ""),
        ("help.cmd", ">", "Show and Run Commands", ">"),
        ("help.bookmark", "#", "Search Bookmarks", "#"),
    ]
    .into_iter()
    .map(|(id, title, description, input)| {
        Command::new(id, title, move || async move { Ok(TriggerOutcome::rewrite_input(input)) })
            .with_description(description)
            .in_group("help")
    })
    .collect()
}
