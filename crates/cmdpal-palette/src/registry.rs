use tracing::debug;

use crate::command::Command;

/// Group-partitioned set of commands shown in command mode.
///
/// Registration order is display order when the search term is empty.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every command of `group` with `commands`.
    ///
    /// Untouched commands keep their relative order; the new ones are
    /// appended and stamped with `group`. Ungrouped commands are never
    /// removed. An empty list clears the group.
    pub fn replace_group(&mut self, group: &str, commands: Vec<Command>) {
        let before = self.commands.len();
        self.commands
            .retain(|command| command.group.as_deref() != Some(group));
        let removed = before - self.commands.len();
        let added = commands.len();

        self.commands.extend(
            commands
                .into_iter()
                .map(|command| command.in_group(group.to_string())),
        );

        debug!(group, removed, added, total = self.commands.len(), "command group replaced");
    }

    /// Append a command that no group registration can remove.
    pub fn insert_ungrouped(&mut self, mut command: Command) {
        command.group = None;
        self.commands.push(command);
    }

    /// The full candidate set, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Commands currently registered under `group`.
    pub fn group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Command> + 'a {
        self.commands
            .iter()
            .filter(move |command| command.group.as_deref() == Some(group))
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.id == id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
