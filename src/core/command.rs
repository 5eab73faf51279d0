//! # Commands
//!
//! The user-facing container commands and the texts each one shows while it
//! runs. `Command` is a closed set: the container list maps keys onto it and
//! `update()` dispatches on it.

/// A command the user can run from the container list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Create,
    Diff,
    Inspect,
    Kill,
    Logs,
    Pause,
    Port,
    Prune,
    Rename,
    Remove,
    Start,
    Stop,
    Top,
    Unpause,
    Pull,
    SystemPrune,
}

impl Command {
    pub const ALL: [Command; 16] = [
        Command::Create,
        Command::Diff,
        Command::Inspect,
        Command::Kill,
        Command::Logs,
        Command::Pause,
        Command::Port,
        Command::Prune,
        Command::Rename,
        Command::Remove,
        Command::Start,
        Command::Stop,
        Command::Top,
        Command::Unpause,
        Command::Pull,
        Command::SystemPrune,
    ];

    /// Short name as shown in the key help.
    pub fn name(self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Diff => "diff",
            Command::Inspect => "inspect",
            Command::Kill => "kill",
            Command::Logs => "logs",
            Command::Pause => "pause",
            Command::Port => "port",
            Command::Prune => "prune",
            Command::Rename => "rename",
            Command::Remove => "rm",
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Top => "top",
            Command::Unpause => "unpause",
            Command::Pull => "pull",
            Command::SystemPrune => "system-prune",
        }
    }

    pub fn key(self) -> char {
        match self {
            Command::Create => 'c',
            Command::Diff => 'd',
            Command::Inspect => 'i',
            Command::Kill => 'k',
            Command::Logs => 'l',
            Command::Pause => 'p',
            Command::Port => 'o',
            Command::Prune => 'x',
            Command::Rename => 'n',
            Command::Remove => 'r',
            Command::Start => 's',
            Command::Stop => 'S',
            Command::Top => 't',
            Command::Unpause => 'u',
            Command::Pull => 'P',
            Command::SystemPrune => 'X',
        }
    }

    pub fn from_key(key: char) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Error text for a selected-resource command run with nothing selected.
    ///
    /// `None` means the command does not need a selection.
    pub fn no_selection_message(self) -> Option<&'static str> {
        let text = match self {
            Command::Diff => "there is no container to display diff",
            Command::Inspect => "there is no container to inspect",
            Command::Kill => "there is no container to kill",
            Command::Logs => "there is no container to display logs",
            Command::Pause => "there is no container to pause",
            Command::Port => "there is no container to display port",
            Command::Rename => "there is no container to rename",
            Command::Remove => "there is no container to remove",
            Command::Start => "there is no container to start",
            Command::Stop => "there is no container to stop",
            Command::Top => "there is no container to display top",
            Command::Unpause => "there is no container to unpause",
            Command::Create | Command::Prune | Command::Pull | Command::SystemPrune => {
                return None;
            }
        };
        Some(text)
    }

    pub fn needs_selection(self) -> bool {
        self.no_selection_message().is_some()
    }

    /// Whether a successful run changes the container list.
    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            Command::Diff
                | Command::Inspect
                | Command::Logs
                | Command::Port
                | Command::Top
                | Command::Pull
        )
    }

    pub fn progress_title(self) -> String {
        match self {
            Command::Pull => "image pull in progress".to_string(),
            Command::SystemPrune => "system prune in progress".to_string(),
            Command::Remove => "container remove in progress".to_string(),
            other => format!("container {} in progress", other.name()),
        }
    }

    /// Title of the message dialog that shows this command's output.
    pub fn message_title(self) -> String {
        match self {
            Command::Create => "CONTAINER CREATE WARNINGS".to_string(),
            Command::SystemPrune => "podman system prune".to_string(),
            Command::Pull => "podman image pull".to_string(),
            Command::Remove => "podman container remove".to_string(),
            other => format!("podman container {}", other.name()),
        }
    }
}

/// The one destructive command waiting on a yes/no answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingConfirmation {
    #[default]
    None,
    /// Carries the id selected when the prompt opened.
    Remove { id: String },
    Prune,
    SystemPrune,
}

impl PendingConfirmation {
    pub fn is_pending(&self) -> bool {
        !matches!(self, PendingConfirmation::None)
    }
}
