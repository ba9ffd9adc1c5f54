//! Command vocabulary of the interactive client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A command the interactive client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Fetch the vault from the server.
    Get,
    /// List clients registered for the vault.
    Roster,
    /// Revoke a client's access.
    Revoke,
    /// Confirm a pending client.
    Confirm,
    /// List secrets.
    List,
    /// Add a secret.
    Insert,
    /// Remove a secret.
    Delete,
    /// Show one secret.
    View,
    /// Change a secret.
    Edit,
    /// Show sync status.
    Status,
    /// Return to an earlier version.
    Rollback,
    /// Browse the version history.
    TimeMachine,
}

impl Command {
    /// Every command, in matching priority order.
    pub const ALL: [Self; 12] = [
        Self::Get,
        Self::Roster,
        Self::Revoke,
        Self::Confirm,
        Self::List,
        Self::Insert,
        Self::Delete,
        Self::View,
        Self::Edit,
        Self::Status,
        Self::Rollback,
        Self::TimeMachine,
    ];

    /// Keyword typed by the user.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Roster => "roster",
            Self::Revoke => "revoke",
            Self::Confirm => "confirm",
            Self::List => "list",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::View => "view",
            Self::Edit => "edit",
            Self::Status => "status",
            Self::Rollback => "rollback",
            Self::TimeMachine => "timemachine",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input that is not exactly one command keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_owned()))
    }
}

/// Find the command mentioned anywhere in free-text `input`.
///
/// Keywords are matched as case-sensitive substrings. When several occur,
/// the one earliest in [`Command::ALL`] wins, not the one earliest in the
/// input.
#[must_use]
pub fn find_command(input: &str) -> Option<Command> {
    Command::ALL
        .into_iter()
        .find(|cmd| input.contains(cmd.as_str()))
}
