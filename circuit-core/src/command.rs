//! Program commands and the bounded queue the player builds.

use crate::error::CommandError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One program instruction.
///
/// Serializes as the upper-case token (`"UP"`, `"ACTIVATE_CIRCUIT"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Move one row up.
    Up,
    /// Move one row down.
    Down,
    /// Move one column left.
    Left,
    /// Move one column right.
    Right,
    /// Activate the circuit under the robot, if any.
    ActivateCircuit,
}

impl Command {
    /// All commands, in palette order.
    pub const ALL: [Command; 5] = [
        Command::Up,
        Command::Left,
        Command::Down,
        Command::Right,
        Command::ActivateCircuit,
    ];

    /// `(d_row, d_col)` for this command. `ActivateCircuit` is `(0, 0)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Command::Up => (-1, 0),
            Command::Down => (1, 0),
            Command::Left => (0, -1),
            Command::Right => (0, 1),
            Command::ActivateCircuit => (0, 0),
        }
    }

    /// Whether this command moves the robot.
    pub fn is_move(self) -> bool {
        self != Command::ActivateCircuit
    }

    /// The upper-case program token.
    pub fn token(self) -> &'static str {
        match self {
            Command::Up => "UP",
            Command::Down => "DOWN",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
            Command::ActivateCircuit => "ACTIVATE_CIRCUIT",
        }
    }

    /// The lower-case name used when reporting a completed program.
    pub fn wire_name(self) -> &'static str {
        match self {
            Command::Up => "up",
            Command::Down => "down",
            Command::Left => "left",
            Command::Right => "right",
            Command::ActivateCircuit => "activate_circuit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Accepts the upper-case token or the lower-case wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.token() == s || c.wire_name() == s)
            .ok_or_else(|| CommandError::Unknown(s.to_owned()))
    }
}

/// An ordered program of at most `max_commands` commands.
///
/// The authoring surface owns the queue. The engine copies it when a
/// run starts, so edits made during a run apply to the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandQueue {
    commands: Vec<Command>,
    max_commands: usize,
}

impl CommandQueue {
    /// An empty queue bounded by `max_commands`.
    pub fn new(max_commands: usize) -> Self {
        Self {
            commands: Vec::new(),
            max_commands,
        }
    }

    /// Collapse program slots into a queue, dropping empty slots.
    pub fn from_slots(slots: &[Option<Command>], max_commands: usize) -> Result<Self, CommandError> {
        let mut queue = Self::new(max_commands);
        for cmd in slots.iter().flatten() {
            queue.push(*cmd)?;
        }
        Ok(queue)
    }

    /// Parse tokens into a queue. Unknown tokens are rejected.
    pub fn parse<S: AsRef<str>>(tokens: &[S], max_commands: usize) -> Result<Self, CommandError> {
        let mut queue = Self::new(max_commands);
        for token in tokens {
            queue.push(token.as_ref().parse()?)?;
        }
        Ok(queue)
    }

    /// Append a command.
    pub fn push(&mut self, cmd: Command) -> Result<(), CommandError> {
        if self.commands.len() >= self.max_commands {
            return Err(CommandError::QueueFull {
                max: self.max_commands,
            });
        }
        self.commands.push(cmd);
        Ok(())
    }

    /// Remove and return the command at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Command> {
        (index < self.commands.len()).then(|| self.commands.remove(index))
    }

    /// Drop every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Change the limit. This always empties the queue.
    pub fn set_max_commands(&mut self, max_commands: usize) {
        self.max_commands = max_commands;
        self.commands.clear();
    }

    /// The limit.
    pub fn max_commands(&self) -> usize {
        self.max_commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Borrow the commands in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Lower-case names for completion reporting.
    pub fn wire_names(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.wire_name().to_owned()).collect()
    }
}
