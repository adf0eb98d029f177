//! Short-term conversation transcript.
//!
//! Keeps the most recent user/bot turns in a fixed-capacity ring buffer. The
//! "memory" intent renders it back to the user; nothing else reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default cap: five exchanges.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Rendered in place of an empty transcript.
pub const EMPTY_SENTINEL: &str = "(empty)";

/// Who said it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, chronologically ordered transcript.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Oldest first.
    turns: VecDeque<Turn>,
    max_entries: usize,
}

impl Transcript {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_entries.saturating_add(1)),
            max_entries,
        }
    }

    /// Append a turn, then evict from the head one entry at a time until the
    /// cap holds again.
    pub fn push(&mut self, role: Role, message: impl Into<String>) {
        self.turns.push_back(Turn {
            role,
            message: message.into(),
            timestamp: Utc::now(),
        });
        while self.turns.len() > self.max_entries {
            self.turns.pop_front();
        }
    }

    /// One `"<role>: <message>"` line per turn, oldest first, or
    /// [`EMPTY_SENTINEL`] when nothing has been recorded.
    #[must_use]
    pub fn render(&self) -> String {
        if self.turns.is_empty() {
            return EMPTY_SENTINEL.to_owned();
        }
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role, t.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Turns in chronological order.
    pub fn entries(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
