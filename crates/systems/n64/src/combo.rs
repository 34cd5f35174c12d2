//! Combo buffer and the special-move table.

use crate::tables::DEFAULT_SPECIAL_MOVES;
use serde::Serialize;
use std::time::Duration;

/// Most recent button presses, oldest first
///
/// A press that comes more than `timeout` after the previous one starts a
/// fresh buffer.
#[derive(Debug, Clone, Serialize)]
pub struct ComboBuffer {
    entries: Vec<String>,
    #[serde(skip)]
    last_input: Option<Duration>,
    #[serde(skip)]
    timeout: Duration,
}

impl ComboBuffer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            entries: Vec::new(),
            last_input: None,
            timeout,
        }
    }

    /// Record a press at time `now`. Returns true if stale entries were dropped first.
    pub fn push(&mut self, button: &str, now: Duration) -> bool {
        let expired = match self.last_input {
            Some(prev) => now.saturating_sub(prev) > self.timeout,
            None => true,
        };
        let dropped = expired && !self.entries.is_empty();
        if expired {
            self.entries.clear();
        }
        self.entries.push(button.to_string());
        self.last_input = Some(now);
        dropped
    }

    /// The last three presses, oldest first
    pub fn last_three(&self) -> Option<[&str; 3]> {
        match self.entries.as_slice() {
            [.., a, b, c] => Some([a.as_str(), b.as_str(), c.as_str()]),
            _ => None,
        }
    }

    /// Empty the buffer. The timeout still counts from the last press.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exact 3-button sequences and the move each one triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialMoves {
    moves: Vec<([String; 3], String)>,
}

impl SpecialMoves {
    pub fn lookup(&self, combo: [&str; 3]) -> Option<&str> {
        self.moves
            .iter()
            .find(|(seq, _)| seq.iter().zip(combo.iter()).all(|(a, b)| a == b))
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Default for SpecialMoves {
    fn default() -> Self {
        Self {
            moves: DEFAULT_SPECIAL_MOVES
                .iter()
                .map(|(seq, name)| (seq.map(String::from), name.to_string()))
                .collect(),
        }
    }
}
