//! Game progression: which stage the session is in and when it moves on.

use serde::Serialize;
use std::fmt;
use vibe_core::console::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    #[serde(rename = "BOOT")]
    Boot,
    #[serde(rename = "LEVEL_1")]
    Level1,
    #[serde(rename = "BOSS_1")]
    Boss1,
    #[serde(rename = "LEVEL_2")]
    Level2,
    #[serde(rename = "BOSS_2")]
    Boss2,
    #[serde(rename = "ENDING")]
    Ending,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::Boot => "BOOT",
            GameState::Level1 => "LEVEL_1",
            GameState::Boss1 => "BOSS_1",
            GameState::Level2 => "LEVEL_2",
            GameState::Boss2 => "BOSS_2",
            GameState::Ending => "ENDING",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTransition {
    /// Exact frame number the transition fires on
    pub frame: u32,
    pub state: GameState,
    pub narrative: &'static str,
    pub style: Style,
}

pub const STAGE_TRANSITIONS: [StageTransition; 5] = [
    StageTransition {
        frame: 50,
        state: GameState::Level1,
        narrative: "🌟 Entering the Forest Temple...",
        style: Style::Cyan,
    },
    StageTransition {
        frame: 150,
        state: GameState::Boss1,
        narrative: "⚔️ Boss Battle: Forest Guardian!",
        style: Style::Red,
    },
    StageTransition {
        frame: 300,
        state: GameState::Level2,
        narrative: "🏃 Running through the Lost Woods...",
        style: Style::Green,
    },
    StageTransition {
        frame: 450,
        state: GameState::Boss2,
        narrative: "🐉 Dragon Lord Appears!",
        style: Style::Red,
    },
    StageTransition {
        frame: 550,
        state: GameState::Ending,
        narrative: "🎭 Approaching the Final Battle...",
        style: Style::Yellow,
    },
];

/// The transition scheduled for exactly this frame, if any
pub fn transition_at(frame: u32) -> Option<&'static StageTransition> {
    STAGE_TRANSITIONS.iter().find(|t| t.frame == frame)
}
