//! Everything a session mutates frame to frame.

use crate::combo::ComboBuffer;
use crate::cpu::RegisterFile;
use crate::player::Player;
use crate::rom::RomInfo;
use crate::stage::GameState;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct EmulatorState {
    pub registers: RegisterFile,
    pub player: Player,
    pub combo_buffer: ComboBuffer,
    pub frame_count: u32,
    pub game_state: GameState,
    /// Filled in by the ROM load, read-only afterwards
    pub rom_info: Option<RomInfo>,
    /// "Frame N: <scene>" entries
    pub graphics_buffer: Vec<String>,
    pub sound_events: Vec<String>,
}

impl EmulatorState {
    pub fn new(combo_timeout: Duration) -> Self {
        Self {
            registers: RegisterFile::new(),
            player: Player::new(),
            combo_buffer: ComboBuffer::new(combo_timeout),
            frame_count: 0,
            game_state: GameState::Boot,
            rom_info: None,
            graphics_buffer: Vec::new(),
            sound_events: Vec::new(),
        }
    }
}
