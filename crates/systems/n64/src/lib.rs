//! Super Vibe 64 session simulator.
//!
//! This crate plays back a pretend session on a fictional N64-style console.
//! Nothing is emulated: the "ROM" is never read, the "CPU" shuffles numbers
//! between named registers, and graphics and audio are lines of flavor text.
//!
//! - **Session**: boot banner, ROM header, a bounded 60 fps frame loop, outro
//! - **CPU**: ten arithmetic/bitwise ops over eight registers, every 30th frame
//! - **Video/Audio**: scene lines every 60th frame, sound lines every 45th
//! - **Input**: random button presses feeding a combo buffer and special moves
//! - **Stages**: BOOT through ENDING on fixed frames, each with a stat bonus

mod combo;
mod config;
mod cpu;
mod input;
mod player;
mod rom;
mod session;
mod stage;
mod state;
pub mod tables;

use thiserror::Error;

pub use combo::{ComboBuffer, SpecialMoves};
pub use config::SessionConfig;
pub use cpu::{format_hex, CpuEvent, CpuOp, Register, RegisterFile};
pub use input::{ActionBinding, InputMap};
pub use player::{Player, MAX_HEALTH};
pub use rom::{Region, RomInfo, ROM_ID_RANGE};
pub use session::{FrameReport, InputEvent, Session, SessionSummary};
pub use stage::{transition_at, GameState, StageTransition, STAGE_TRANSITIONS};
pub use state::EmulatorState;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("ROM load failed: {0}")]
    LoadFailure(String),
    #[error("Output failed: {0}")]
    Output(#[from] std::io::Error),
    #[error("Invalid input config: {0}")]
    InvalidInputConfig(String),
    #[error("Invalid session config: {0}")]
    InvalidConfig(String),
    #[error("Unknown button: {0}")]
    UnknownButton(String),
}
