//! The session driver.
//!
//! A [`Session`] boots the fake cartridge, then runs a bounded frame loop. Each
//! frame walks the same fixed sequence of steps:
//!
//! 1. bump the frame counter
//! 2. CPU activity (every 30th frame)
//! 3. scene line (every 60th frame)
//! 4. sound line (every 45th frame)
//! 5. maybe sample a button press
//! 6. stage transition on the scheduled frames
//! 7. combo check
//! 8. sleep 1/fps on the session clock
//!
//! All randomness comes from the generator handed to [`Session::new`], all
//! text goes to the session's [`Console`], and all waiting goes through its
//! [`Clock`]. With a seeded generator and a [`VirtualClock`](vibe_core::clock::VirtualClock)
//! a session is fully reproducible.

use crate::combo::SpecialMoves;
use crate::config::SessionConfig;
use crate::cpu::{format_hex, CpuEvent, CpuOp, Register, RegisterFile};
use crate::input::InputMap;
use crate::player::Player;
use crate::rom::RomInfo;
use crate::stage::{transition_at, GameState};
use crate::state::EmulatorState;
use crate::tables::{
    AUDIO_INTERVAL, BOOT_LOGO, CPU_INTERVAL, INTRO_LINES, SCENES, SOUNDS, VIDEO_INTERVAL,
};
use crate::SimError;
use rand::seq::index;
use rand::Rng;
use serde_json::{json, Value};
use std::time::Duration;
use vibe_core::clock::{Clock, SystemClock};
use vibe_core::console::{Console, Style, TerminalConsole};
use vibe_core::logging::{log, LogCategory, LogLevel};
use vibe_core::System;

const ANALYZE_DELAY: Duration = Duration::from_millis(300);
const BANNER_SETTLE_DELAY: Duration = Duration::from_millis(500);
const ROM_INFO_WIDTH: usize = 40;

/// A button press accepted by the input step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub button: String,
    pub action: String,
    /// The combo buffer had gone stale and was emptied before this press
    pub combo_reset: bool,
}

/// What happened on one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u32,
    pub cpu: Option<CpuEvent>,
    pub scene: Option<&'static str>,
    pub sound: Option<&'static str>,
    pub input: Option<InputEvent>,
    pub transition: Option<GameState>,
    pub special_move: Option<String>,
}

/// Final numbers, as printed by the outro
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u32,
    pub health: u32,
    pub magic: u32,
    pub experience: u32,
    pub game_state: GameState,
    /// Error that ended the frame loop early, if any
    pub aborted: Option<String>,
}

pub struct Session<R: Rng> {
    rom_path: String,
    config: SessionConfig,
    input_map: InputMap,
    special_moves: SpecialMoves,
    state: EmulatorState,
    running: bool,
    rng: R,
    console: Box<dyn Console>,
    clock: Box<dyn Clock>,
}

impl<R: Rng> Session<R> {
    /// Create a session with the default tuning, colored stdout and real time.
    ///
    /// `input_config` replaces the default button table when given.
    pub fn new(
        rom_path: impl Into<String>,
        input_config: Option<InputMap>,
        rng: R,
    ) -> Result<Self, SimError> {
        let input_map = match input_config {
            Some(map) => {
                map.validate()?;
                map
            }
            None => InputMap::default(),
        };
        let config = SessionConfig::default();
        Ok(Self {
            rom_path: rom_path.into(),
            state: EmulatorState::new(config.combo_timeout()),
            config,
            input_map,
            special_moves: SpecialMoves::default(),
            running: false,
            rng,
            console: Box::new(TerminalConsole::ansi()),
            clock: Box::new(SystemClock::new()),
        })
    }

    /// Replace the tuning. Starts the session over, so a loaded ROM has to be
    /// loaded again.
    pub fn with_config(mut self, config: SessionConfig) -> Result<Self, SimError> {
        config.validate()?;
        self.state = EmulatorState::new(config.combo_timeout());
        self.running = false;
        self.config = config;
        Ok(self)
    }

    pub fn with_console(mut self, console: Box<dyn Console>) -> Self {
        self.console = console;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn rom_path(&self) -> &str {
        &self.rom_path
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn input_map(&self) -> &InputMap {
        &self.input_map
    }

    pub fn state(&self) -> &EmulatorState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.state.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.state.registers
    }

    pub fn frame_count(&self) -> u32 {
        self.state.frame_count
    }

    pub fn game_state(&self) -> GameState {
        self.state.game_state
    }

    pub fn rom_info(&self) -> Option<&RomInfo> {
        self.state.rom_info.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn say(&mut self, style: Style, text: &str) -> Result<(), SimError> {
        self.console.emit(style, text)?;
        Ok(())
    }

    /// Greeting printed before the session proper starts
    pub fn show_welcome(&mut self) -> Result<(), SimError> {
        self.say(Style::Cyan, "🎮 Welcome to Super Vibe 64! 🎮")?;
        let delay = self.config.intro_line_delay();
        self.clock.sleep(delay);
        Ok(())
    }

    /// Print the boot banner, make up a ROM header, and arm the session.
    ///
    /// On failure the error is printed and the session stays unarmed.
    pub fn load_rom(&mut self) -> Result<(), SimError> {
        match self.try_load_rom() {
            Ok(()) => {
                self.running = true;
                log(LogCategory::Game, LogLevel::Info, || {
                    format!("ROM loaded from {}", self.rom_path)
                });
                Ok(())
            }
            Err(e) => {
                let msg = e.to_string();
                // The console may be what failed, so this line is best effort.
                let _ = self.say(Style::Red, &format!("❌ Error loading ROM: {}", msg));
                log(LogCategory::Game, LogLevel::Error, || {
                    format!("ROM load failed: {}", msg)
                });
                Err(SimError::LoadFailure(msg))
            }
        }
    }

    fn try_load_rom(&mut self) -> Result<(), SimError> {
        self.show_boot_sequence()?;

        let line = format!("📦 Loading ROM: {}", self.rom_path);
        self.say(Style::Green, &line)?;
        self.say(Style::Yellow, "🔍 Analyzing ROM structure...")?;
        self.clock.sleep(ANALYZE_DELAY);

        let info = RomInfo::synthesize(&mut self.rng);
        self.show_rom_info(&info)?;
        self.state.rom_info = Some(info);
        Ok(())
    }

    fn show_boot_sequence(&mut self) -> Result<(), SimError> {
        let delay = self.config.boot_line_delay();
        self.say(Style::Plain, "")?;
        for line in BOOT_LOGO {
            self.say(Style::Cyan, line)?;
            self.clock.sleep(delay);
        }
        self.say(Style::Plain, "")?;
        self.clock.sleep(BANNER_SETTLE_DELAY);
        Ok(())
    }

    fn show_rom_info(&mut self, info: &RomInfo) -> Result<(), SimError> {
        let border = "─".repeat(ROM_INFO_WIDTH);
        self.say(Style::Plain, "")?;
        self.say(Style::Magenta, "📊 ROM Information:")?;
        self.say(Style::Plain, &format!("┌{}┐", border))?;
        for (key, value) in info.rows() {
            self.say(Style::Plain, &format!("│ {:15} : {:21} │", key, value))?;
        }
        self.say(Style::Plain, &format!("└{}┘", border))?;
        self.say(Style::Plain, "")
    }

    /// Load if needed, play the intro and the frame loop, then print the outro.
    ///
    /// Returns `Err` only when the ROM load fails, in which case nothing else
    /// runs. An error inside the loop stops the loop; it is printed, recorded
    /// in the summary, and the outro still runs.
    pub fn run(&mut self) -> Result<SessionSummary, SimError> {
        if !self.running {
            self.load_rom()?;
        }

        let mut aborted = match self.play() {
            Ok(()) => None,
            Err(e) => {
                let msg = e.to_string();
                let _ = self.say(Style::Red, &format!("⚠️ Emulation Error: {}", msg));
                log(LogCategory::Game, LogLevel::Error, || {
                    format!("frame loop stopped at frame {}: {}", self.state.frame_count, msg)
                });
                Some(msg)
            }
        };

        // The outro is best effort; a sink that broke mid-loop usually stays broken
        if let Err(e) = self.show_game_outro() {
            log(LogCategory::Game, LogLevel::Warn, || {
                format!("outro not fully printed: {}", e)
            });
            aborted.get_or_insert_with(|| e.to_string());
        }
        Ok(self.summary(aborted))
    }

    fn play(&mut self) -> Result<(), SimError> {
        self.say(Style::Plain, "")?;
        self.say(Style::Cyan, "🎮 Starting Super Vibe 64...")?;
        self.show_game_intro()?;

        while self.running && self.state.frame_count < self.config.max_frames {
            self.step_frame()?;
        }
        Ok(())
    }

    fn show_game_intro(&mut self) -> Result<(), SimError> {
        let delay = self.config.intro_line_delay();
        for line in INTRO_LINES {
            self.say(Style::Plain, "")?;
            self.say(Style::Yellow, line)?;
            self.clock.sleep(delay);
        }
        Ok(())
    }

    pub fn show_game_outro(&mut self) -> Result<(), SimError> {
        let player = &self.state.player;
        let lines = [
            (Style::Plain, String::new()),
            (Style::Cyan, "🏁 Game session completed!".to_string()),
            (
                Style::Plain,
                format!("Frames rendered: {}", self.state.frame_count),
            ),
            (
                Style::Plain,
                format!(
                    "Player stats: Health: {}, Magic: {}",
                    player.health, player.magic
                ),
            ),
            (
                Style::Plain,
                format!("Experience gained: {}", player.experience),
            ),
            (Style::Plain, String::new()),
            (Style::Plain, "Thanks for playing Super Vibe 64!".to_string()),
        ];
        for (style, line) in lines {
            self.say(style, &line)?;
        }
        Ok(())
    }

    fn summary(&self, aborted: Option<String>) -> SessionSummary {
        SessionSummary {
            frames: self.state.frame_count,
            health: self.state.player.health,
            magic: self.state.player.magic,
            experience: self.state.player.experience,
            game_state: self.state.game_state,
            aborted,
        }
    }

    fn advance_frame(&mut self) -> Result<FrameReport, SimError> {
        self.state.frame_count = self.state.frame_count.saturating_add(1);
        let frame = self.state.frame_count;
        if frame % self.config.fps == 0 {
            log(LogCategory::Game, LogLevel::Debug, || {
                format!("frame {} ({})", frame, self.state.game_state)
            });
        }

        let report = FrameReport {
            frame,
            cpu: self.execute_cpu_cycle()?,
            scene: self.render_graphics()?,
            sound: self.play_sound()?,
            input: self.check_for_input()?,
            transition: self.update_game_state()?,
            special_move: self.check_for_combos()?,
        };

        let pace = self.config.frame_duration();
        self.clock.sleep(pace);
        Ok(report)
    }

    fn execute_cpu_cycle(&mut self) -> Result<Option<CpuEvent>, SimError> {
        if self.state.frame_count % CPU_INTERVAL != 0 {
            return Ok(None);
        }
        let op = CpuOp::ALL[self.rng.gen_range(0..CpuOp::ALL.len())];
        let picks = index::sample(&mut self.rng, Register::ALL.len(), 2);
        let dst = Register::ALL[picks.index(0)];
        let src = Register::ALL[picks.index(1)];
        self.execute_cpu_op(op, dst, src).map(Some)
    }

    /// Run one CPU operation on `dst` and `src`, storing into `dst`.
    ///
    /// A division by zero is skipped: `dst` keeps its value, nothing is
    /// printed, and the event carries `result: None`.
    pub fn execute_cpu_op(
        &mut self,
        op: CpuOp,
        dst: Register,
        src: Register,
    ) -> Result<CpuEvent, SimError> {
        let x = self.state.registers.get(dst);
        let y = self.state.registers.get(src);
        let result = op.apply(x, y);

        match result {
            Some(value) => {
                self.state.registers.set(dst, value);
                log(LogCategory::CPU, LogLevel::Trace, || {
                    format!("{} {}={:#x} {}={:#x} -> {:#x}", op, dst, x, src, y, value)
                });
                let line = format!("💻 CPU: {} {},{} = {}", op, dst, src, format_hex(value));
                self.say(Style::Blue, &line)?;
            }
            None => log(LogCategory::CPU, LogLevel::Debug, || {
                format!(
                    "skipped {} {},{} at frame {}: divisor is zero",
                    op, dst, src, self.state.frame_count
                )
            }),
        }

        Ok(CpuEvent {
            op,
            dst,
            src,
            result,
        })
    }

    fn render_graphics(&mut self) -> Result<Option<&'static str>, SimError> {
        let frame = self.state.frame_count;
        if frame % VIDEO_INTERVAL != 0 {
            return Ok(None);
        }
        let scene = SCENES[self.rng.gen_range(0..SCENES.len())];
        self.state
            .graphics_buffer
            .push(format!("Frame {}: {}", frame, scene));
        log(LogCategory::Video, LogLevel::Trace, || {
            format!("frame {}: scene {}", frame, scene)
        });
        self.say(Style::Green, &format!("🎨 {}...", scene))?;
        Ok(Some(scene))
    }

    fn play_sound(&mut self) -> Result<Option<&'static str>, SimError> {
        let frame = self.state.frame_count;
        if frame % AUDIO_INTERVAL != 0 {
            return Ok(None);
        }
        let sound = SOUNDS[self.rng.gen_range(0..SOUNDS.len())];
        self.state.sound_events.push(sound.to_string());
        log(LogCategory::Audio, LogLevel::Trace, || {
            format!("frame {}: sound {}", frame, sound)
        });
        self.say(Style::Yellow, &format!("🔊 {}", sound))?;
        Ok(Some(sound))
    }

    fn check_for_input(&mut self) -> Result<Option<InputEvent>, SimError> {
        if self.rng.gen::<f64>() >= self.config.input_probability {
            return Ok(None);
        }
        let (button, action) = match self.input_map.sample(&mut self.rng) {
            Some((button, action)) => (button.to_string(), action.to_string()),
            None => return Ok(None),
        };
        self.record_input(button, action).map(Some)
    }

    /// Press `button` now, as if the input step had sampled it.
    ///
    /// The action is picked from the button's binding the same way the input
    /// step picks it. The combo check still waits for the next frame, or an
    /// explicit [`check_for_combos`](Self::check_for_combos).
    pub fn press_button(&mut self, button: &str) -> Result<InputEvent, SimError> {
        let binding = self
            .input_map
            .get(button)
            .ok_or_else(|| SimError::UnknownButton(button.to_string()))?;
        let action = binding
            .choose(&mut self.rng)
            .ok_or_else(|| SimError::InvalidInputConfig(format!("button {} has no actions", button)))?
            .to_string();
        self.record_input(button.to_string(), action)
    }

    fn record_input(&mut self, button: String, action: String) -> Result<InputEvent, SimError> {
        let now = self.clock.now();
        let combo_reset = self.state.combo_buffer.push(&button, now);
        if combo_reset {
            log(LogCategory::Input, LogLevel::Debug, || {
                format!("combo window expired before {}", button)
            });
        }
        log(LogCategory::Input, LogLevel::Debug, || {
            format!(
                "frame {}: {} -> {} (buffer {:?})",
                self.state.frame_count,
                button,
                action,
                self.state.combo_buffer.entries()
            )
        });
        self.say(Style::Magenta, &format!("🎮 Input: {} - {}", button, action))?;
        Ok(InputEvent {
            button,
            action,
            combo_reset,
        })
    }

    fn update_game_state(&mut self) -> Result<Option<GameState>, SimError> {
        let Some(transition) = transition_at(self.state.frame_count) else {
            return Ok(None);
        };
        self.state.game_state = transition.state;
        log(LogCategory::Game, LogLevel::Info, || {
            format!(
                "frame {}: entering {}",
                self.state.frame_count, transition.state
            )
        });
        self.say(Style::Plain, "")?;
        self.say(transition.style, transition.narrative)?;
        self.state.player.apply_stage_bonus();
        Ok(Some(transition.state))
    }

    /// Fire a special move if the last three presses spell one.
    ///
    /// A hit awards experience and empties the combo buffer.
    pub fn check_for_combos(&mut self) -> Result<Option<String>, SimError> {
        let special_moves = &self.special_moves;
        let name = match self
            .state
            .combo_buffer
            .last_three()
            .and_then(|combo| special_moves.lookup(combo))
        {
            Some(name) => name.to_string(),
            None => return Ok(None),
        };
        log(LogCategory::Game, LogLevel::Info, || {
            format!("frame {}: special move {}", self.state.frame_count, name)
        });
        self.say(Style::Yellow, &format!("⚡ SPECIAL MOVE: {} ⚡", name))?;
        self.state.player.apply_combo_bonus();
        self.state.combo_buffer.clear();
        Ok(Some(name))
    }
}

impl<R: Rng> System for Session<R> {
    type Error = SimError;
    type Frame = FrameReport;

    /// Back to power-on state. The input map and special moves are kept.
    fn reset(&mut self) {
        self.state = EmulatorState::new(self.config.combo_timeout());
        self.running = false;
    }

    fn step_frame(&mut self) -> Result<FrameReport, SimError> {
        self.advance_frame()
    }

    fn debug_state(&self) -> Value {
        json!({
            "rom_path": self.rom_path,
            "running": self.running,
            "frame_count": self.state.frame_count,
            "game_state": self.state.game_state,
            "registers": self.state.registers,
            "player": self.state.player,
            "combo_buffer": self.state.combo_buffer.entries(),
            "rom_info": self.state.rom_info,
            "graphics_events": self.state.graphics_buffer.len(),
            "sound_events": self.state.sound_events.len(),
        })
    }
}
