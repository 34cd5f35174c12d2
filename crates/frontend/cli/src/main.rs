use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vibe_core::clock::{Clock, SystemClock, VirtualClock};
use vibe_core::console::{Console, TerminalConsole};
use vibe_core::logging::{LogCategory, LogConfig, LogLevel};
use vibe_core::System;
use vibe_n64::{InputMap, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "vibe64", about = "Plays a session of Super Vibe 64 in the terminal")]
struct Args {
    /// ROM to "load" (the file is never opened)
    #[arg(default_value = "super_vibe_64.z64")]
    rom: String,

    /// Seed for the random source; omit for a different session every time
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to play
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frames per second used for pacing
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Don't sleep: run the whole session as fast as possible
    #[arg(long, default_value_t = false)]
    turbo: bool,

    /// Plain text output without ANSI colors
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Button map as a JSON object, e.g. '{"A": ["jump"], "START": "pause"}'
    #[arg(long)]
    input_config: Option<String>,

    /// Print a JSON snapshot of the session after the outro
    #[arg(long, default_value_t = false)]
    dump_state: bool,

    /// Global diagnostic log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "off")]
    log_level: String,

    /// Diagnostic log level for CPU activity
    #[arg(long)]
    log_cpu: Option<String>,

    /// Diagnostic log level for scene picks
    #[arg(long)]
    log_video: Option<String>,

    /// Diagnostic log level for sound picks
    #[arg(long)]
    log_audio: Option<String>,

    /// Diagnostic log level for button presses and the combo buffer
    #[arg(long)]
    log_input: Option<String>,

    /// Diagnostic log level for stages and special moves
    #[arg(long)]
    log_game: Option<String>,
}

fn parse_level(s: &str) -> Result<LogLevel> {
    LogLevel::from_str(s).with_context(|| format!("Unknown log level: {}", s))
}

fn configure_logging(args: &Args) -> Result<()> {
    let config = LogConfig::global();
    config.set_global_level(parse_level(&args.log_level)?);

    let overrides = [
        (LogCategory::CPU, &args.log_cpu),
        (LogCategory::Video, &args.log_video),
        (LogCategory::Audio, &args.log_audio),
        (LogCategory::Input, &args.log_input),
        (LogCategory::Game, &args.log_game),
    ];
    for (category, level) in overrides {
        if let Some(level) = level {
            config.set_level(category, parse_level(level)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    configure_logging(&args)?;

    let input = args
        .input_config
        .as_deref()
        .map(InputMap::from_json)
        .transpose()?;

    let config = SessionConfig {
        fps: args.fps,
        max_frames: args.frames,
        ..SessionConfig::default()
    };

    let rng = match args.seed {
        Some(seed) => {
            log::info!("Seeding session with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let console: Box<dyn Console> = if args.no_color {
        Box::new(TerminalConsole::plain())
    } else {
        Box::new(TerminalConsole::ansi())
    };
    let clock: Box<dyn Clock> = if args.turbo {
        Box::new(VirtualClock::new())
    } else {
        Box::new(SystemClock::new())
    };

    let mut session = Session::new(args.rom.clone(), input, rng)?
        .with_config(config)?
        .with_console(console)
        .with_clock(clock);

    log::debug!("Playing {} for {} frames at {} fps", args.rom, args.frames, args.fps);
    session.show_welcome()?;

    match session.run() {
        Ok(summary) => {
            log::info!(
                "Session finished after {} frames in {} (experience {})",
                summary.frames,
                summary.game_state,
                summary.experience
            );
            if let Some(reason) = summary.aborted {
                log::warn!("Frame loop stopped early: {}", reason);
            }
        }
        // Already reported on the console; nothing else to run.
        Err(e) => log::error!("{}", e),
    }

    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(&session.debug_state())?);
    }

    Ok(())
}
