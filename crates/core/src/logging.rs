//! Centralized diagnostic logging for the simulator.
//!
//! Flavor text goes to the [`Console`](crate::console::Console); this module is
//! for diagnostics about what the session is doing underneath it. Everything is
//! off by default and is switched on from the command line.
//!
//! # Architecture
//!
//! - **LogConfig**: Thread-safe global configuration using atomic operations
//! - **LogLevel**: Hierarchical log levels (Off < Error < Warn < Info < Debug < Trace)
//! - **LogCategory**: Subsystem the message is about (CPU, Video, Audio, Input, Game)
//! - **log()**: Common logging function, writes to stderr
//!
//! # Usage
//!
//! ```rust
//! use vibe_core::logging::{log, LogLevel, LogCategory};
//!
//! // Log with lazy evaluation (zero cost when disabled)
//! log(LogCategory::CPU, LogLevel::Debug, || {
//!     format!("CPU: skipped DIV at frame {}", 30)
//! });
//! ```

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

const CATEGORY_COUNT: usize = 5;

/// Log level for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Parse log level from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "err" | "1" => Some(LogLevel::Error),
            "warn" | "warning" | "2" => Some(LogLevel::Warn),
            "info" | "3" => Some(LogLevel::Info),
            "debug" | "4" => Some(LogLevel::Debug),
            "trace" | "5" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Off,
        }
    }
}

/// Log category for the parts of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    /// Register arithmetic
    CPU,
    /// Scene selection
    Video,
    /// Sound selection
    Audio,
    /// Button sampling and the combo buffer
    Input,
    /// Stage transitions, special moves, session lifecycle
    Game,
}

impl LogCategory {
    fn index(self) -> usize {
        match self {
            LogCategory::CPU => 0,
            LogCategory::Video => 1,
            LogCategory::Audio => 2,
            LogCategory::Input => 3,
            LogCategory::Game => 4,
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding the lock leaves plain counters behind, still usable.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Per-category budget for the current one-second window
#[derive(Debug, Clone, Copy, Default)]
struct Budget {
    opened: Option<Instant>,
    written: usize,
    suppressed: usize,
}

/// Caps how many lines each category writes per second.
///
/// Windows are fixed: the first line after a window ends opens the next one.
/// Lines past the cap are counted, and the count is handed back with the first
/// line of the following window so it can be reported once.
struct RateLimiter {
    per_second: AtomicUsize,
    budgets: Mutex<[Budget; CATEGORY_COUNT]>,
}

impl RateLimiter {
    const WINDOW: Duration = Duration::from_secs(1);

    fn new(per_second: usize) -> Self {
        Self {
            per_second: AtomicUsize::new(per_second),
            budgets: Mutex::new([Budget::default(); CATEGORY_COUNT]),
        }
    }

    fn set_per_second(&self, max: usize) {
        self.per_second.store(max, Ordering::Relaxed);
    }

    fn per_second(&self) -> usize {
        self.per_second.load(Ordering::Relaxed)
    }

    /// `None` when the line must be dropped, otherwise the number of lines
    /// suppressed in the previous window.
    fn admit(&self, category: LogCategory, now: Instant) -> Option<usize> {
        let cap = self.per_second();
        let mut budgets = lock(&self.budgets);
        let budget = &mut budgets[category.index()];

        let expired = budget
            .opened
            .map_or(true, |opened| now.duration_since(opened) >= Self::WINDOW);
        if expired {
            budget.opened = Some(now);
            budget.written = 0;
        }

        // Overflow only accrues once a window is full, so the first line
        // admitted afterwards carries the whole count
        if budget.written < cap {
            budget.written += 1;
            Some(std::mem::take(&mut budget.suppressed))
        } else {
            budget.suppressed += 1;
            None
        }
    }
}

/// Global logging configuration
pub struct LogConfig {
    global_level: AtomicU8,
    /// Per-category overrides, indexed by `LogCategory::index`
    category_levels: [AtomicU8; CATEGORY_COUNT],
    rate_limiter: RateLimiter,
}

impl LogConfig {
    /// Create a new LogConfig with all logging disabled and default rate limit (60 logs/second)
    fn new() -> Self {
        Self {
            global_level: AtomicU8::new(LogLevel::Off as u8),
            category_levels: Default::default(),
            rate_limiter: RateLimiter::new(60),
        }
    }

    /// Get the global singleton instance
    pub fn global() -> &'static Self {
        use std::sync::OnceLock;
        static INSTANCE: OnceLock<LogConfig> = OnceLock::new();
        INSTANCE.get_or_init(LogConfig::new)
    }

    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    /// Set log level for a specific category
    pub fn set_level(&self, category: LogCategory, level: LogLevel) {
        self.category_levels[category.index()].store(level as u8, Ordering::Relaxed);
    }

    /// Get log level for a specific category
    pub fn get_level(&self, category: LogCategory) -> LogLevel {
        LogLevel::from_u8(self.category_levels[category.index()].load(Ordering::Relaxed))
    }

    /// Check if a message should be logged for the given category and level
    ///
    /// A category-specific level wins when set; otherwise the global level applies.
    pub fn should_log(&self, category: LogCategory, level: LogLevel) -> bool {
        let category_level = self.get_level(category);
        if category_level != LogLevel::Off {
            level <= category_level
        } else {
            level <= self.get_global_level()
        }
    }

    /// Reset all logging to Off
    pub fn reset(&self) {
        self.set_global_level(LogLevel::Off);
        for level in &self.category_levels {
            level.store(LogLevel::Off as u8, Ordering::Relaxed);
        }
    }

    /// Set the maximum logs per second per category
    pub fn set_rate_limit(&self, max_logs_per_second: usize) {
        self.rate_limiter.set_per_second(max_logs_per_second);
    }

    pub fn get_rate_limit(&self) -> usize {
        self.rate_limiter.per_second()
    }
}

/// Log a message with the specified category and level
///
/// The message is lazily evaluated via a closure, so formatting only occurs
/// when logging is enabled for the given category and level.
///
/// # Rate Limiting
///
/// At most 60 messages per second per category are written by default.
/// Anything over that is dropped, and the next window starts with one line
/// saying how many were lost.
pub fn log<F>(category: LogCategory, level: LogLevel, message_fn: F)
where
    F: FnOnce() -> String,
{
    let config = LogConfig::global();
    if !config.should_log(category, level) {
        return;
    }
    let Some(suppressed) = config.rate_limiter.admit(category, Instant::now()) else {
        return;
    };
    if suppressed > 0 {
        eprintln!("[{:?}] ({} earlier line(s) suppressed)", category, suppressed);
    }
    eprintln!("[{:?}] {}", category, message_fn());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("off"), Some(LogLevel::Off));
        assert_eq!(LogLevel::from_str("OFF"), Some(LogLevel::Off));
        assert_eq!(LogLevel::from_str("ERR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("3"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("Debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str("loud"), None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Off < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn test_category_level_overrides_global() {
        let config = LogConfig::new();
        config.set_global_level(LogLevel::Error);
        config.set_level(LogCategory::Input, LogLevel::Debug);

        assert!(config.should_log(LogCategory::Input, LogLevel::Debug));
        assert!(!config.should_log(LogCategory::Input, LogLevel::Trace));

        // Game falls back to the global level
        assert!(!config.should_log(LogCategory::Game, LogLevel::Warn));
        assert!(config.should_log(LogCategory::Game, LogLevel::Error));
    }

    #[test]
    fn test_everything_off_by_default() {
        let config = LogConfig::new();
        assert_eq!(config.get_global_level(), LogLevel::Off);
        for category in [
            LogCategory::CPU,
            LogCategory::Video,
            LogCategory::Audio,
            LogCategory::Input,
            LogCategory::Game,
        ] {
            assert!(!config.should_log(category, LogLevel::Error));
        }
    }

    #[test]
    fn test_reset() {
        let config = LogConfig::new();
        config.set_global_level(LogLevel::Trace);
        config.set_level(LogCategory::CPU, LogLevel::Debug);
        config.set_rate_limit(10);

        config.reset();

        assert_eq!(config.get_global_level(), LogLevel::Off);
        assert_eq!(config.get_level(LogCategory::CPU), LogLevel::Off);
        // Rate limit is not a level and survives a reset
        assert_eq!(config.get_rate_limit(), 10);
    }

    #[test]
    fn test_rate_limiter_caps_each_window() {
        let limiter = RateLimiter::new(3);
        let t0 = Instant::now();

        for _ in 0..3 {
            assert_eq!(limiter.admit(LogCategory::CPU, t0), Some(0));
        }
        assert_eq!(limiter.admit(LogCategory::CPU, t0), None);
        assert_eq!(limiter.admit(LogCategory::CPU, t0 + Duration::from_millis(999)), None);

        // Other categories keep their own budget
        assert_eq!(limiter.admit(LogCategory::Audio, t0), Some(0));
    }

    #[test]
    fn test_rate_limiter_reports_suppressed_once() {
        let limiter = RateLimiter::new(2);
        let t0 = Instant::now();

        for _ in 0..12 {
            limiter.admit(LogCategory::Input, t0);
        }

        let next = t0 + Duration::from_secs(1);
        assert_eq!(limiter.admit(LogCategory::Input, next), Some(10));
        assert_eq!(limiter.admit(LogCategory::Input, next), Some(0));
    }

    #[test]
    fn test_zero_rate_limit_drops_everything() {
        let limiter = RateLimiter::new(0);
        assert_eq!(limiter.admit(LogCategory::Game, Instant::now()), None);
    }
}
