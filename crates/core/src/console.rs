//! Output sinks for session text.
//!
//! The session never writes to a terminal directly. It hands each line and a
//! [`Style`] to a [`Console`], and the frontend decides whether that becomes
//! ANSI color, plain text, or an in-memory transcript.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Presentation hint attached to a line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Cyan,
    Green,
    Yellow,
    Blue,
    Magenta,
    Red,
}

impl Style {
    /// ANSI SGR foreground code for this style
    fn ansi_code(self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Red => Some("31"),
            Style::Green => Some("32"),
            Style::Yellow => Some("33"),
            Style::Blue => Some("34"),
            Style::Magenta => Some("35"),
            Style::Cyan => Some("36"),
        }
    }
}

/// A line-oriented text sink
pub trait Console {
    /// Write one line of text.
    fn emit(&mut self, style: Style, text: &str) -> io::Result<()>;
}

/// Writes lines to any `Write`, optionally wrapped in ANSI color escapes
pub struct TerminalConsole<W: Write> {
    out: W,
    color: bool,
}

impl TerminalConsole<io::Stdout> {
    /// Colored output on stdout
    pub fn ansi() -> Self {
        Self::new(io::stdout(), true)
    }

    /// Uncolored output on stdout
    pub fn plain() -> Self {
        Self::new(io::stdout(), false)
    }
}

impl<W: Write> TerminalConsole<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn emit(&mut self, style: Style, text: &str) -> io::Result<()> {
        match style.ansi_code() {
            Some(code) if self.color => writeln!(self.out, "\x1b[{}m{}\x1b[0m", code, text)?,
            _ => writeln!(self.out, "{}", text)?,
        }
        self.out.flush()
    }
}

/// Captures lines in memory. Clones share the same transcript.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Rc<RefCell<Vec<(Style, String)>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(_, l)| l.clone()).collect()
    }

    /// Lines written with the given style
    pub fn lines_with_style(&self, style: Style) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(s, _)| *s == style)
            .map(|(_, l)| l.clone())
            .collect()
    }

    /// Whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, l)| l.contains(needle))
    }
}

impl Console for MemoryConsole {
    fn emit(&mut self, style: Style, text: &str) -> io::Result<()> {
        self.lines.borrow_mut().push((style, text.to_string()));
        Ok(())
    }
}
