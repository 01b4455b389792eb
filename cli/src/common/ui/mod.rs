//! # treesh UI Utilities (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Everything a command wants to show is collected into a [`Response`]: an
//! ordered list of lines, each tagged with a [`Tone`]. The REPL renders the
//! response once the command has finished, with or without ANSI colours.
//! Keeping output as data lets tests assert on what a command reported without
//! capturing stdout.
//!
//! Tone to colour mapping:
//! - `Plain`: default terminal colour
//! - `Info`: magenta (counts, section titles)
//! - `Success`: green
//! - `Error`: red
//! - `Highlight`: yellow (listing rows)
//! - `Rule`: blue (separators, prompt)
//!
use std::fmt::Write as FmtWrite;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const RESET: &str = "\x1b[0m";
/// Clears the screen and moves the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Error,
    Highlight,
    Rule,
}

impl Tone {
    fn color(self) -> Option<&'static str> {
        match self {
            Tone::Plain => None,
            Tone::Info => Some(MAGENTA),
            Tone::Success => Some(GREEN),
            Tone::Error => Some(RED),
            Tone::Highlight => Some(YELLOW),
            Tone::Rule => Some(BLUE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

/// Output of one command, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<Line>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tone: Tone, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line {
            tone,
            text: text.into(),
        });
        self
    }

    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Tone::Plain, text)
    }

    pub fn info(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Tone::Info, text)
    }

    pub fn success(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Tone::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Tone::Error, text)
    }

    pub fn highlight(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Tone::Highlight, text)
    }

    pub fn rule(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Tone::Rule, text)
    }

    /// A response consisting of a single error line.
    pub fn from_error(text: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.error(text);
        response
    }

    pub fn has_errors(&self) -> bool {
        self.lines.iter().any(|l| l.tone == Tone::Error)
    }

    /// The lines' text without tone information, one per line.
    pub fn text(&self) -> String {
        self.render(false)
    }

    /// Renders every line followed by a newline, wrapping coloured tones in ANSI
    /// codes when `color` is set.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line.tone.color().filter(|_| color) {
                Some(code) => {
                    let _ = writeln!(out, "{}{}{}", code, line.text, RESET);
                }
                None => {
                    let _ = writeln!(out, "{}", line.text);
                }
            }
        }
        out
    }
}

/// Wraps `text` in the colour of `tone` when `color` is set.
pub fn paint(text: &str, tone: Tone, color: bool) -> String {
    match tone.color().filter(|_| color) {
        Some(code) => format!("{}{}{}", code, text, RESET),
        None => text.to_string(),
    }
}
