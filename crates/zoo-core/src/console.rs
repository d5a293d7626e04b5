//! ANSI styling for terminal output

use std::env;
use std::io::{self, IsTerminal};

/// Whether output is styled, and the styling itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    color_enabled: bool,
}

impl Console {
    /// Colors when stdout is a terminal and `NO_COLOR` is unset
    pub fn new() -> Self {
        Self::with_colors(io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none())
    }

    pub fn with_colors(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    pub fn no_colors() -> Self {
        Self::with_colors(false)
    }

    pub fn is_color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// `text` wrapped in the escape codes for `color`, or unchanged without colors
    pub fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            format!("\x1b[{}m{text}\x1b[0m", color.sgr())
        } else {
            text.to_string()
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Blue,
    Green,
    Cyan,
    Dim,
    Bold,
}

impl Color {
    /// SGR parameter of the style
    fn sgr(self) -> &'static str {
        match self {
            Color::Red => "31",
            Color::Yellow => "33",
            Color::Blue => "34",
            Color::Green => "32",
            Color::Cyan => "36",
            Color::Dim => "2",
            Color::Bold => "1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_colors_passes_text_through() {
        let console = Console::no_colors();
        assert!(!console.is_color_enabled());
        assert_eq!(console.colorize("Keeper", Color::Red), "Keeper");
    }

    #[test]
    fn test_colors_wrap_text() {
        let console = Console::with_colors(true);
        assert_eq!(console.colorize("+b", Color::Green), "\x1b[32m+b\x1b[0m");
        assert_eq!(console.colorize("@@", Color::Cyan), "\x1b[36m@@\x1b[0m");
    }
}
