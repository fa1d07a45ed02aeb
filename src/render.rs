//! Output rendering for the chat binaries.
//!
//! This module provides a small renderer trait and a plain-text
//! implementation with optional ANSI styling. Keeping the trait separate from
//! the session lets the binaries decide how replies, notices, and errors are
//! presented.

use std::io::{self, Write};

/// ANSI escape code for dim text (used for informational notices).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, unstyled text for piping, or a TUI.
pub trait Renderer: Send {
    /// Print an assistant reply.
    fn print_assistant(&mut self, text: &str);

    /// Print an informational notice.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Renderer that writes plain text to stdout/stderr.
pub struct PlainTextRenderer {
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a renderer with ANSI styling enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a renderer with ANSI styling set explicitly.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_assistant(&mut self, text: &str) {
        println!("{text}");
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        if self.use_color {
            println!("{ANSI_DIM}{info}{ANSI_RESET}");
        } else {
            println!("{info}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
