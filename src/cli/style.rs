//! Terminal styling for CLI output
//!
//! Colors are stripped by `anstream` when stdout is not a terminal.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in summaries
pub const CHECK: &str = "✓";

/// Semantic styles for CLI text
pub trait Stylize {
    /// De-emphasized detail
    fn muted(&self) -> String;
    /// Names and values worth spotting
    fn accent(&self) -> String;
    /// Completed successfully
    fn success(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
}

impl<T: Display + ?Sized> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }
}
