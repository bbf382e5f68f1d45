//! Output formatting for CLI display
//!
//! User-facing reporting goes through this module: informational notices
//! respect the quiet flag, warnings and errors always print. Formatting
//! of cards and details lives with the terminal surfaces; this layer
//! only handles lines and status messages.

use colored::Colorize;

/// Print an informational notice unless quiet mode is active
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        println!("{message}");
    }
}

/// Print a blocking error notice to stderr
pub fn error(message: &str) {
    eprintln!("{} {message}", "error:".red().bold());
}

/// Print a warning to stderr
pub fn warn(message: &str) {
    eprintln!("{} {message}", "warning:".yellow().bold());
}

/// Format a count of places, singular or plural
#[must_use]
pub fn place_count(count: usize) -> String {
    if count == 1 {
        "1 place".to_string()
    } else {
        format!("{count} places")
    }
}
