//! Output formatting utilities

use colored::*;
use serde::Serialize;

use crate::error::CliResult;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a key/value detail line
pub fn print_field(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.dimmed(), value);
}
