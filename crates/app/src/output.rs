//! Terminal output formatting for the nomen CLI.
//!
//! Results go to stdout; diagnostics go to stderr so results can be piped.

use console::style;
use serde::Serialize;

/// Print a result value on its own line.
pub fn print_value(value: &str) {
    println!("{value}");
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a bold cyan header.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold().cyan());
}

/// Print a warning prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    eprintln!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}
