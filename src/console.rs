//! Console reporting helpers.
//!
//! Progress and results go to stdout; warnings, diagnostics, and guidance go
//! to stderr. Styling degrades to plain text when the stream is not a
//! terminal.

use colored::Colorize;

/// Green check line on stdout.
pub(crate) fn success(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Yellow warning line on stderr.
pub(crate) fn warn(message: &str) {
    eprintln!("{} {message}", "⚠".yellow());
}

/// Red failure line on stderr.
pub(crate) fn error(message: &str) {
    eprintln!("{} {message}", "✗".red().bold());
}

/// Dimmed, indented follow-up under the preceding warning or error.
pub(crate) fn guidance(message: &str) {
    eprintln!("  {}", message.dimmed());
}

/// Red cross line on stdout: a reported state in the status listing, not a
/// diagnostic.
pub(crate) fn missing(message: &str) {
    println!("{} {message}", "✗".red());
}

/// Indented detail line on stdout.
pub(crate) fn note(message: &str) {
    println!("  {message}");
}

/// Bold section line on stdout.
pub(crate) fn heading(message: &str) {
    println!("{}", message.bold());
}
