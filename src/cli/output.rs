//! Terminal output
//!
//! Stdout carries only text meant for `eval`; anything for humans goes to
//! stderr. Colors respect NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print text for the calling shell to evaluate (stdout, no color)
pub fn script(text: &str) {
    println!("{}", text);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print informational note (cyan) to stderr
pub fn note(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", msg.to_string().cyan());
}
