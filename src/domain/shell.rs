//! Shell text generation
//!
//! Everything here is a pure function of its input. Keys arrive sorted from
//! [`VariableSet`], so identical input always yields identical output.
//!
//! PosixExport and DotEnv wrap every key and value in single quotes. Inside
//! single quotes a POSIX shell interprets nothing, so the only character
//! needing care is `'` itself: it becomes `'"'"'` (close the quote, emit a
//! double-quoted `'`, reopen). PamCompatible cannot nest quotes and only
//! removes newlines.

use crate::domain::{OutputDialect, VariableSet};

/// Informational line for a valid but empty variable set.
pub const NO_VARS_MESSAGE: &str = "No vars set";

/// Wrap `s` in single quotes, escaping embedded single quotes.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        if c == '\'' {
            quoted.push_str("'\"'\"'");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

fn strip_newlines(s: &str) -> String {
    s.replace('\n', "")
}

/// Render resolved variables in the requested dialect.
pub fn render(vars: &VariableSet, dialect: OutputDialect) -> String {
    match dialect {
        OutputDialect::PosixExport => render_posix_export(vars),
        OutputDialect::PamCompatible => render_pam(vars),
        OutputDialect::DotEnv => render_dotenv(vars),
    }
}

fn render_posix_export(vars: &VariableSet) -> String {
    let mut out = String::from("export");
    for (key, value) in vars.iter() {
        out.push(' ');
        out.push_str(&assignment(key, value));
    }
    out
}

fn render_pam(vars: &VariableSet) -> String {
    vars.iter()
        .map(|(key, value)| {
            format!("export {}='{}'", strip_newlines(key), strip_newlines(value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_dotenv(vars: &VariableSet) -> String {
    let mut out = String::new();
    for (key, value) in vars.iter() {
        out.push_str(&assignment(key, value));
        out.push('\n');
    }
    out
}

fn assignment(key: &str, value: &str) -> String {
    format!("{}={}", quote(key), quote(value))
}

/// `echo '<message>'`, succeeding when evaluated.
pub fn echo(message: &str) -> String {
    format!("echo {}", quote(message))
}

/// `echo 'error: <message>'; false`, failing when evaluated.
pub fn error_line(message: &str) -> String {
    format!("echo {}; false", quote(&format!("error: {message}")))
}
