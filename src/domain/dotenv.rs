//! Local developer `.env` file parsing

use std::collections::BTreeMap;

/// Name of the local developer file consulted for `ENVKEY`.
pub const LOCAL_ENV_FILE: &str = ".env";

/// Variable holding the credential, in the process env or the local file.
pub const ENVKEY_VAR: &str = "ENVKEY";

/// Variables declared in a local `.env` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnvFile {
    pub variables: BTreeMap<String, String>,
}

impl DotEnvFile {
    /// Parse `.env` content.
    ///
    /// Accepts `KEY=value` and `export KEY=value`. Blank lines and `#`
    /// comments are skipped; later declarations replace earlier ones.
    pub fn parse(content: &str) -> Self {
        let mut variables = BTreeMap::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let rest = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            if let Some((key, value)) = parse_env_line(rest) {
                variables.insert(key.to_string(), value);
            }
        }

        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// Split `KEY=value`, dropping a trailing comment and surrounding quotes.
fn parse_env_line(line: &str) -> Option<(&str, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = strip_quotes(strip_trailing_comment(value));
    Some((key, value))
}

/// `'val#ue'  # comment` → `'val#ue'`
fn strip_trailing_comment(s: &str) -> &str {
    let s = s.trim();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for (i, b) in s.bytes().enumerate() {
        match b {
            b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
            b'"' if !in_single_quote => in_double_quote = !in_double_quote,
            b'#' if !in_single_quote && !in_double_quote => return s[..i].trim_end(),
            _ => {}
        }
    }
    s
}

fn strip_quotes(s: &str) -> String {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
