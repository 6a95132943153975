//! Process exit codes, a subset of BSD sysexits.h
//!
//! A rendered outcome, including an `echo 'error: ...'; false` line, exits
//! with `OK`. The others are only used when the CLI fails before rendering.

pub const OK: i32 = 0;

/// Bad flag values, e.g. `--timeout 0`
pub const USAGE: i32 = 64;

/// Unreadable `.env` or working directory
pub const IOERR: i32 = 74;

/// Missing or invalid config file, bad `ENVKEY_SOURCE_*` value
pub const CONFIG: i32 = 78;
