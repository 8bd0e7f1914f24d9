//! Exit codes
//!
//! Usage errors exit with 1; other failures use BSD sysexits.h values.

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (unknown command)
pub const USAGE: i32 = 1;

/// Cannot open input (bundled templates missing)
pub const NOINPUT: i32 = 66;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
