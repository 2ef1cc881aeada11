//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Graph check found problems (e.g. `famgraph validate` with dangling edges)
pub const INVALID: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Temporary failure (e.g. layout timed out)
pub const TEMPFAIL: i32 = 75;

/// Configuration error
pub const CONFIG: i32 = 78;
