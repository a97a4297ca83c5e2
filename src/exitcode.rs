//! Process exit codes, taken from BSD `sysexits.h`

/// Bad command line: missing command, empty `--drop` key
pub const USAGE: i32 = 64;

/// Record file parsed but its content is unusable (bad record, cycle,
/// duplicate key, depth limit)
pub const DATAERR: i32 = 65;

/// Record file missing or unreadable
pub const NOINPUT: i32 = 66;

/// Settings could not be loaded or failed validation
pub const CONFIG: i32 = 78;
