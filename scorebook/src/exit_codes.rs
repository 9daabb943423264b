//! Stable exit codes for scorebook CLI commands.

/// Command succeeded; for `check`, the at-bat passed every rule.
pub const OK: i32 = 0;
/// Unreadable or malformed input, bad config, or another hard failure.
pub const INVALID: i32 = 1;
/// The at-bat was rejected: an override broke runner order or a rule was violated.
pub const REJECTED: i32 = 2;
