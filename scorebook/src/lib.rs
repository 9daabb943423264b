//! At-bat outcome and validation engine for baseball/softball scorekeeping.
//!
//! Given a batting result and the current base occupancy, the crate
//! enumerates the baserunner movements the rules permit, computes the
//! recorded outcome (optionally with scorekeeper overrides) and rejects
//! before/after transitions that break the sport's invariants.
//!
//! - **[`core`]**: Pure, deterministic logic (bases, results, generator,
//!   advancement, validation rules). No I/O, no logging.
//! - **[`io`]**: Side-effecting helpers (config and at-bat files).
//!
//! Orchestration modules ([`outcomes`], [`record`], [`check`]) coordinate
//! core logic with I/O to implement CLI commands.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod outcomes;
pub mod record;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
