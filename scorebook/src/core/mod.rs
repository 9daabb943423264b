//! Deterministic, pure at-bat logic.
//!
//! Core modules must be free of I/O side effects. Every public operation is a
//! pure function of its arguments over immutable value types, so callers may
//! invoke them concurrently without coordination.

pub mod advancement;
pub mod bases;
pub mod generator;
pub mod movement;
pub mod result;
pub mod rules;
pub mod types;
pub mod validation;
