//! I/O helpers for scorebook commands.

pub mod at_bat_file;
pub mod config;
