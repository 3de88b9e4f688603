//! Fleetwright CLI library.
//!
//! Subcommand handlers, report rendering and terminal styling for the
//! `fleetwright-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_helpers;
