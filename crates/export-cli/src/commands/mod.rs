//! Subcommand implementations.
//!
//! Each command reads its inputs, does its work and prints a report in the
//! requested output format.

pub mod completions;
pub mod generate;
pub mod inspect;
