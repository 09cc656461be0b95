//! Subcommand implementations for the OurSpace CLI.

pub mod couple;
pub mod session;
