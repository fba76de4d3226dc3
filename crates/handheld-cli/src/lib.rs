//! Handheld CLI - script the calculator and login flow
//!
//! The same commands the binary runs, exposed so they can be driven
//! against an in-memory store in tests.

pub mod commands;

pub use commands::{run, Cli, Commands, LoginCommands};
