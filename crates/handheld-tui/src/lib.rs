//! Handheld TUI Library
//!
//! Terminal front end hosting the calculator and the login flow. The
//! binary in `main.rs` only sets up the terminal, logging and the runtime.

pub mod app;
pub mod ui;

pub use app::App;
