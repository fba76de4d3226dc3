//! Reusable UI components

pub mod field;
pub mod progress;
pub mod toast;
