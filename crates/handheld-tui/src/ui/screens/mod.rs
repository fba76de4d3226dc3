//! Screen modules for different views

pub mod calculator;
pub mod forgot;
pub mod lockout;
pub mod login;
pub mod menu;
pub mod welcome;
