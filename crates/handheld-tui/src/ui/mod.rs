//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
mod theme;

pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::{AppState, Screen};
use layout::ScreenLayout;

/// Main render function - delegates to appropriate screen
pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let layout = ScreenLayout::new(frame.area());

    layout::render_header(frame, layout.header, state, theme);

    let hints = match state.current_screen {
        Screen::Menu => {
            screens::menu::render(frame, layout.content, state, theme);
            screens::menu::HINTS
        }
        Screen::Calculator => {
            screens::calculator::render(frame, layout.content, state, theme);
            screens::calculator::HINTS
        }
        Screen::Login => {
            screens::login::render(frame, layout.content, state, theme);
            screens::login::HINTS
        }
        Screen::Locked => {
            screens::lockout::render(frame, layout.content, state, theme);
            screens::lockout::HINTS
        }
        Screen::Forgot => {
            screens::forgot::render(frame, layout.content, state, theme);
            screens::forgot::HINTS
        }
        Screen::Welcome => {
            screens::welcome::render(frame, layout.content, state, theme);
            screens::welcome::HINTS
        }
    };

    layout::render_footer(frame, layout.footer, hints, theme);

    // Toasts draw over the content
    state.toasts.render(frame, layout.content, theme);
}
