//! Login form

use handheld_core::LoginStatus;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, LoginField};
use crate::ui::components::field;
use crate::ui::layout::centered_rect_fixed;
use crate::ui::Theme;

/// Footer key hints
pub const HINTS: &[(&str, &str)] = &[
    ("Tab", "Switch field"),
    ("Enter", "Login"),
    ("F2", "Forgot password"),
    ("Esc", "Menu"),
];

/// Render the login form
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let dialog = centered_rect_fixed(48, 14, area);

    let block = Block::default()
        .title(" Sign In ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Attempts
            Constraint::Min(0),
        ])
        .split(inner);

    field::render(
        frame,
        chunks[1],
        "Username",
        &state.username,
        false,
        state.focus == LoginField::Username,
        theme,
    );
    field::render(
        frame,
        chunks[2],
        "Password",
        &state.password,
        true,
        state.focus == LoginField::Password,
        theme,
    );

    // Warn once the budget is nearly spent
    let attempts_style = match state.login_status {
        LoginStatus::Locked { .. } => theme.danger(),
        LoginStatus::Unlocked {
            attempts_remaining: 1,
        } => theme.warning(),
        LoginStatus::Unlocked { .. } => theme.text_secondary(),
    };
    let attempts = Paragraph::new(state.login_status.to_string())
        .style(attempts_style)
        .alignment(Alignment::Center);
    frame.render_widget(attempts, chunks[4]);
}
