//! Lockout screen displayed when too many login attempts fail

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::ui::components::progress::LockGauge;
use crate::ui::layout::centered_rect_fixed;
use crate::ui::Theme;

/// Footer key hints
pub const HINTS: &[(&str, &str)] = &[("F2", "Forgot password"), ("Esc", "Menu")];

/// Draw the lockout screen
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    // Center the lockout dialog
    let dialog = centered_rect_fixed(48, 14, area);

    // Dialog box with danger styling
    let block = Block::default()
        .title(" Login Locked ")
        .title_style(theme.danger())
        .borders(Borders::ALL)
        .border_style(theme.danger());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Warning icon
            Constraint::Length(2), // Message
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Progress
            Constraint::Min(0),
        ])
        .split(inner);

    let icon = Paragraph::new("⚠  LOCKED  ⚠")
        .style(theme.danger())
        .alignment(Alignment::Center);
    frame.render_widget(icon, chunks[1]);

    let message = Paragraph::new("Too many failed attempts.\nLogin is disabled for now.")
        .style(theme.text())
        .alignment(Alignment::Center);
    frame.render_widget(message, chunks[2]);

    let countdown = Paragraph::new(state.login_status.to_string())
        .style(theme.warning())
        .alignment(Alignment::Center);
    frame.render_widget(countdown, chunks[3]);

    LockGauge::new(state.lock_progress, state.login_status).render(frame, chunks[5], theme);
}
