//! "Forgot password" dialog

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::ui::components::field;
use crate::ui::layout::centered_rect_fixed;
use crate::ui::Theme;

/// Footer key hints
pub const HINTS: &[(&str, &str)] = &[("Enter", "Send reset"), ("Esc", "Back")];

/// Draw the recovery dialog
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let dialog = centered_rect_fixed(52, 11, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Reset Password ")
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
            Constraint::Length(2), // Instructions
            Constraint::Length(3), // Identifier
            Constraint::Min(0),
        ])
        .split(inner);

    let instructions = Paragraph::new("Enter your username or email to reset the login.")
        .style(theme.text_secondary())
        .wrap(Wrap { trim: true });
    frame.render_widget(instructions, chunks[1]);

    field::render(
        frame,
        chunks[2],
        "Username or email",
        &state.forgot_input,
        false,
        true,
        theme,
    );
}
