//! Welcome screen shown after a successful login

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::ui::layout::{centered_rect_fixed, section_block};
use crate::ui::Theme;

/// Footer key hints
pub const HINTS: &[(&str, &str)] = &[("Enter", "Log out"), ("q", "Quit")];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let dialog = centered_rect_fixed(44, 7, area);

    let greeting = state
        .session
        .as_ref()
        .map(|session| session.greeting())
        .unwrap_or_default();

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(greeting, theme.success())),
        Line::from(""),
        Line::from(Span::styled("You are signed in.", theme.text_secondary())),
    ];

    let welcome = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(section_block("Welcome", true, theme));
    frame.render_widget(welcome, dialog);
}
