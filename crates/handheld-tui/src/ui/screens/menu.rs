//! Menu screen - choose an app

use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

use crate::app::{AppState, MENU_ITEMS};
use crate::ui::layout::{centered_rect_fixed, section_block};
use crate::ui::Theme;

/// Footer key hints
pub const HINTS: &[(&str, &str)] = &[
    ("↑↓", "Select"),
    ("Enter", "Open"),
    ("c", "Calculator"),
    ("l", "Login"),
    ("q", "Quit"),
];

/// Render the menu
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let dialog = centered_rect_fixed(52, (MENU_ITEMS.len() * 2 + 4) as u16, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(dialog);

    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (label, description))| {
            let selected = i == state.menu_index;
            let marker = if selected { "▶" } else { " " };
            ListItem::new(vec![
                Line::from(format!(" {} {}", marker, label)),
                Line::from(format!("     {}", description)).style(theme.text_muted()),
            ])
            .style(theme.menu_item(selected))
        })
        .collect();

    let menu = List::new(items).block(section_block("Main Menu", true, theme));
    frame.render_widget(menu, chunks[0]);

    // Persisted lock is visible before entering the login flow
    let status_style = if state.login_status.is_locked() {
        theme.warning()
    } else {
        theme.text_secondary()
    };
    let status = Paragraph::new(state.login_status.to_string())
        .style(status_style)
        .alignment(Alignment::Center);
    frame.render_widget(status, chunks[1]);
}
