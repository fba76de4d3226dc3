//! Screen frame: header, content area and key-hint footer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;
use crate::app::AppState;

/// Rows taken by the header and footer bars
const BAR_HEIGHT: u16 = 2;

/// Header, content and footer areas of one frame
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(BAR_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(BAR_HEIGHT),
        ])
        .areas(area);

        Self {
            header,
            content,
            footer,
        }
    }
}

/// Fixed-size dialog centered in `area`, shrunk to fit small terminals
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Logo, breadcrumb and a right-hand badge
///
/// The badge shows the lock while one is active, the signed-in user after a
/// successful login, and the time otherwise.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(Style::default().bg(theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [logo_area, crumb_area, badge_area] = Layout::horizontal([
        Constraint::Length(14),
        Constraint::Min(10),
        Constraint::Length(16),
    ])
    .areas(inner);

    let logo = Paragraph::new(" \u{25A3} HANDHELD").style(theme.title());
    frame.render_widget(logo, logo_area);

    let crumb = Paragraph::new(state.current_screen.title())
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(crumb, crumb_area);

    let (badge, style) = if state.login_status.is_locked() {
        ("LOCKED ".to_string(), theme.danger())
    } else if let Some(session) = &state.session {
        (format!("{} ", session.username), theme.success())
    } else {
        (chrono::Local::now().format("%H:%M ").to_string(), theme.text_muted())
    };
    let badge = Paragraph::new(badge)
        .style(style)
        .alignment(Alignment::Right);
    frame.render_widget(badge, badge_area);
}

/// Key hints for the current screen
pub fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.text_muted()));
        }
        spans.push(Span::styled(format!("[{}] ", key), theme.text_highlight()));
        spans.push(Span::styled(*action, theme.text_muted()));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, inner);
}

/// Titled border, highlighted when it has focus
pub fn section_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };

    Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.text_highlight())
        .borders(Borders::ALL)
        .border_style(border)
}
