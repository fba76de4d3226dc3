//! Single-line text input field

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::layout::section_block;
use crate::ui::Theme;

/// Character shown in place of each masked character
const MASK: char = '•';

/// Render a bordered input with the caret shown when focused
pub fn render(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    masked: bool,
    focused: bool,
    theme: &Theme,
) {
    let block = section_block(label, focused, theme);

    let mut text = if masked {
        MASK.to_string().repeat(value.chars().count())
    } else {
        value.to_string()
    };
    if focused {
        text.push('▏');
    }

    let field = Paragraph::new(text).style(theme.input(focused)).block(block);
    frame.render_widget(field, area);
}
