//! Calculator screen: display, indicators and keypad legend

use handheld_core::calc::format_number;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{keymap, AppState};
use crate::ui::layout::{centered_rect_fixed, section_block};
use crate::ui::Theme;

/// Footer key hints
pub const HINTS: &[(&str, &str)] = &[("Esc", "Menu"), ("Ctrl+C", "Quit")];

/// Render the calculator
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let legend_rows = keymap::LEGEND.len().div_ceil(2) as u16;
    let dialog = centered_rect_fixed(50, legend_rows + 8, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Indicators
            Constraint::Length(3), // Display
            Constraint::Min(3),    // Keypad legend
        ])
        .split(dialog);

    render_indicators(frame, chunks[0], state, theme);

    let calc = &state.calculator;
    let display = Paragraph::new(calc.display())
        .style(theme.display(calc.is_error()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_focused()),
        );
    frame.render_widget(display, chunks[1]);

    render_legend(frame, chunks[2], theme);
}

/// Memory register and pending operation above the display
fn render_indicators(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let calc = &state.calculator;

    let memory = if calc.memory() != 0.0 {
        format!(" MEM {}", format_number(calc.memory()))
    } else {
        String::new()
    };
    let pending = calc
        .pending()
        .map(|(operand, op)| format!("{} {} ", format_number(operand), op.symbol()))
        .unwrap_or_default();

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    frame.render_widget(Paragraph::new(memory).style(theme.info()), halves[0]);
    frame.render_widget(
        Paragraph::new(pending)
            .style(theme.text_secondary())
            .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_legend(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = keymap::LEGEND
        .chunks(2)
        .map(|pair| {
            let mut spans = Vec::new();
            for (binding, action) in pair {
                spans.push(Span::styled(format!(" {:>9} ", binding), theme.text_highlight()));
                spans.push(Span::styled(format!("{:<12}", action), theme.text_secondary()));
            }
            Line::from(spans)
        })
        .collect();

    let legend = Paragraph::new(lines).block(section_block("Keys", false, theme));
    frame.render_widget(legend, area);
}
