//! Colors and styles

use ratatui::style::{Color, Modifier, Style};

/// Palette for the app chrome, the calculator LCD and the lock gauge
#[derive(Clone, Debug)]
pub struct Theme {
    pub accent: Color,
    pub background: Color,
    pub highlight_bg: Color,
    pub border: Color,
    pub border_focused: Color,

    pub text: Color,
    pub text_dim: Color,
    pub text_faint: Color,

    pub ok: Color,
    pub caution: Color,
    pub alert: Color,
    pub note: Color,

    pub lcd_fg: Color,
    pub lcd_bg: Color,

    pub gauge_fill: Color,
    pub gauge_track: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(38, 198, 218),
            background: Color::Rgb(33, 33, 33),
            highlight_bg: Color::Rgb(55, 55, 55),
            border: Color::Rgb(66, 66, 66),
            border_focused: Color::Rgb(38, 198, 218),

            text: Color::Rgb(250, 250, 250),
            text_dim: Color::Rgb(189, 189, 189),
            text_faint: Color::Rgb(117, 117, 117),

            ok: Color::Rgb(76, 175, 80),
            caution: Color::Rgb(255, 152, 0),
            alert: Color::Rgb(244, 67, 54),
            note: Color::Rgb(33, 150, 243),

            // Green-on-black LCD
            lcd_fg: Color::Rgb(200, 230, 201),
            lcd_bg: Color::Rgb(27, 44, 31),

            gauge_fill: Color::Rgb(244, 67, 54),
            gauge_track: Color::Rgb(66, 66, 66),
        }
    }
}

impl Theme {
    pub fn from_config(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::default()
        }
    }

    /// Plain terminal colors for low-color or low-vision setups
    pub fn high_contrast() -> Self {
        Self {
            accent: Color::Yellow,
            background: Color::Black,
            highlight_bg: Color::DarkGray,
            border: Color::White,
            border_focused: Color::Yellow,
            text: Color::White,
            text_dim: Color::White,
            text_faint: Color::Gray,
            ok: Color::Green,
            caution: Color::Yellow,
            alert: Color::Red,
            note: Color::Cyan,
            lcd_fg: Color::White,
            lcd_bg: Color::Black,
            gauge_fill: Color::Red,
            gauge_track: Color::DarkGray,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_faint)
    }

    pub fn text_highlight(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Dialog and logo titles
    pub fn title(&self) -> Style {
        self.text_highlight()
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.ok)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.caution)
    }

    pub fn danger(&self) -> Style {
        Style::default().fg(self.alert).add_modifier(Modifier::BOLD)
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.note)
    }

    pub fn menu_item(&self, selected: bool) -> Style {
        if selected {
            self.text_highlight().bg(self.highlight_bg)
        } else {
            self.text()
        }
    }

    pub fn input(&self, focused: bool) -> Style {
        let fg = if focused { self.text } else { self.text_dim };
        Style::default().fg(fg).bg(self.background)
    }

    /// Calculator LCD; an error reading shows in the alert color
    pub fn display(&self, error: bool) -> Style {
        let fg = if error { self.alert } else { self.lcd_fg };
        Style::default()
            .fg(fg)
            .bg(self.lcd_bg)
            .add_modifier(Modifier::BOLD)
    }
}
