//! Transient toast messages
//!
//! One toast is on screen at a time; a newer one replaces it. Lifetimes are
//! counted in redraw ticks.

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::REDRAW_RATE;
use crate::ui::Theme;

/// How long a toast stays up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLength {
    Short,
    Long,
}

impl ToastLength {
    fn duration(self) -> Duration {
        match self {
            ToastLength::Short => Duration::from_millis(2_000),
            ToastLength::Long => Duration::from_millis(3_500),
        }
    }

    fn ticks(self) -> u32 {
        let rate = REDRAW_RATE.as_millis().max(1);
        (self.duration().as_millis() / rate) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    ticks_left: u32,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, length: ToastLength) -> Self {
        Self {
            message: message.into(),
            kind,
            ticks_left: length.ticks(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info, ToastLength::Short)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success, ToastLength::Short)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning, ToastLength::Short)
    }

    /// Errors stay up longer
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error, ToastLength::Long)
    }

    fn style(&self, theme: &Theme) -> Style {
        match self.kind {
            ToastKind::Info => theme.info(),
            ToastKind::Success => theme.success(),
            ToastKind::Warning => theme.warning(),
            ToastKind::Error => theme.danger(),
        }
    }

    fn icon(&self) -> char {
        match self.kind {
            ToastKind::Info => 'ℹ',
            ToastKind::Success => '✓',
            ToastKind::Warning => '⚠',
            ToastKind::Error => '✗',
        }
    }
}

/// The toast currently on screen
#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    /// Count one redraw tick and drop the toast once its time is up
    pub fn tick(&mut self) {
        if let Some(toast) = &mut self.current {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Draw the toast centered near the bottom of `area`
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(toast) = &self.current else {
            return;
        };

        let width = ((toast.message.chars().count() + 6) as u16).min(area.width);
        let height = 3.min(area.height);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height + 1);
        let toast_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, toast_area);

        let style = toast.style(theme);
        let content = Paragraph::new(format!("{} {}", toast.icon(), toast.message))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(content, toast_area);
    }
}
