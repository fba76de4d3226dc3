//! Lock countdown gauge

use handheld_core::LoginStatus;
use ratatui::prelude::*;
use ratatui::widgets::Gauge;

use crate::ui::Theme;

/// Gauge that fills as the lock is served
pub struct LockGauge {
    /// Fraction of the lock already served, 0.0 - 1.0
    served: f64,
    status: LoginStatus,
}

impl LockGauge {
    pub fn new(served: f64, status: LoginStatus) -> Self {
        Self {
            served: served.clamp(0.0, 1.0),
            status,
        }
    }

    fn label(&self) -> String {
        match self.status {
            LoginStatus::Locked { remaining_secs } => format!("{}s remaining", remaining_secs),
            LoginStatus::Unlocked { .. } => "unlocked".to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let filled = if self.status.is_locked() {
            theme.gauge_fill
        } else {
            theme.ok
        };

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(filled).bg(theme.gauge_track))
            .ratio(self.served)
            .label(self.label());

        frame.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_follows_status() {
        let gauge = LockGauge::new(0.4, LoginStatus::Locked { remaining_secs: 6 });
        assert_eq!(gauge.label(), "6s remaining");

        let gauge = LockGauge::new(1.0, LoginStatus::Unlocked {
            attempts_remaining: 3,
        });
        assert_eq!(gauge.label(), "unlocked");
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(LockGauge::new(1.7, LoginStatus::Locked { remaining_secs: 1 }).served, 1.0);
        assert_eq!(LockGauge::new(-0.2, LoginStatus::Locked { remaining_secs: 9 }).served, 0.0);
    }
}
