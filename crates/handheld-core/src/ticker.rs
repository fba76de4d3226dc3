//! Cancellable periodic ticker driving the lockout countdown
//!
//! The ticker is owned by whichever screen shows the countdown. It runs a
//! tokio task that sends one event per period into the owner's channel until
//! [`CountdownTicker::stop`] is called or the ticker is dropped, so a torn
//! down screen never receives ticks.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Countdown period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic ticker with explicit start/stop
#[derive(Debug)]
pub struct CountdownTicker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Default for CountdownTicker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl CountdownTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Start ticking into `sender`. The first tick fires immediately.
    ///
    /// Starting an already running ticker is a no-op. Must be called from
    /// within a tokio runtime.
    pub fn start<E, F>(&mut self, sender: mpsc::UnboundedSender<E>, make_event: F)
    where
        E: Send + 'static,
        F: Fn() -> E + Send + 'static,
    {
        if self.is_running() {
            return;
        }

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(make_event()).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!("countdown ticker started");
    }

    /// Stop ticking. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("countdown ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_stopped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = CountdownTicker::default();

        ticker.start(tx, || 1u8);
        assert!(ticker.is_running());

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(1));

        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = CountdownTicker::new(Duration::from_millis(500));

        ticker.start(tx.clone(), || "a");
        ticker.start(tx, || "b");

        assert_eq!(rx.recv().await, Some("a"));
        assert_eq!(rx.recv().await, Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut ticker = CountdownTicker::default();
            ticker.start(tx, || ());
            assert_eq!(rx.recv().await, Some(()));
        }
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_when_idle() {
        let mut ticker = CountdownTicker::default();
        ticker.stop();
        assert!(!ticker.is_running());
    }
}
