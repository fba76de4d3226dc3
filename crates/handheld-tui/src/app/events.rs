//! Event handling for the TUI
//!
//! Terminal input, redraw ticks and lockout countdown ticks all arrive on one
//! channel and are handled in order by the app loop.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent};
use futures::StreamExt;
use handheld_core::CountdownTicker;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw tick (toast expiry)
    Redraw,
    /// One second of lockout countdown
    Countdown,
}

/// Owns the event channel and the tasks feeding it
pub struct EventHandler {
    /// Sender for events
    sender: mpsc::UnboundedSender<Event>,
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Redraw tick generator
    redraw: CountdownTicker,
    /// Terminal input forwarding task
    input_task: Option<JoinHandle<()>>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(redraw_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            redraw: CountdownTicker::new(redraw_rate),
            input_task: None,
        }
    }

    /// Get a clone of the sender for other tasks to send events
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Start terminal input forwarding and redraw ticks
    pub fn start(&mut self) {
        self.spawn_input();
        self.spawn_redraw();
    }

    /// Forward crossterm events into the channel
    pub fn spawn_input(&mut self) {
        if self.input_task.is_some() {
            return;
        }

        let sender = self.sender.clone();
        self.input_task = Some(tokio::spawn(async move {
            let mut reader = EventStream::new();
            while let Some(event) = reader.next().await {
                let forwarded = match event {
                    Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                    Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("Terminal input error: {}", e);
                        break;
                    }
                };
                if sender.send(forwarded).is_err() {
                    break;
                }
            }
        }));
    }

    /// Emit periodic redraw ticks
    pub fn spawn_redraw(&mut self) {
        self.redraw.start(self.sender.clone(), || Event::Redraw);
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        if let Some(task) = self.input_task.take() {
            task.abort();
        }
    }
}
