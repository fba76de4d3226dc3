//! Application state and event handling

mod events;
pub mod keymap;
mod state;

pub use events::{Event, EventHandler};
pub use state::{push_char, AppState, LoginField, Screen, MAX_INPUT_LEN, MENU_ITEMS};

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use handheld_core::{
    Clock, Config, ControlEffect, CountdownTicker, FileStore, KeyValueStore, LoginController,
    LoginError, RecoveryOutcome, SubmitOutcome, SystemClock, PREFS_NAMESPACE,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::ui::components::toast::{Toast, ToastKind, ToastLength};
use crate::ui::{self, Theme};

/// Redraw rate for toast expiry and the header clock
pub const REDRAW_RATE: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App<S: KeyValueStore = FileStore, C: Clock = SystemClock> {
    /// Application state
    pub state: AppState,

    /// Visual theme
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Persisted login flow
    login: LoginController<S, C>,

    /// One-second lockout countdown, running only while locked
    countdown: CountdownTicker,

    /// Channel the countdown ticks into
    sender: mpsc::UnboundedSender<Event>,
}

impl App {
    /// Open the persisted login state described by `config`
    pub fn from_config(config: &Config, sender: mpsc::UnboundedSender<Event>) -> Result<Self> {
        let dir = config.resolve_data_dir()?;
        let store = FileStore::open(&dir, PREFS_NAMESPACE)?;
        tracing::info!("Using login store {:?}", store.path());

        let login = LoginController::new(store, config.lockout_policy());
        Ok(Self::new(login, Theme::from_config(config.high_contrast), sender))
    }
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    /// Create a new application instance
    ///
    /// A lock loaded from storage starts the countdown right away, so this
    /// must run inside a tokio runtime.
    pub fn new(
        login: LoginController<S, C>,
        theme: Theme,
        sender: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let state = AppState::new(login.last_username(), login.status());
        let mut app = Self {
            state,
            theme,
            should_quit: false,
            login,
            countdown: CountdownTicker::default(),
            sender,
        };
        if app.login.needs_ticker() {
            app.start_countdown();
        }
        app
    }

    pub fn login(&self) -> &LoginController<S, C> {
        &self.login
    }

    /// Whether the lockout countdown ticker is running
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_running()
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state, &self.theme))?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        self.countdown.stop();
        Ok(())
    }

    /// Handle one event from the channel
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) | Event::Resize(..) => {}
            Event::Redraw => {
                self.state.toasts.tick();
                if self.login.needs_ticker() {
                    self.advance_lock();
                } else {
                    self.refresh_login_view();
                }
            }
            Event::Countdown => self.advance_lock(),
        }
    }

    /// Handle key press events
    fn handle_key(&mut self, key: KeyEvent) {
        // Global quit handler
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // Delegate to screen-specific handlers
        match self.state.current_screen {
            Screen::Menu => self.handle_menu_key(key.code),
            Screen::Calculator => self.handle_calculator_key(key),
            Screen::Login => self.handle_login_key(key.code),
            Screen::Locked => self.handle_locked_key(key.code),
            Screen::Forgot => self.handle_forgot_key(key.code),
            Screen::Welcome => self.handle_welcome_key(key.code),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.menu_index = self.state.menu_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.menu_index < MENU_ITEMS.len() - 1 {
                    self.state.menu_index += 1;
                }
            }
            KeyCode::Enter => match self.state.menu_index {
                0 => self.state.current_screen = Screen::Calculator,
                1 => self.open_login(),
                _ => self.quit(),
            },
            KeyCode::Char('c') => self.state.current_screen = Screen::Calculator,
            KeyCode::Char('l') => self.open_login(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_calculator_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.current_screen = Screen::Menu;
            return;
        }
        if let Some(calc_key) = keymap::calculator_key(&key) {
            self.state.calculator.press(calc_key);
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.leave_login_flow(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.state.focus = self.state.focus.toggle();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::F(2) => self.open_forgot(),
            KeyCode::Backspace => {
                self.state.focused_input().pop();
            }
            KeyCode::Char(c) => push_char(self.state.focused_input(), c),
            _ => {}
        }
    }

    fn handle_locked_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.leave_login_flow(),
            KeyCode::F(2) => self.open_forgot(),
            // The control is disabled; submitting only reports the lock
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn handle_forgot_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.return_to_login(),
            KeyCode::Enter => self.recover(),
            KeyCode::Backspace => {
                self.state.forgot_input.pop();
            }
            KeyCode::Char(c) => push_char(&mut self.state.forgot_input, c),
            _ => {}
        }
    }

    fn handle_welcome_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.state.session = None;
                self.state.current_screen = Screen::Menu;
            }
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    /// Enter the login flow, resuming a persisted lock if there is one
    fn open_login(&mut self) {
        self.state.focus = if self.state.username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
        self.refresh_login_view();

        if self.login.needs_ticker() {
            self.state.current_screen = Screen::Locked;
            self.start_countdown();
        } else {
            self.state.current_screen = Screen::Login;
        }
    }

    fn open_forgot(&mut self) {
        self.state.forgot_input.clear();
        self.state.current_screen = Screen::Forgot;
    }

    fn return_to_login(&mut self) {
        self.state.current_screen = if self.login.needs_ticker() {
            Screen::Locked
        } else {
            Screen::Login
        };
    }

    /// Back to the menu; a running lock keeps counting down
    fn leave_login_flow(&mut self) {
        self.state.clear_password();
        self.state.current_screen = Screen::Menu;
    }

    fn submit(&mut self) {
        let reply = match self.login.submit(&self.state.username, &self.state.password) {
            Ok(reply) => reply,
            Err(e) => return self.report_error(e),
        };

        let message = reply.outcome.message();
        let toast = match &reply.outcome {
            SubmitOutcome::Success { .. } => Toast::success(message),
            SubmitOutcome::Invalid { .. } | SubmitOutcome::LockedOut { .. } => {
                Toast::error(message)
            }
            SubmitOutcome::EmptyFields | SubmitOutcome::StillLocked { .. } => {
                Toast::warning(message)
            }
        };
        self.state.toasts.push(toast);

        match reply.outcome {
            SubmitOutcome::Success { session } => {
                self.state.clear_password();
                self.state.session = Some(session);
                self.state.current_screen = Screen::Welcome;
            }
            SubmitOutcome::Invalid { .. } | SubmitOutcome::LockedOut { .. } => {
                self.state.clear_password();
                self.state.focus = LoginField::Password;
            }
            SubmitOutcome::EmptyFields | SubmitOutcome::StillLocked { .. } => {}
        }

        self.apply_effect(reply.effect);
        self.refresh_login_view();
    }

    fn recover(&mut self) {
        let reply = match self.login.recover(&self.state.forgot_input) {
            Ok(reply) => reply,
            Err(e) => return self.report_error(e),
        };

        match reply.outcome {
            RecoveryOutcome::EmptyIdentifier => {
                self.state
                    .toasts
                    .push(Toast::warning(reply.outcome.message()));
            }
            RecoveryOutcome::Sent => {
                self.state.toasts.push(Toast::new(
                    reply.outcome.message(),
                    ToastKind::Info,
                    ToastLength::Long,
                ));
                self.apply_effect(reply.effect);
                self.state.forgot_input.clear();
                self.state.current_screen = Screen::Login;
            }
        }
        self.refresh_login_view();
    }

    /// Count the lock down on any screen, lifting it once it has expired
    fn advance_lock(&mut self) {
        match self.login.tick() {
            Ok(reply) => self.apply_effect(reply.effect),
            Err(e) => self.report_error(e),
        }
        // A tick queued before the ticker stopped
        if !self.login.needs_ticker() {
            self.countdown.stop();
        }
        self.refresh_login_view();
    }

    /// Disable or enable the login control as the controller asks
    fn apply_effect(&mut self, effect: Option<ControlEffect>) {
        match effect {
            Some(ControlEffect::DisableLogin) => {
                self.start_countdown();
                if self.state.current_screen == Screen::Login {
                    self.state.current_screen = Screen::Locked;
                }
            }
            Some(ControlEffect::EnableLogin) => {
                self.countdown.stop();
                if self.state.current_screen == Screen::Locked {
                    self.state.current_screen = Screen::Login;
                }
            }
            None => {}
        }
    }

    fn start_countdown(&mut self) {
        self.countdown
            .start(self.sender.clone(), || Event::Countdown);
    }

    fn refresh_login_view(&mut self) {
        self.state.login_status = self.login.status();
        self.state.lock_progress = self.login.lock_progress();
    }

    fn report_error(&mut self, error: LoginError) {
        tracing::error!("Login store error: {}", error);
        self.state
            .toasts
            .push(Toast::error("Could not save login state"));
    }

    fn quit(&mut self) {
        self.countdown.stop();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration as ChronoDuration, Utc};
    use handheld_core::{
        FixedCredentials, LockoutPolicy, LoginStatus, ManualClock, MemoryStore, PrefValue,
    };

    type TestApp = App<MemoryStore, ManualClock>;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    /// App plus the receiving end of its channel, kept alive for the ticker
    fn app_with_store(
        store: MemoryStore,
        clock: &ManualClock,
    ) -> (TestApp, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let login = LoginController::load(
            store,
            LockoutPolicy::default(),
            clock.clone(),
            FixedCredentials::default(),
        );
        (App::new(login, Theme::default(), tx), rx)
    }

    fn app(clock: &ManualClock) -> (TestApp, mpsc::UnboundedReceiver<Event>) {
        app_with_store(MemoryStore::new(), clock)
    }

    fn key(app: &mut TestApp, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            key(app, KeyCode::Char(c));
        }
    }

    fn current_toast(app: &TestApp) -> Option<&str> {
        app.state
            .toasts
            .current()
            .map(|t| t.message.as_str())
    }

    /// Open the login form and submit the given credentials
    fn attempt(app: &mut TestApp, username: &str, password: &str) {
        app.state.username.clear();
        app.state.focus = LoginField::Username;
        type_text(app, username);
        key(app, KeyCode::Tab);
        type_text(app, password);
        key(app, KeyCode::Enter);
    }

    #[tokio::test]
    async fn test_menu_navigation() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen, Screen::Calculator);

        key(&mut app, KeyCode::Esc);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen, Screen::Login);

        key(&mut app, KeyCode::Esc);
        key(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_calculator_keys() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);

        key(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "2^10");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state.calculator.display(), "1024");

        type_text(&mut app, "6/0=");
        assert_eq!(app.state.calculator.display(), "Error");
    }

    #[tokio::test]
    async fn test_successful_login_hands_off_session() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);

        key(&mut app, KeyCode::Char('l'));
        attempt(&mut app, "admin", "1234");

        assert_eq!(app.state.current_screen, Screen::Welcome);
        assert_eq!(
            app.state.session.as_ref().map(|s| s.greeting()),
            Some("Welcome, admin!".to_string())
        );
        assert!(app.state.password.is_empty());
        assert_eq!(current_toast(&app), Some("Login Successful!"));

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen, Screen::Menu);
        assert!(app.state.session.is_none());
    }

    #[tokio::test]
    async fn test_empty_fields_consume_no_attempt() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);

        key(&mut app, KeyCode::Char('l'));
        key(&mut app, KeyCode::Enter);

        assert_eq!(current_toast(&app), Some("Please enter both fields"));
        assert_eq!(
            app.state.login_status,
            LoginStatus::Unlocked {
                attempts_remaining: 3
            }
        );
    }

    #[tokio::test]
    async fn test_three_failures_lock_and_start_countdown() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));

        attempt(&mut app, "admin", "0000");
        assert_eq!(current_toast(&app), Some("Invalid Credentials!"));
        assert_eq!(app.state.login_status.to_string(), "Attempts left: 2");
        assert!(!app.is_counting_down());

        attempt(&mut app, "admin", "0000");
        attempt(&mut app, "admin", "0000");

        assert_eq!(app.state.current_screen, Screen::Locked);
        assert_eq!(current_toast(&app), Some("Too many attempts. Locked!"));
        assert_eq!(
            app.state.login_status.to_string(),
            "Locked. Try again after 10s"
        );
        assert!(app.is_counting_down());
    }

    #[tokio::test]
    async fn test_countdown_expiry_reenables_login() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        for _ in 0..3 {
            attempt(&mut app, "admin", "0000");
        }

        clock.advance(ChronoDuration::seconds(4));
        app.handle_event(Event::Countdown);
        assert_eq!(app.state.current_screen, Screen::Locked);
        assert_eq!(app.state.login_status, LoginStatus::Locked { remaining_secs: 6 });

        clock.advance(ChronoDuration::seconds(6));
        app.handle_event(Event::Countdown);
        assert_eq!(app.state.current_screen, Screen::Login);
        assert_eq!(app.state.login_status.to_string(), "Attempts left: 3");
        assert!(!app.is_counting_down());
    }

    #[tokio::test]
    async fn test_submit_while_locked_reports_wait() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        for _ in 0..3 {
            attempt(&mut app, "admin", "0000");
        }

        key(&mut app, KeyCode::Enter);
        assert_eq!(current_toast(&app), Some("Login locked. Please wait."));
        assert_eq!(app.state.current_screen, Screen::Locked);
    }

    #[tokio::test]
    async fn test_lock_expires_while_on_menu() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        for _ in 0..3 {
            attempt(&mut app, "admin", "0000");
        }

        key(&mut app, KeyCode::Esc);
        assert_eq!(app.state.current_screen, Screen::Menu);
        assert!(app.is_counting_down());

        clock.advance(ChronoDuration::seconds(4));
        app.handle_event(Event::Countdown);
        assert_eq!(app.state.login_status, LoginStatus::Locked { remaining_secs: 6 });

        clock.advance(ChronoDuration::seconds(6));
        app.handle_event(Event::Countdown);
        assert_eq!(app.state.current_screen, Screen::Menu);
        assert_eq!(app.state.login_status.to_string(), "Attempts left: 3");
        assert!(!app.is_counting_down());

        key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state.current_screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_redraw_lifts_expired_lock() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        for _ in 0..3 {
            attempt(&mut app, "admin", "0000");
        }
        key(&mut app, KeyCode::Esc);

        clock.advance(ChronoDuration::seconds(60));
        app.handle_event(Event::Redraw);

        assert_eq!(app.state.current_screen, Screen::Menu);
        assert_eq!(app.state.login_status.to_string(), "Attempts left: 3");
        assert!(!app.is_counting_down());
    }

    #[tokio::test]
    async fn test_stored_lock_starts_countdown_on_load() {
        let clock = ManualClock::new(t0());
        let mut store = MemoryStore::new();
        store
            .put_all(vec![
                ("attempts_left", PrefValue::from(0u32)),
                ("locked", PrefValue::from(true)),
                ("lock_timestamp", PrefValue::from(t0().timestamp_millis())),
            ])
            .unwrap();
        let (mut app, _rx) = app_with_store(store, &clock);

        assert_eq!(app.state.current_screen, Screen::Menu);
        assert!(app.is_counting_down());

        clock.advance(ChronoDuration::seconds(10));
        app.handle_event(Event::Countdown);
        assert_eq!(app.state.login_status.to_string(), "Attempts left: 3");
        assert!(!app.is_counting_down());
    }

    #[tokio::test]
    async fn test_recovery_notice_stays_up_longer() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        key(&mut app, KeyCode::F(2));
        type_text(&mut app, "admin");
        key(&mut app, KeyCode::Enter);

        // Longer than a short toast, shorter than a long one
        for _ in 0..25 {
            app.handle_event(Event::Redraw);
        }
        assert_eq!(
            current_toast(&app),
            Some("If account exists, reset link would be sent.")
        );
    }

    #[tokio::test]
    async fn test_forgot_password_lifts_lock() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        for _ in 0..3 {
            attempt(&mut app, "admin", "0000");
        }

        key(&mut app, KeyCode::F(2));
        assert_eq!(app.state.current_screen, Screen::Forgot);

        key(&mut app, KeyCode::Enter);
        assert_eq!(current_toast(&app), Some("Please enter username or email"));
        assert_eq!(app.state.current_screen, Screen::Forgot);

        type_text(&mut app, "admin@example.com");
        key(&mut app, KeyCode::Enter);
        assert_eq!(
            current_toast(&app),
            Some("If account exists, reset link would be sent.")
        );
        assert_eq!(app.state.current_screen, Screen::Login);
        assert_eq!(app.state.login_status.to_string(), "Attempts left: 3");
        assert!(!app.is_counting_down());
    }

    #[tokio::test]
    async fn test_forgot_escape_returns_to_lock() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        for _ in 0..3 {
            attempt(&mut app, "admin", "0000");
        }

        key(&mut app, KeyCode::F(2));
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.state.current_screen, Screen::Locked);
    }

    #[tokio::test]
    async fn test_stray_countdown_tick_is_ignored() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);

        app.handle_event(Event::Countdown);
        assert_eq!(app.state.current_screen, Screen::Menu);
        assert!(!app.is_counting_down());
    }

    #[tokio::test]
    async fn test_last_username_prefills_form() {
        let clock = ManualClock::new(t0());
        let mut store = MemoryStore::new();
        store
            .put_all(vec![("last_user", PrefValue::from("admin"))])
            .unwrap();
        let (mut app, _rx) = app_with_store(store, &clock);

        key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state.username, "admin");
        assert_eq!(app.state.focus, LoginField::Password);

        type_text(&mut app, "1234");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen, Screen::Welcome);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_anywhere() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));

        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_redraw_expires_toasts() {
        let clock = ManualClock::new(t0());
        let (mut app, _rx) = app(&clock);
        key(&mut app, KeyCode::Char('l'));
        key(&mut app, KeyCode::Enter);
        assert!(current_toast(&app).is_some());

        for _ in 0..60 {
            app.handle_event(Event::Redraw);
        }
        assert!(current_toast(&app).is_none());
    }

    #[tokio::test]
    async fn test_lock_survives_restart_through_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::from_config(&config, tx.clone()).unwrap();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('l'),
            KeyModifiers::NONE,
        )));
        for _ in 0..3 {
            app.state.username = "admin".to_string();
            app.state.password.push_str("wrong");
            app.handle_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        }
        assert_eq!(app.state.current_screen, Screen::Locked);
        drop(app);

        let mut app = App::from_config(&config, tx).unwrap();
        assert!(app.login().needs_ticker());
        assert!(app.state.login_status.is_locked());

        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('l'),
            KeyModifiers::NONE,
        )));
        assert_eq!(app.state.current_screen, Screen::Locked);
        assert!(app.is_counting_down());
    }
}
