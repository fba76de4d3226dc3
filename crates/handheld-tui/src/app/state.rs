//! Application state

use handheld_core::{Calculator, LoginStatus, Session};
use zeroize::Zeroizing;

use crate::ui::components::toast::Toasts;

/// Longest text accepted by any input field
pub const MAX_INPUT_LEN: usize = 64;

/// Main menu entries: label and description
pub const MENU_ITEMS: [(&str, &str); 3] = [
    ("Calculator", "Arithmetic and scientific functions"),
    ("Login", "Sign in with the demo account"),
    ("Quit", "Exit application"),
];

/// Current screen/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Main menu
    #[default]
    Menu,

    /// Calculator keypad and display
    Calculator,

    /// Username/password form
    Login,

    /// Countdown while attempts are exhausted
    Locked,

    /// "Forgot password" dialog
    Forgot,

    /// Session hand-off after a successful login
    Welcome,
}

impl Screen {
    /// Breadcrumb shown in the header
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Menu => "Menu",
            Screen::Calculator => "Calculator",
            Screen::Login => "Login",
            Screen::Locked => "Login › Locked",
            Screen::Forgot => "Login › Forgot password",
            Screen::Welcome => "Welcome",
        }
    }
}

/// Focused field on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn toggle(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

/// Application state
pub struct AppState {
    /// Current screen
    pub current_screen: Screen,

    /// Menu selection index
    pub menu_index: usize,

    /// Calculator engine, display included
    pub calculator: Calculator,

    /// Username input buffer
    pub username: String,

    /// Password input buffer, wiped on drop
    pub password: Zeroizing<String>,

    /// Focused login field
    pub focus: LoginField,

    /// Identifier typed into the forgot-password dialog
    pub forgot_input: String,

    /// Attempts line or countdown
    pub login_status: LoginStatus,

    /// Fraction of the current lock already served
    pub lock_progress: f64,

    /// Authenticated user, set on successful login
    pub session: Option<Session>,

    /// Toast on screen, if any
    pub toasts: Toasts,
}

impl AppState {
    /// Create state with the username pre-filled from the last login
    pub fn new(last_username: &str, login_status: LoginStatus) -> Self {
        Self {
            current_screen: Screen::Menu,
            menu_index: 0,
            calculator: Calculator::new(),
            username: last_username.to_string(),
            password: Zeroizing::new(String::new()),
            focus: LoginField::Username,
            forgot_input: String::new(),
            login_status,
            lock_progress: 0.0,
            session: None,
            toasts: Toasts::new(),
        }
    }

    /// Buffer of the focused login field
    pub fn focused_input(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut *self.password,
        }
    }

    /// Wipe the password buffer
    pub fn clear_password(&mut self) {
        // Dropping the old buffer zeroes it
        self.password = Zeroizing::new(String::new());
    }
}

/// Append a character to an input buffer, respecting the length limit
pub fn push_char(buffer: &mut String, c: char) {
    if buffer.chars().count() < MAX_INPUT_LEN && !c.is_control() {
        buffer.push(c);
    }
}
