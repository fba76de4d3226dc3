//! Handheld Core - lockout state machine, login controller and calculator engine
//!
//! This crate holds the UI-independent logic shared by the terminal app and
//! the command-line front end:
//!
//! - [`lockout`]: pure transition function for failed-attempt lockout
//! - [`login`]: the persistence boundary around the lockout machine
//! - [`store`]: durable key-value storage for the login flags
//! - [`ticker`]: cancellable one-second countdown ticker
//! - [`calc`]: arithmetic evaluator, display formatter and entry engine

pub mod calc;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod lockout;
pub mod login;
pub mod store;
pub mod ticker;

pub use calc::{BinaryOp, Calculator, Key, MemoryCommand, UnaryFn, ERROR_TOKEN};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use credentials::{CredentialVerifier, FixedCredentials};
pub use error::{CalcError, ConfigError, LoginError, StoreError};
pub use lockout::{ControlEffect, LockoutEvent, LockoutPolicy, LockoutState, Transition};
pub use login::{LoginController, LoginStatus, RecoveryOutcome, Reply, Session, SubmitOutcome};
pub use store::{FileStore, KeyValueStore, MemoryStore, PrefValue};
pub use ticker::CountdownTicker;

/// Failed attempts allowed before the login locks
pub const MAX_ATTEMPTS: u32 = 3;

/// Seconds the login stays locked once attempts are exhausted
pub const LOCK_SECONDS: u64 = 10;

/// Key-value namespace holding the login flags
pub const PREFS_NAMESPACE: &str = "simple_login_prefs";
