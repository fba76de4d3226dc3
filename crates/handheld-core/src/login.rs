//! Login flow: credential form → attempt counter → lockout → session hand-off
//!
//! [`LoginController`] is the only place where the lockout state meets
//! durable storage. Each mutation runs the pure [`LockoutPolicy::step`],
//! writes the affected flags in one batch and hands the resulting
//! [`ControlEffect`] back to the caller, which owns the login control and
//! the countdown ticker.

use std::fmt;

use chrono::DateTime;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::credentials::{CredentialVerifier, FixedCredentials};
use crate::error::LoginError;
use crate::lockout::{ControlEffect, LockoutEvent, LockoutPolicy, LockoutState};
use crate::store::{KeyValueStore, PrefValue};

pub const KEY_LAST_USER: &str = "last_user";
pub const KEY_ATTEMPTS_LEFT: &str = "attempts_left";
pub const KEY_LOCKED: &str = "locked";
pub const KEY_LOCK_TS: &str = "lock_timestamp";

/// Authenticated user handed to the follow-on screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
}

impl Session {
    pub fn greeting(&self) -> String {
        format!("Welcome, {}!", self.username)
    }
}

/// Result of a login submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Username or password blank; no attempt consumed
    EmptyFields,
    /// Lock still active; no attempt consumed
    StillLocked { remaining_secs: u64 },
    /// Credentials accepted
    Success { session: Session },
    /// Credentials rejected, attempts left
    Invalid { attempts_remaining: u32 },
    /// Credentials rejected, attempts exhausted
    LockedOut { remaining_secs: u64 },
}

impl SubmitOutcome {
    /// Short notification text
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::EmptyFields => "Please enter both fields",
            SubmitOutcome::StillLocked { .. } => "Login locked. Please wait.",
            SubmitOutcome::Success { .. } => "Login Successful!",
            SubmitOutcome::Invalid { .. } => "Invalid Credentials!",
            SubmitOutcome::LockedOut { .. } => "Too many attempts. Locked!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success { .. })
    }
}

/// Result of the "forgot password" action
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecoveryOutcome {
    EmptyIdentifier,
    Sent,
}

impl RecoveryOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RecoveryOutcome::EmptyIdentifier => "Please enter username or email",
            RecoveryOutcome::Sent => "If account exists, reset link would be sent.",
        }
    }
}

/// What the attempts label shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoginStatus {
    Unlocked { attempts_remaining: u32 },
    Locked { remaining_secs: u64 },
}

impl LoginStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, LoginStatus::Locked { .. })
    }
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginStatus::Unlocked { attempts_remaining } => {
                write!(f, "Attempts left: {}", attempts_remaining)
            }
            LoginStatus::Locked { remaining_secs } => {
                write!(f, "Locked. Try again after {}s", remaining_secs)
            }
        }
    }
}

/// An outcome plus the control effect the caller must apply
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply<T> {
    pub outcome: T,
    pub effect: Option<ControlEffect>,
}

/// Login controller owning the lockout state and its storage
pub struct LoginController<S, C = SystemClock, V = FixedCredentials> {
    store: S,
    clock: C,
    verifier: V,
    policy: LockoutPolicy,
    state: LockoutState,
    last_username: String,
}

impl<S: KeyValueStore> LoginController<S> {
    /// Load with the system clock and the demo credentials
    pub fn new(store: S, policy: LockoutPolicy) -> Self {
        Self::load(store, policy, SystemClock, FixedCredentials::default())
    }
}

impl<S, C, V> LoginController<S, C, V>
where
    S: KeyValueStore,
    C: Clock,
    V: CredentialVerifier,
{
    /// Read the persisted flags, falling back to first-launch defaults
    pub fn load(store: S, policy: LockoutPolicy, clock: C, verifier: V) -> Self {
        let last_username = store.get_string(KEY_LAST_USER).unwrap_or_default();
        let locked = store.get_bool(KEY_LOCKED).unwrap_or(false);

        let state = if locked {
            let since = store
                .get_long(KEY_LOCK_TS)
                .and_then(DateTime::from_timestamp_millis)
                .unwrap_or_else(|| {
                    tracing::warn!("locked without a valid timestamp, restarting lock");
                    clock.now()
                });
            LockoutState::Locked { since }
        } else {
            let attempts = store
                .get_int(KEY_ATTEMPTS_LEFT)
                .map(|n| n.max(0) as u32)
                .unwrap_or(policy.max_attempts());
            policy.normalize(LockoutState::Unlocked {
                attempts_remaining: attempts,
            })
        };

        tracing::debug!("loaded lockout state {:?}", state);

        Self {
            store,
            clock,
            verifier,
            policy,
            state,
            last_username,
        }
    }

    /// Username of the last successful login, for pre-filling the form
    pub fn last_username(&self) -> &str {
        &self.last_username
    }

    pub fn state(&self) -> LockoutState {
        self.state
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current label contents
    pub fn status(&self) -> LoginStatus {
        match self.policy.remaining_secs(self.state, self.clock.now()) {
            Some(remaining_secs) => LoginStatus::Locked { remaining_secs },
            None => LoginStatus::Unlocked {
                attempts_remaining: self.state.attempts_remaining(),
            },
        }
    }

    /// Fraction of the current lock already served
    pub fn lock_progress(&self) -> f64 {
        self.policy.progress(self.state, self.clock.now())
    }

    /// Whether the caller should be running the countdown ticker
    pub fn needs_ticker(&self) -> bool {
        self.state.is_locked()
    }

    /// Check a username/password pair
    pub fn submit(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Reply<SubmitOutcome>, LoginError> {
        let now = self.clock.now();

        // Lift an expired lock before judging the attempt
        let lifted = self.policy.step(self.state, LockoutEvent::Tick, now);
        let effect = lifted.effect;

        if let Some(remaining_secs) = self.policy.remaining_secs(lifted.state, now) {
            self.commit(lifted.state, None, false)?;
            return Ok(Reply {
                outcome: SubmitOutcome::StillLocked { remaining_secs },
                effect,
            });
        }

        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            self.commit(lifted.state, None, false)?;
            return Ok(Reply {
                outcome: SubmitOutcome::EmptyFields,
                effect,
            });
        }

        if self.verifier.verify(username, password) {
            let next = self
                .policy
                .step(lifted.state, LockoutEvent::SuccessfulAttempt, now);
            self.commit(next.state, Some(username), false)?;
            tracing::info!(username, "login succeeded");
            return Ok(Reply {
                outcome: SubmitOutcome::Success {
                    session: Session {
                        username: username.to_string(),
                    },
                },
                effect,
            });
        }

        let next = self
            .policy
            .step(lifted.state, LockoutEvent::FailedAttempt, now);
        self.commit(next.state, None, false)?;
        let outcome = match self.policy.remaining_secs(next.state, now) {
            Some(remaining_secs) => SubmitOutcome::LockedOut { remaining_secs },
            None => {
                let attempts_remaining = next.state.attempts_remaining();
                tracing::debug!(attempts_remaining, "login rejected");
                SubmitOutcome::Invalid { attempts_remaining }
            }
        };

        Ok(Reply {
            outcome,
            effect: next.effect.or(effect),
        })
    }

    /// One countdown tick
    pub fn tick(&mut self) -> Result<Reply<LoginStatus>, LoginError> {
        let effect = self.apply(LockoutEvent::Tick)?;
        Ok(Reply {
            outcome: self.status(),
            effect,
        })
    }

    /// "Forgot password": reset attempts and lift any lock
    pub fn recover(&mut self, identifier: &str) -> Result<Reply<RecoveryOutcome>, LoginError> {
        if identifier.trim().is_empty() {
            return Ok(Reply {
                outcome: RecoveryOutcome::EmptyIdentifier,
                effect: None,
            });
        }

        let effect = self.apply(LockoutEvent::Recover)?;
        Ok(Reply {
            outcome: RecoveryOutcome::Sent,
            effect,
        })
    }

    /// Run the machine for one event and commit the result
    fn apply(&mut self, event: LockoutEvent) -> Result<Option<ControlEffect>, LoginError> {
        let transition = self.policy.step(self.state, event, self.clock.now());
        // Recovery always rewrites the flags, matching a reset
        self.commit(transition.state, None, event == LockoutEvent::Recover)?;
        Ok(transition.effect)
    }

    /// Persist `next` (and the signed-in user, if any) in one batch, then
    /// adopt it. Nothing changes in memory when the write fails.
    fn commit(
        &mut self,
        next: LockoutState,
        last_user: Option<&str>,
        force: bool,
    ) -> Result<(), LoginError> {
        if next == self.state && last_user.is_none() && !force {
            return Ok(());
        }

        let mut entries = match next {
            LockoutState::Unlocked { attempts_remaining } => vec![
                (KEY_ATTEMPTS_LEFT, PrefValue::from(attempts_remaining)),
                (KEY_LOCKED, PrefValue::from(false)),
                (KEY_LOCK_TS, PrefValue::from(0i64)),
            ],
            LockoutState::Locked { since } => vec![
                (KEY_ATTEMPTS_LEFT, PrefValue::from(0u32)),
                (KEY_LOCKED, PrefValue::from(true)),
                (KEY_LOCK_TS, PrefValue::from(since.timestamp_millis())),
            ],
        };
        if let Some(user) = last_user {
            entries.push((KEY_LAST_USER, PrefValue::from(user)));
        }
        self.store.put_all(entries)?;

        self.state = next;
        if let Some(user) = last_user {
            self.last_username = user.to_string();
        }
        Ok(())
    }
}
