//! Failed-attempt lockout as a pure transition function
//!
//! The machine has two states:
//!
//! - `Unlocked { attempts_remaining }`: logins are accepted
//! - `Locked { since }`: logins are refused until the lock duration has
//!   elapsed or the user runs the recovery action
//!
//! [`LockoutPolicy::step`] never touches storage or the UI. It returns the
//! next state together with the control effect the caller has to apply
//! (disable the login control and start the ticker, or the reverse).

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{LOCK_SECONDS, MAX_ATTEMPTS};

/// Current lockout state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockoutState {
    /// Logins accepted; always at least one attempt left
    Unlocked { attempts_remaining: u32 },
    /// Logins refused since the given wall-clock instant
    Locked { since: DateTime<Utc> },
}

impl LockoutState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockoutState::Locked { .. })
    }

    /// Attempts left; zero while locked
    pub fn attempts_remaining(&self) -> u32 {
        match self {
            LockoutState::Unlocked { attempts_remaining } => *attempts_remaining,
            LockoutState::Locked { .. } => 0,
        }
    }
}

/// Inputs to the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockoutEvent {
    /// Credentials were checked and rejected
    FailedAttempt,
    /// Credentials were checked and accepted
    SuccessfulAttempt,
    /// One-second countdown tick
    Tick,
    /// "Forgot password" recovery, bypasses the wait
    Recover,
}

/// Side effect the owner of the login control must perform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEffect {
    /// Disable the login control and start the countdown ticker
    DisableLogin,
    /// Re-enable the login control and stop the countdown ticker
    EnableLogin,
}

/// Result of one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: LockoutState,
    pub effect: Option<ControlEffect>,
}

impl Transition {
    fn stay(state: LockoutState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Attempt budget and lock duration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockoutPolicy {
    max_attempts: u32,
    lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            lock_duration: Duration::from_secs(LOCK_SECONDS),
        }
    }
}

impl LockoutPolicy {
    /// Create a custom policy. A zero attempt budget is raised to one.
    pub fn new(max_attempts: u32, lock_duration: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            lock_duration,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn lock_duration(&self) -> Duration {
        self.lock_duration
    }

    /// State on first launch
    pub fn initial_state(&self) -> LockoutState {
        LockoutState::Unlocked {
            attempts_remaining: self.max_attempts,
        }
    }

    /// Apply one event
    pub fn step(&self, state: LockoutState, event: LockoutEvent, now: DateTime<Utc>) -> Transition {
        match (state, event) {
            (LockoutState::Unlocked { attempts_remaining }, LockoutEvent::FailedAttempt) => {
                let left = attempts_remaining.saturating_sub(1);
                if left == 0 {
                    tracing::info!("attempts exhausted, locking login");
                    Transition {
                        state: LockoutState::Locked { since: now },
                        effect: Some(ControlEffect::DisableLogin),
                    }
                } else {
                    Transition::stay(LockoutState::Unlocked {
                        attempts_remaining: left,
                    })
                }
            }

            (LockoutState::Unlocked { .. }, LockoutEvent::SuccessfulAttempt)
            | (LockoutState::Unlocked { .. }, LockoutEvent::Recover) => {
                Transition::stay(self.initial_state())
            }

            (LockoutState::Locked { since }, LockoutEvent::Tick) => {
                if since > now {
                    // Lock stamped ahead of the clock: serve the full duration from now
                    tracing::warn!(%since, "lock timestamp is in the future, restarting lock");
                    Transition::stay(LockoutState::Locked { since: now })
                } else if self.remaining(since, now).is_zero() {
                    tracing::info!("lock expired, login enabled");
                    Transition {
                        state: self.initial_state(),
                        effect: Some(ControlEffect::EnableLogin),
                    }
                } else {
                    Transition::stay(state)
                }
            }

            (LockoutState::Locked { .. }, LockoutEvent::Recover) => {
                tracing::info!("lock lifted by recovery");
                Transition {
                    state: self.initial_state(),
                    effect: Some(ControlEffect::EnableLogin),
                }
            }

            // Attempts are refused while locked; ticks are meaningless while unlocked
            (LockoutState::Locked { .. }, LockoutEvent::FailedAttempt)
            | (LockoutState::Locked { .. }, LockoutEvent::SuccessfulAttempt)
            | (LockoutState::Unlocked { .. }, LockoutEvent::Tick) => Transition::stay(state),
        }
    }

    /// Whole seconds until the lock lifts, rounded up. `None` when unlocked.
    pub fn remaining_secs(&self, state: LockoutState, now: DateTime<Utc>) -> Option<u64> {
        match state {
            LockoutState::Locked { since } => {
                let remaining = self.remaining(since, now);
                let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
                Some(secs)
            }
            LockoutState::Unlocked { .. } => None,
        }
    }

    /// Fraction of the lock already served, in [0, 1]
    pub fn progress(&self, state: LockoutState, now: DateTime<Utc>) -> f64 {
        match state {
            LockoutState::Locked { since } if !self.lock_duration.is_zero() => {
                let left = self.remaining(since, now).as_secs_f64();
                1.0 - left / self.lock_duration.as_secs_f64()
            }
            _ => 1.0,
        }
    }

    /// Bring a state loaded from storage back inside the policy's bounds
    pub fn normalize(&self, state: LockoutState) -> LockoutState {
        match state {
            LockoutState::Unlocked { attempts_remaining }
                if attempts_remaining == 0 || attempts_remaining > self.max_attempts =>
            {
                self.initial_state()
            }
            other => other,
        }
    }

    fn remaining(&self, since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        // A clock that moved backwards counts as no time served
        let elapsed = (now - since).to_std().unwrap_or(Duration::ZERO);
        self.lock_duration.saturating_sub(elapsed)
    }
}
