//! Property-based tests for handheld-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use handheld_core::calc::{format_number, parse_display};
use handheld_core::{
    BinaryOp, Calculator, ControlEffect, Key, LockoutEvent, LockoutPolicy, LockoutState,
    MemoryCommand, UnaryFn, ERROR_TOKEN,
};
use proptest::prelude::*;

// ============================================
// Strategies
// ============================================

fn arb_event() -> impl Strategy<Value = LockoutEvent> {
    prop_oneof![
        Just(LockoutEvent::FailedAttempt),
        Just(LockoutEvent::SuccessfulAttempt),
        Just(LockoutEvent::Tick),
        Just(LockoutEvent::Recover),
    ]
}

fn arb_policy() -> impl Strategy<Value = LockoutPolicy> {
    (1u32..=6, 1u64..=120).prop_map(|(n, secs)| LockoutPolicy::new(n, Duration::from_secs(secs)))
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        (0u8..=9).prop_map(Key::Digit),
        Just(Key::DoubleZero),
        Just(Key::Dot),
        prop_oneof![
            Just(BinaryOp::Add),
            Just(BinaryOp::Subtract),
            Just(BinaryOp::Multiply),
            Just(BinaryOp::Divide),
            Just(BinaryOp::Power),
        ]
        .prop_map(Key::Operator),
        Just(Key::Equals),
        prop_oneof![
            Just(UnaryFn::Sin),
            Just(UnaryFn::Cos),
            Just(UnaryFn::Tan),
            Just(UnaryFn::Sqrt),
            Just(UnaryFn::Log),
            Just(UnaryFn::Ln),
            Just(UnaryFn::Square),
        ]
        .prop_map(Key::Function),
        prop_oneof![
            Just(MemoryCommand::Clear),
            Just(MemoryCommand::Recall),
            Just(MemoryCommand::Add),
            Just(MemoryCommand::Subtract),
        ]
        .prop_map(Key::Memory),
        Just(Key::Clear),
        Just(Key::Backspace),
        Just(Key::Percent),
    ]
}

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

// ============================================
// Lockout machine
// ============================================

proptest! {
    /// Unlocked states always keep at least one attempt and never exceed the budget
    #[test]
    fn prop_unlocked_attempts_in_range(
        policy in arb_policy(),
        events in prop::collection::vec((arb_event(), 0i64..30), 0..60),
    ) {
        let mut state = policy.initial_state();
        let mut now = t0();
        for (event, advance) in events {
            now += ChronoDuration::seconds(advance);
            state = policy.step(state, event, now).state;
            if let LockoutState::Unlocked { attempts_remaining } = state {
                prop_assert!(attempts_remaining >= 1);
                prop_assert!(attempts_remaining <= policy.max_attempts());
            }
        }
    }

    /// Effects fire exactly on lock and unlock edges
    #[test]
    fn prop_effects_match_edges(
        policy in arb_policy(),
        events in prop::collection::vec((arb_event(), 0i64..30), 0..60),
    ) {
        let mut state = policy.initial_state();
        let mut now = t0();
        for (event, advance) in events {
            now += ChronoDuration::seconds(advance);
            let transition = policy.step(state, event, now);
            let expected = match (state.is_locked(), transition.state.is_locked()) {
                (false, true) => Some(ControlEffect::DisableLogin),
                (true, false) => Some(ControlEffect::EnableLogin),
                _ => None,
            };
            prop_assert_eq!(transition.effect, expected);
            state = transition.state;
        }
    }

    /// Exactly `max_attempts` consecutive failures lock; fewer do not
    #[test]
    fn prop_lock_after_budget(policy in arb_policy(), extra in 0u32..3) {
        let mut state = policy.initial_state();
        for i in 1..=policy.max_attempts() {
            state = policy.step(state, LockoutEvent::FailedAttempt, t0()).state;
            if i < policy.max_attempts() {
                prop_assert_eq!(state.attempts_remaining(), policy.max_attempts() - i);
            }
        }
        prop_assert!(state.is_locked());

        // Further failures while locked change nothing
        for _ in 0..extra {
            let next = policy.step(state, LockoutEvent::FailedAttempt, t0()).state;
            prop_assert_eq!(next, state);
        }
    }

    /// Remaining seconds count down and the lock lifts exactly at the duration
    #[test]
    fn prop_countdown(policy in arb_policy(), elapsed in 0u64..200) {
        let locked = LockoutState::Locked { since: t0() };
        let now = t0() + ChronoDuration::seconds(elapsed as i64);
        let total = policy.lock_duration().as_secs();

        let next = policy.step(locked, LockoutEvent::Tick, now);
        if elapsed >= total {
            prop_assert_eq!(next.state, policy.initial_state());
        } else {
            prop_assert_eq!(next.state, locked);
            prop_assert_eq!(policy.remaining_secs(locked, now), Some(total - elapsed));
        }
    }
}

// ============================================
// Calculator
// ============================================

proptest! {
    /// Formatted finite values read back as the same number
    #[test]
    fn prop_format_reads_back(v in -1e12f64..1e12) {
        let text = format_number(v);
        prop_assert_eq!(parse_display(&text), Ok(v));
    }

    /// Integral values never show a fractional part
    #[test]
    fn prop_integers_have_no_point(n in -1_000_000_000i64..1_000_000_000) {
        let text = format_number(n as f64);
        prop_assert_eq!(text, n.to_string());
    }

    /// Any key sequence leaves the display either readable or the error token
    #[test]
    fn prop_display_always_valid(keys in prop::collection::vec(arb_key(), 0..40)) {
        let mut calc = Calculator::new();
        for key in keys {
            calc.press(key);
            let display = calc.display();
            prop_assert!(
                display == ERROR_TOKEN
                    || parse_display(display).is_ok(),
                "unexpected display {:?}", display
            );
            prop_assert!(calc.memory().is_finite());
        }
    }

    /// Clear always returns to a zero display with no pending operation
    #[test]
    fn prop_clear_resets(keys in prop::collection::vec(arb_key(), 0..40)) {
        let mut calc = Calculator::new();
        for key in keys {
            calc.press(key);
        }
        calc.press(Key::Clear);
        prop_assert_eq!(calc.display(), "0");
        prop_assert!(calc.pending().is_none());
    }
}
