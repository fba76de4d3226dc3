//! Keyboard bindings for the calculator screen

use crossterm::event::{KeyCode, KeyEvent};
use handheld_core::{BinaryOp, Key, MemoryCommand, UnaryFn};

/// Key hints drawn under the keypad: binding and calculator key
pub const LEGEND: [(&str, &str); 14] = [
    ("0-9", "digits"),
    ("z", "00"),
    ("+ - * / ^", "operators"),
    ("Enter =", "equals"),
    ("%", "percent"),
    ("s o t", "sin cos tan"),
    ("r", "√"),
    ("g", "log"),
    ("n", "ln"),
    ("q", "x²"),
    ("F5 F6", "MC MR"),
    ("F7 F8", "M+ M−"),
    ("Bksp", "⌫"),
    ("Del c", "clear"),
];

/// Translate a terminal key into a calculator key
pub fn calculator_key(key: &KeyEvent) -> Option<Key> {
    let mapped = match key.code {
        KeyCode::Char(c @ '0'..='9') => Key::Digit(c as u8 - b'0'),
        KeyCode::Char('z') => Key::DoubleZero,
        KeyCode::Char('.') | KeyCode::Char(',') => Key::Dot,
        KeyCode::Char('+') => Key::Operator(BinaryOp::Add),
        KeyCode::Char('-') => Key::Operator(BinaryOp::Subtract),
        KeyCode::Char('*') => Key::Operator(BinaryOp::Multiply),
        KeyCode::Char('/') => Key::Operator(BinaryOp::Divide),
        KeyCode::Char('^') => Key::Operator(BinaryOp::Power),
        KeyCode::Char('=') | KeyCode::Enter => Key::Equals,
        KeyCode::Char('%') => Key::Percent,
        KeyCode::Char('s') => Key::Function(UnaryFn::Sin),
        KeyCode::Char('o') => Key::Function(UnaryFn::Cos),
        KeyCode::Char('t') => Key::Function(UnaryFn::Tan),
        KeyCode::Char('r') => Key::Function(UnaryFn::Sqrt),
        KeyCode::Char('g') => Key::Function(UnaryFn::Log),
        KeyCode::Char('n') => Key::Function(UnaryFn::Ln),
        KeyCode::Char('q') => Key::Function(UnaryFn::Square),
        KeyCode::F(5) => Key::Memory(MemoryCommand::Clear),
        KeyCode::F(6) => Key::Memory(MemoryCommand::Recall),
        KeyCode::F(7) => Key::Memory(MemoryCommand::Add),
        KeyCode::F(8) => Key::Memory(MemoryCommand::Subtract),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete | KeyCode::Char('c') => Key::Clear,
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rstest::rstest;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case(KeyCode::Char('7'), Key::Digit(7))]
    #[case(KeyCode::Char('z'), Key::DoubleZero)]
    #[case(KeyCode::Char(','), Key::Dot)]
    #[case(KeyCode::Char('^'), Key::Operator(BinaryOp::Power))]
    #[case(KeyCode::Enter, Key::Equals)]
    #[case(KeyCode::Char('r'), Key::Function(UnaryFn::Sqrt))]
    #[case(KeyCode::Char('q'), Key::Function(UnaryFn::Square))]
    #[case(KeyCode::F(7), Key::Memory(MemoryCommand::Add))]
    #[case(KeyCode::Delete, Key::Clear)]
    #[case(KeyCode::Backspace, Key::Backspace)]
    fn test_bindings(#[case] code: KeyCode, #[case] expected: Key) {
        assert_eq!(calculator_key(&press(code)), Some(expected));
    }

    #[rstest]
    #[case(KeyCode::Esc)]
    #[case(KeyCode::Tab)]
    #[case(KeyCode::Char('k'))]
    fn test_unbound_keys(#[case] code: KeyCode) {
        assert_eq!(calculator_key(&press(code)), None);
    }
}
