//! Frontend-agnostic key events.
//!
//! Every frontend maps its native keyboard input to this enum. The shell
//! controllers (input line, palette) never see raw platform events.

use serde::{Deserialize, Serialize};

/// A key press, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Submit the input line / select the active palette item.
    Enter,
    /// Delete-left in the focused input.
    Backspace,
    /// Autocomplete the input line.
    Tab,
    /// Close the palette overlay.
    Escape,
    /// History recall (input) / move selection up (palette).
    Up,
    /// History recall (input) / move selection down (palette).
    Down,
    /// Control chord, lowercased (`Ctrl('c')`, `Ctrl('k')`, ...).
    Ctrl(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_key_equality() {
        assert_eq!(Key::Char('a'), Key::Char('a'));
        assert_ne!(Key::Char('a'), Key::Char('b'));
    }

    #[test]
    fn ctrl_differs_from_char() {
        assert_ne!(Key::Ctrl('c'), Key::Char('c'));
    }

    #[test]
    fn keys_are_copy() {
        let k = Key::Enter;
        let k2 = k;
        assert_eq!(k, k2);
    }

    #[test]
    fn keys_hash_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Key::Up);
        set.insert(Key::Down);
        set.insert(Key::Up);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn key_serde_roundtrip() {
        let k = Key::Ctrl('k');
        let json = serde_json::to_string(&k).unwrap();
        let k2: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(k, k2);
    }
}
