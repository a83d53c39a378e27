use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Status;

/// Why a proposed input value was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Rejection {
    /// the session is over and the input surface is disabled
    Finished,
    /// the proposal is shorter than what was already typed
    Shrink,
    /// the proposal is longer than the target
    Overflow,
}

/// Checks a proposed full input value against the current session.
///
/// Lengths are counted in chars. A finished session rejects everything,
/// regardless of length.
pub fn check(proposed: &str, typed: &str, target: &str, status: Status) -> Result<(), Rejection> {
    if status == Status::Finished {
        return Err(Rejection::Finished);
    }

    let proposed_len = proposed.chars().count();
    if proposed_len < typed.chars().count() {
        return Err(Rejection::Shrink);
    }
    if proposed_len > target.chars().count() {
        return Err(Rejection::Overflow);
    }

    Ok(())
}

/// What a raw key press means for the race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    NewText,
    Retry,
    Type(char),
    /// deletion and cursor movement, swallowed before it reaches the session
    Suppressed,
    Ignored,
}

/// Maps a key event to a [`KeyAction`].
///
/// Bindings that share a letter with typing (`n`, `r`, `q`) only apply once
/// the race is finished, when typing is disabled anyway.
pub fn classify_key(key: KeyEvent, status: Status) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignored;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            KeyCode::Char('n') => KeyAction::NewText,
            KeyCode::Char('r') => KeyAction::Retry,
            _ => KeyAction::Ignored,
        };
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab => KeyAction::NewText,
        KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down => KeyAction::Suppressed,
        KeyCode::Char(c) if status == Status::Finished => match c {
            'n' => KeyAction::NewText,
            'r' => KeyAction::Retry,
            'q' => KeyAction::Quit,
            _ => KeyAction::Ignored,
        },
        KeyCode::Char(c) => KeyAction::Type(c),
        _ => KeyAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_accepts_growth_within_target() {
        assert_eq!(check("c", "", "cat", Status::NotStarted), Ok(()));
        assert_eq!(check("ca", "c", "cat", Status::Running), Ok(()));
        assert_eq!(check("cat", "ca", "cat", Status::Running), Ok(()));
    }

    #[test]
    fn test_accepts_same_length() {
        assert_eq!(check("ca", "ca", "cat", Status::Running), Ok(()));
    }

    #[test]
    fn test_rejects_shrink() {
        assert_eq!(check("c", "ca", "cat", Status::Running), Err(Rejection::Shrink));
        assert_eq!(check("", "c", "cat", Status::Running), Err(Rejection::Shrink));
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(
            check("cats", "cat", "cat", Status::Running),
            Err(Rejection::Overflow)
        );
        assert_eq!(
            check("catapult", "", "cat", Status::NotStarted),
            Err(Rejection::Overflow)
        );
    }

    #[test]
    fn test_finished_rejects_everything() {
        assert_eq!(
            check("cat", "cat", "cat", Status::Finished),
            Err(Rejection::Finished)
        );
        assert_eq!(check("", "cat", "cat", Status::Finished), Err(Rejection::Finished));
    }

    #[test]
    fn test_lengths_are_counted_in_chars() {
        // "é" is two bytes but one char
        assert_eq!(check("café", "caf", "café", Status::Running), Ok(()));
    }

    #[test]
    fn test_deletion_and_navigation_keys_are_suppressed() {
        for code in [
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Down,
        ] {
            assert_eq!(classify_key(key(code), Status::Running), KeyAction::Suppressed);
        }
    }

    #[test]
    fn test_chars_are_typed_while_racing() {
        assert_eq!(
            classify_key(key(KeyCode::Char('n')), Status::NotStarted),
            KeyAction::Type('n')
        );
        assert_eq!(
            classify_key(key(KeyCode::Char(' ')), Status::Running),
            KeyAction::Type(' ')
        );
    }

    #[test]
    fn test_shifted_chars_are_typed() {
        let k = KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert_eq!(classify_key(k, Status::NotStarted), KeyAction::Type('T'));
    }

    #[test]
    fn test_control_bindings() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(classify_key(ctrl('c'), Status::Running), KeyAction::Quit);
        assert_eq!(classify_key(ctrl('n'), Status::Running), KeyAction::NewText);
        assert_eq!(classify_key(ctrl('r'), Status::Running), KeyAction::Retry);
        assert_eq!(classify_key(ctrl('x'), Status::Running), KeyAction::Ignored);
    }

    #[test]
    fn test_finished_letter_bindings() {
        assert_eq!(
            classify_key(key(KeyCode::Char('n')), Status::Finished),
            KeyAction::NewText
        );
        assert_eq!(
            classify_key(key(KeyCode::Char('r')), Status::Finished),
            KeyAction::Retry
        );
        assert_eq!(
            classify_key(key(KeyCode::Char('q')), Status::Finished),
            KeyAction::Quit
        );
        assert_matches!(
            classify_key(key(KeyCode::Char('x')), Status::Finished),
            KeyAction::Ignored
        );
    }

    #[test]
    fn test_esc_and_tab() {
        assert_eq!(classify_key(key(KeyCode::Esc), Status::Running), KeyAction::Quit);
        assert_eq!(classify_key(key(KeyCode::Tab), Status::Running), KeyAction::NewText);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut k = key(KeyCode::Char('a'));
        k.kind = KeyEventKind::Release;
        assert_eq!(classify_key(k, Status::Running), KeyAction::Ignored);
    }

    #[test]
    fn test_enter_is_ignored() {
        assert_eq!(classify_key(key(KeyCode::Enter), Status::Running), KeyAction::Ignored);
    }
}
