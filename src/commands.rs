//! Key and mouse mapping for the card list.
//!
//! Input is translated into [`Action`]s here so bindings can be tested
//! without a terminal.
//!
//! # Example
//!
//! ```ignore
//! if let Some(action) = KeyMapper::map_event(&event) {
//!     app.update(action, Instant::now());
//! }
//! ```

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::event::Action;

// ============================================================================
// Key Mapper
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMapper;

impl KeyMapper {
    /// Maps any terminal event. Key releases and repeats are ignored.
    #[must_use]
    pub fn map_event(event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::map_key(*key),
            Event::Mouse(mouse) => Self::map_mouse(*mouse),
            _ => None,
        }
    }

    #[must_use]
    pub fn map_key(key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::FocusPrevious),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::FocusFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Action::FocusLast),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleFocused),
            KeyCode::Char('r') => Some(Action::Reload),
            _ => None,
        }
    }

    #[must_use]
    pub fn map_mouse(mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use rstest::rstest;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[rstest]
    #[case::q(KeyCode::Char('q'), Some(Action::Quit))]
    #[case::esc(KeyCode::Esc, Some(Action::Quit))]
    #[case::down(KeyCode::Down, Some(Action::FocusNext))]
    #[case::j(KeyCode::Char('j'), Some(Action::FocusNext))]
    #[case::up(KeyCode::Up, Some(Action::FocusPrevious))]
    #[case::k(KeyCode::Char('k'), Some(Action::FocusPrevious))]
    #[case::home(KeyCode::Home, Some(Action::FocusFirst))]
    #[case::end(KeyCode::Char('G'), Some(Action::FocusLast))]
    #[case::page_down(KeyCode::PageDown, Some(Action::PageDown))]
    #[case::page_up(KeyCode::PageUp, Some(Action::PageUp))]
    #[case::enter(KeyCode::Enter, Some(Action::ToggleFocused))]
    #[case::space(KeyCode::Char(' '), Some(Action::ToggleFocused))]
    #[case::reload(KeyCode::Char('r'), Some(Action::Reload))]
    #[case::unbound(KeyCode::Char('x'), None)]
    fn test_map_key(#[case] code: KeyCode, #[case] expected: Option<Action>) {
        assert_eq!(KeyMapper::map_key(key_event(code)), expected);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key_event(KeyCode::Char('c'))
        };
        assert_eq!(KeyMapper::map_key(key), Some(Action::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let key = KeyEvent {
            kind: KeyEventKind::Release,
            ..key_event(KeyCode::Enter)
        };
        assert_eq!(KeyMapper::map_event(&Event::Key(key)), None);
    }

    #[rstest]
    #[case::left_click(
        MouseEventKind::Down(MouseButton::Left),
        Some(Action::Click { column: 7, row: 3 })
    )]
    #[case::right_click(MouseEventKind::Down(MouseButton::Right), None)]
    #[case::wheel_down(MouseEventKind::ScrollDown, Some(Action::ScrollDown))]
    #[case::wheel_up(MouseEventKind::ScrollUp, Some(Action::ScrollUp))]
    #[case::moved(MouseEventKind::Moved, None)]
    fn test_map_mouse(#[case] kind: MouseEventKind, #[case] expected: Option<Action>) {
        let event = Event::Mouse(mouse_event(kind, 7, 3));
        assert_eq!(KeyMapper::map_event(&event), expected);
    }

    #[test]
    fn test_resize_is_not_an_action() {
        assert_eq!(KeyMapper::map_event(&Event::Resize(80, 24)), None);
    }
}
