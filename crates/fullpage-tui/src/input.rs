use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// One wheel tick; positive moves toward later sections
    Wheel(i32),
    /// Left click at a cell
    Click { column: u16, row: u16 },
    /// Pointer moved to a cell
    Hover { column: u16, row: u16 },
    None,
}

/// Keys only quit; navigation is wheel-driven
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}

pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Wheel(1),
        MouseEventKind::ScrollUp => Action::Wheel(-1),
        MouseEventKind::Down(MouseButton::Left) => Action::Click {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Moved => Action::Hover {
            column: mouse.column,
            row: mouse.row,
        },
        _ => Action::None,
    }
}
