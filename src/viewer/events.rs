//! Keyboard mapping and the interaction state machine.
//!
//! Key names are DOM `KeyboardEvent.key` values (`"ArrowLeft"`, `"PageDown"`,
//! `"a"`, ...). Mapping a key to an [`Action`] is pure; [`SheetView`] decides
//! what the action does.
//!
//! [`SheetView`]: super::SheetView

use serde::Serialize;

/// One-cell movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key press asks the view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move { direction: Direction, extend: bool },
    PageUp,
    PageDown,
    FarLeft,
    FarRight,
    Top,
    Bottom,
    Copy,
    Cut,
    SelectAll,
    Delete,
    /// Open an edit on the cursor cell with its current text.
    BeginEdit,
    /// Type a character: appends while editing, otherwise starts an edit
    /// that replaces the cell text.
    Type(char),
    /// Remove the last typed character.
    EditBackspace,
    /// Commit the open edit, then optionally move the cursor.
    CommitEdit { then: Option<Direction> },
    CancelEdit,
}

/// Pointer/keyboard interaction state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    /// No extend gesture in progress.
    #[default]
    Idle,
    /// A shift-modified move or a mouse drag is growing the selection.
    Extending,
}

fn arrow(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        _ => None,
    }
}

/// A key that types a single visible character.
fn printable(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let ch = chars.next()?;
    (chars.next().is_none() && !ch.is_control()).then_some(ch)
}

/// Map a key press to an action. `editing` selects the edit-session keymap.
pub fn key_action(key: &str, ctrl: bool, shift: bool, editing: bool) -> Option<Action> {
    if editing {
        return editing_action(key, ctrl, shift);
    }

    if ctrl {
        return match key {
            "c" | "C" => Some(Action::Copy),
            "x" | "X" => Some(Action::Cut),
            "a" | "A" => Some(Action::SelectAll),
            "Home" => Some(Action::Top),
            "End" => Some(Action::Bottom),
            _ => None,
        };
    }

    if let Some(direction) = arrow(key) {
        return Some(Action::Move {
            direction,
            extend: shift,
        });
    }

    match key {
        "PageUp" => Some(Action::PageUp),
        "PageDown" => Some(Action::PageDown),
        "Home" => Some(Action::FarLeft),
        "End" => Some(Action::FarRight),
        "Delete" | "Backspace" => Some(Action::Delete),
        "F2" | "Enter" => Some(Action::BeginEdit),
        "Tab" => Some(Action::Move {
            direction: if shift {
                Direction::Left
            } else {
                Direction::Right
            },
            extend: false,
        }),
        _ => printable(key).map(Action::Type),
    }
}

fn editing_action(key: &str, ctrl: bool, shift: bool) -> Option<Action> {
    if ctrl {
        return None;
    }
    match key {
        "Enter" => Some(Action::CommitEdit {
            then: Some(if shift { Direction::Up } else { Direction::Down }),
        }),
        "Tab" => Some(Action::CommitEdit {
            then: Some(if shift {
                Direction::Left
            } else {
                Direction::Right
            }),
        }),
        "Escape" => Some(Action::CancelEdit),
        "Backspace" => Some(Action::EditBackspace),
        _ => printable(key).map(Action::Type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ArrowLeft", false, Some(Action::Move { direction: Direction::Left, extend: false }); "left")]
    #[test_case("ArrowDown", true, Some(Action::Move { direction: Direction::Down, extend: true }); "shift down extends")]
    #[test_case("PageDown", false, Some(Action::PageDown); "page down")]
    #[test_case("Home", false, Some(Action::FarLeft); "home")]
    #[test_case("End", false, Some(Action::FarRight); "end")]
    #[test_case("Delete", false, Some(Action::Delete); "delete")]
    #[test_case("Backspace", false, Some(Action::Delete); "backspace clears")]
    #[test_case("F2", false, Some(Action::BeginEdit); "f2")]
    #[test_case("q", false, Some(Action::Type('q')); "printable")]
    #[test_case("Q", true, Some(Action::Type('Q')); "shifted printable")]
    #[test_case("Shift", true, None; "bare shift")]
    #[test_case("Escape", false, None; "escape idle")]
    fn test_idle_keys(key: &str, shift: bool, expected: Option<Action>) {
        assert_eq!(key_action(key, false, shift, false), expected);
    }

    #[test_case("c", Some(Action::Copy); "copy")]
    #[test_case("X", Some(Action::Cut); "cut upper")]
    #[test_case("a", Some(Action::SelectAll); "select all")]
    #[test_case("Home", Some(Action::Top); "top")]
    #[test_case("End", Some(Action::Bottom); "bottom")]
    #[test_case("z", None; "unmapped")]
    fn test_ctrl_keys(key: &str, expected: Option<Action>) {
        assert_eq!(key_action(key, true, false, false), expected);
    }

    #[test_case("Enter", false, Some(Action::CommitEdit { then: Some(Direction::Down) }); "enter")]
    #[test_case("Tab", false, Some(Action::CommitEdit { then: Some(Direction::Right) }); "tab")]
    #[test_case("Tab", true, Some(Action::CommitEdit { then: Some(Direction::Left) }); "shift tab")]
    #[test_case("Escape", false, Some(Action::CancelEdit); "escape")]
    #[test_case("Backspace", false, Some(Action::EditBackspace); "backspace")]
    #[test_case(" ", false, Some(Action::Type(' ')); "space")]
    #[test_case("ArrowLeft", false, None; "arrows ignored")]
    fn test_editing_keys(key: &str, shift: bool, expected: Option<Action>) {
        assert_eq!(key_action(key, false, shift, true), expected);
    }

    #[test]
    fn test_ctrl_while_editing_is_ignored() {
        assert_eq!(key_action("c", true, false, true), None);
    }
}
