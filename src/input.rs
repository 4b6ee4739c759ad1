use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissError,
    InsertChar(char),
    DeleteChar,
    ClearInput,
    SearchNow,
    ToggleTheme,
    MoveUp,
    MoveDown,
    OpenSelected,
    None,
}

/// Captures the UI state needed to interpret a key press.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub has_error: bool,
}

/// Printable keys always go to the username field, so commands live on
/// control chords and non-character keys.
pub fn map_key(key: KeyEvent, ctx: &InputContext) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('o') => Action::OpenSelected,
            KeyCode::Char('u') => Action::ClearInput,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => {
            if ctx.has_error {
                Action::DismissError
            } else {
                Action::Quit
            }
        }
        KeyCode::Enter => Action::SearchNow,
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Action::InsertChar(c),
        _ => Action::None,
    }
}
