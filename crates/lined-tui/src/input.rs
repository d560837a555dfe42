use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Raw input actions.
/// The app layer decides what these mean for the current prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Char(char),
    Backspace,
    Submit,
    Cancel,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    /// Ctrl-C: leave without saving
    ForceQuit,
    /// Ctrl-D on an empty prompt
    EndOfInput,
    None,
}

/// Read a key event and translate to an Action.
pub fn read_action() -> std::io::Result<Action> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(Action::None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
        _ => Ok(Action::None),
    }
}

pub fn map_key(KeyEvent { code, modifiers, .. }: KeyEvent) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Action::ForceQuit,
            KeyCode::Char('d') => Action::EndOfInput,
            _ => Action::None,
        };
    }

    match code {
        KeyCode::Char(c) => Action::Char(c),
        KeyCode::Tab => Action::Char('\t'),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        _ => Action::None,
    }
}
