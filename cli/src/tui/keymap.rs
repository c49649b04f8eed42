//! Key bindings, per controller mode.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tapas_core::{Event, Mode};

const PAGE: isize = 10;

/// Translate a key press into a controller event for the current mode.
pub fn map_key(mode: Mode, key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }

    match mode {
        Mode::Idle => idle(key.code),
        Mode::Searching => search(key),
        Mode::DetailsOpen => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Event::CloseDetails),
            _ => None,
        },
        Mode::KillConfirmOpen => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Event::ConfirmKill { force: false }),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Event::ConfirmKill { force: true }),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                Some(Event::CancelKill)
            }
            _ => None,
        },
    }
}

fn idle(code: KeyCode) -> Option<Event> {
    let event = match code {
        KeyCode::Up => Event::MoveSelection(-1),
        KeyCode::Down | KeyCode::Char('j') => Event::MoveSelection(1),
        KeyCode::PageUp => Event::MoveSelection(-PAGE),
        KeyCode::PageDown => Event::MoveSelection(PAGE),
        KeyCode::Home | KeyCode::Char('g') => Event::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => Event::SelectLast,
        KeyCode::Enter => Event::OpenDetails,
        KeyCode::Char('k') => Event::RequestKill,
        KeyCode::Char('/') => Event::ToggleSearch,
        KeyCode::Char('s') => Event::CycleSort,
        KeyCode::Char('r') => Event::Refresh,
        KeyCode::Char('w') => Event::ToggleWatch,
        KeyCode::Char('q') => Event::Quit,
        _ => return None,
    };
    Some(event)
}

fn search(key: KeyEvent) -> Option<Event> {
    match key.code {
        KeyCode::Esc => Some(Event::SearchCancel),
        KeyCode::Enter => Some(Event::SearchSubmit),
        KeyCode::Backspace => Some(Event::SearchBackspace),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(Event::SearchInput(c))
        }
        _ => None,
    }
}
