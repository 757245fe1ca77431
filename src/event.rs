use crate::actions::Action;
use crate::app::{AppMode, AppState, Focus};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub fn handle_events(app: &mut AppState) -> Result<Option<Action>> {
    if event::poll(Duration::from_millis(10))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                return Ok(None);
            }
            return Ok(handle_key_event(app, key));
        }
    }
    Ok(None)
}

pub fn handle_key_event(app: &AppState, key: KeyEvent) -> Option<Action> {
    // Quitting works from anywhere
    if let (KeyCode::Char('c') | KeyCode::Char('q'), KeyModifiers::CONTROL) =
        (key.code, key.modifiers)
    {
        return Some(Action::Quit);
    }

    if app.notice.is_some() {
        return handle_notice(key);
    }

    match app.mode {
        AppMode::Help => handle_help_mode(key),
        AppMode::Normal => match app.focus {
            Focus::Input => handle_input_focus(app, key),
            Focus::Results => handle_results_focus(app, key),
        },
    }
}

fn handle_notice(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Some(Action::DismissNotice),
        _ => None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) => Some(Action::CloseHelp),
        _ => None,
    }
}

/// Enter activates the analyze button, which does nothing while disabled.
fn submit_if_enabled(app: &AppState) -> Option<Action> {
    app.submit_button.is_enabled().then_some(Action::Submit)
}

fn handle_shared(app: &AppState, key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        (Enter, KeyModifiers::NONE) => submit_if_enabled(app),
        (Char('l'), KeyModifiers::CONTROL) => Some(Action::Clear),
        (Tab, _) | (BackTab, _) => Some(Action::ToggleFocus),
        (F(1), _) => Some(Action::ShowHelp),
        (PageUp, _) => Some(Action::PageUp),
        (PageDown, _) => Some(Action::PageDown),
        _ => None,
    }
}

fn handle_input_focus(app: &AppState, key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    if let Some(action) = handle_shared(app, key) {
        return Some(action);
    }

    match (key.code, key.modifiers) {
        (Enter, KeyModifiers::ALT) => Some(Action::InsertNewline),
        (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(Action::TypeChar(c)),

        // Deletion
        (Backspace, KeyModifiers::NONE) => Some(Action::Backspace),
        (Backspace, KeyModifiers::CONTROL) => Some(Action::DeleteWordBackward),
        (Backspace, KeyModifiers::ALT) => Some(Action::DeleteWordBackward),
        (Char('w'), KeyModifiers::CONTROL) => Some(Action::DeleteWordBackward),
        (Delete, _) => Some(Action::Delete),
        (Char('k'), KeyModifiers::CONTROL) => Some(Action::DeleteToEnd),
        (Char('u'), KeyModifiers::CONTROL) => Some(Action::DeleteToStart),

        // Movement
        (Left, KeyModifiers::NONE) => Some(Action::MoveCursorLeft),
        (Right, KeyModifiers::NONE) => Some(Action::MoveCursorRight),
        (Left, KeyModifiers::CONTROL) | (Left, KeyModifiers::ALT) => {
            Some(Action::MoveCursorWordLeft)
        }
        (Right, KeyModifiers::CONTROL) | (Right, KeyModifiers::ALT) => {
            Some(Action::MoveCursorWordRight)
        }
        (Home, _) | (Char('a'), KeyModifiers::CONTROL) => Some(Action::MoveCursorHome),
        (End, _) | (Char('e'), KeyModifiers::CONTROL) => Some(Action::MoveCursorEnd),
        (Up, _) => Some(Action::ScrollUp),
        (Down, _) => Some(Action::ScrollDown),

        // Clipboard
        (Char('v'), KeyModifiers::CONTROL) => Some(Action::PasteAtCursor),

        _ => None,
    }
}

fn handle_results_focus(app: &AppState, key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    if let Some(action) = handle_shared(app, key) {
        return Some(action);
    }

    match key.code {
        Up | Char('k') => Some(Action::ScrollUp),
        Down | Char('j') => Some(Action::ScrollDown),
        Char('c') => Some(Action::Clear),
        Char('?') => Some(Action::ShowHelp),
        Char('q') | Esc => Some(Action::ToggleFocus),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::controller::{BusyControl, SubmitError};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn test_enter_submits_when_idle() {
        let app = app();
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Enter)),
            Some(Action::Submit)
        ));
    }

    #[test]
    fn test_enter_ignored_while_busy() {
        let mut app = app();
        app.submit_button.set_busy(true);
        assert!(handle_key_event(&app, key(KeyCode::Enter)).is_none());
        // Typing is still allowed
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Char('x'))),
            Some(Action::TypeChar('x'))
        ));
    }

    #[test]
    fn test_notice_captures_keys() {
        let mut app = app();
        app.notice = Some(SubmitError::EmptyInput);
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Enter)),
            Some(Action::DismissNotice)
        ));
        assert!(handle_key_event(&app, key(KeyCode::Char('a'))).is_none());
        assert!(matches!(
            handle_key_event(&app, ctrl('c')),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_shift_chars_are_typed() {
        let app = app();
        let event = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert!(matches!(
            handle_key_event(&app, event),
            Some(Action::TypeChar('G'))
        ));
    }

    #[test]
    fn test_results_focus_keys() {
        let mut app = app();
        app.focus = Focus::Results;
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Char('j'))),
            Some(Action::ScrollDown)
        ));
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Char('c'))),
            Some(Action::Clear)
        ));
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Tab)),
            Some(Action::ToggleFocus)
        ));
    }

    #[test]
    fn test_help_mode_closes() {
        let mut app = app();
        app.mode = AppMode::Help;
        assert!(matches!(
            handle_key_event(&app, key(KeyCode::Esc)),
            Some(Action::CloseHelp)
        ));
        assert!(handle_key_event(&app, key(KeyCode::Enter)).is_none());
    }
}
