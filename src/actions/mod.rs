mod editing;
mod view;

use crate::app::AppState;
use crate::controller::RequestController;
use anyhow::Result;

// Re-export all public functions from submodules
pub use editing::*;
pub use view::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Application control
    Quit,

    // Request lifecycle
    Submit,
    Clear,
    DismissNotice,

    // Editing
    TypeChar(char),
    InsertNewline,
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    MoveCursorWordLeft,
    MoveCursorWordRight,
    DeleteWordBackward,
    DeleteToEnd,
    DeleteToStart,
    PasteAtCursor,

    // View control
    ToggleFocus,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Help
    ShowHelp,
    CloseHelp,
}

pub fn execute_action(
    action: Action,
    app: &mut AppState,
    controller: &mut RequestController,
) -> Result<()> {
    match action {
        Action::Quit => {
            app.running = false;
        }

        Action::Submit => controller.submit(app),
        Action::Clear => controller.clear(app),
        Action::DismissNotice => app.dismiss_notice(),

        // Editing
        Action::TypeChar(c) => editing::type_char(app, c),
        Action::InsertNewline => editing::insert_newline(app),
        Action::Backspace => editing::backspace(app),
        Action::Delete => editing::delete_char(app),
        Action::MoveCursorLeft => editing::move_cursor_left(app),
        Action::MoveCursorRight => editing::move_cursor_right(app),
        Action::MoveCursorHome => editing::move_cursor_home(app),
        Action::MoveCursorEnd => editing::move_cursor_end(app),
        Action::MoveCursorWordLeft => editing::move_cursor_word_left(app),
        Action::MoveCursorWordRight => editing::move_cursor_word_right(app),
        Action::DeleteWordBackward => editing::delete_word_backward(app),
        Action::DeleteToEnd => editing::delete_to_end(app),
        Action::DeleteToStart => editing::delete_to_start(app),
        Action::PasteAtCursor => editing::paste_at_cursor(app),

        // View control
        Action::ToggleFocus => view::toggle_focus(app),
        Action::ScrollUp => view::scroll_up(app),
        Action::ScrollDown => view::scroll_down(app),
        Action::PageUp => view::page_up(app),
        Action::PageDown => view::page_down(app),

        // Help
        Action::ShowHelp => view::show_help(app),
        Action::CloseHelp => view::close_help(app),
    }
    Ok(())
}
