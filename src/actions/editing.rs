use crate::app::AppState;
use clipboard::{ClipboardContext, ClipboardProvider};

// The cursor counts characters, the buffer is indexed by bytes.
fn byte_index(buffer: &str, char_pos: usize) -> usize {
    buffer
        .char_indices()
        .nth(char_pos)
        .map(|(index, _)| index)
        .unwrap_or(buffer.len())
}

fn char_len(buffer: &str) -> usize {
    buffer.chars().count()
}

fn char_at(buffer: &str, char_pos: usize) -> Option<char> {
    buffer.chars().nth(char_pos)
}

fn is_space(c: Option<char>) -> bool {
    c.is_some_and(char::is_whitespace)
}

pub fn type_char(app: &mut AppState, c: char) {
    let at = byte_index(&app.input, app.cursor_pos);
    app.input.insert(at, c);
    app.cursor_pos += 1;
}

pub fn insert_newline(app: &mut AppState) {
    type_char(app, '\n');
}

pub fn backspace(app: &mut AppState) {
    if app.cursor_pos > 0 {
        app.cursor_pos -= 1;
        let at = byte_index(&app.input, app.cursor_pos);
        app.input.remove(at);
    }
}

pub fn delete_char(app: &mut AppState) {
    if app.cursor_pos < char_len(&app.input) {
        let at = byte_index(&app.input, app.cursor_pos);
        app.input.remove(at);
    }
}

pub fn move_cursor_left(app: &mut AppState) {
    app.cursor_pos = app.cursor_pos.saturating_sub(1);
}

pub fn move_cursor_right(app: &mut AppState) {
    if app.cursor_pos < char_len(&app.input) {
        app.cursor_pos += 1;
    }
}

pub fn move_cursor_home(app: &mut AppState) {
    app.cursor_pos = 0;
}

pub fn move_cursor_end(app: &mut AppState) {
    app.cursor_pos = char_len(&app.input);
}

pub fn move_cursor_word_left(app: &mut AppState) {
    let buffer = &app.input;
    let mut pos = app.cursor_pos;

    // Move past any spaces
    while pos > 0 && is_space(char_at(buffer, pos - 1)) {
        pos -= 1;
    }

    // Move to the start of the word
    while pos > 0 && !is_space(char_at(buffer, pos - 1)) {
        pos -= 1;
    }

    app.cursor_pos = pos;
}

pub fn move_cursor_word_right(app: &mut AppState) {
    let buffer = &app.input;
    let len = char_len(buffer);
    let mut pos = app.cursor_pos;

    // Move past current word
    while pos < len && !is_space(char_at(buffer, pos)) {
        pos += 1;
    }

    // Move past any spaces
    while pos < len && is_space(char_at(buffer, pos)) {
        pos += 1;
    }

    app.cursor_pos = pos;
}

pub fn delete_word_backward(app: &mut AppState) {
    if app.cursor_pos == 0 {
        return;
    }

    let end = byte_index(&app.input, app.cursor_pos);
    move_cursor_word_left(app);
    let start = byte_index(&app.input, app.cursor_pos);
    app.input.replace_range(start..end, "");
}

pub fn delete_to_end(app: &mut AppState) {
    let at = byte_index(&app.input, app.cursor_pos);
    app.input.truncate(at);
}

pub fn delete_to_start(app: &mut AppState) {
    let at = byte_index(&app.input, app.cursor_pos);
    app.input.replace_range(..at, "");
    app.cursor_pos = 0;
}

pub fn paste_at_cursor(app: &mut AppState) {
    let content = match ClipboardContext::new().and_then(|mut ctx| ctx.get_contents()) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(error = %err, "clipboard unavailable");
            app.set_message("Clipboard unavailable");
            return;
        }
    };
    insert_text(app, &content);
}

/// Inserts text at the cursor, dropping carriage returns and expanding tabs.
pub fn insert_text(app: &mut AppState, text: &str) {
    let cleaned = text.replace('\r', "").replace('\t', "  ");
    let at = byte_index(&app.input, app.cursor_pos);
    app.input.insert_str(at, &cleaned);
    app.cursor_pos += char_len(&cleaned);
}
