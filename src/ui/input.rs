use crate::app::{AppState, Focus};
use crate::ui::constants::{
    focused_border, muted, CLEAR_LABEL, CURSOR_INDICATOR, INPUT_PLACEHOLDER,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// Review input box
pub struct InputRenderer;

impl InputRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let focused = app.focus == Focus::Input;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focused_border(focused))
            .title(" Review ");

        let lines = if app.input.is_empty() && !focused {
            vec![Line::from(Span::styled(INPUT_PLACEHOLDER, muted()))]
        } else {
            Self::text_lines(&app.input, focused.then_some(app.cursor_pos))
        };

        // Keep the line holding the cursor on screen
        let visible = area.height.saturating_sub(2);
        let cursor_line = Self::cursor_line(&app.input, app.cursor_pos);
        let scroll = cursor_line.saturating_sub(visible.saturating_sub(1));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn text_lines(input: &str, cursor: Option<usize>) -> Vec<Line<'static>> {
        let mut display = String::with_capacity(input.len() + 4);
        for (index, c) in input.chars().enumerate() {
            if cursor == Some(index) {
                display.push(CURSOR_INDICATOR);
            }
            display.push(c);
        }
        if cursor.is_some_and(|pos| pos >= input.chars().count()) {
            display.push(CURSOR_INDICATOR);
        }
        display.split('\n').map(|line| Line::from(line.to_string())).collect()
    }

    fn cursor_line(input: &str, cursor_pos: usize) -> u16 {
        let newlines = input.chars().take(cursor_pos).filter(|&c| c == '\n').count();
        u16::try_from(newlines).unwrap_or(u16::MAX)
    }
}

// Analyze and clear buttons
pub struct ButtonRowRenderer;

impl ButtonRowRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let button = &app.submit_button;
        let submit_style = if button.is_enabled() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", button.label()), submit_style),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", CLEAR_LABEL),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            Span::styled("   ⏎ analyze · Ctrl+L clear · F1 help", muted()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
