use crate::app::{AppMode, AppState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Status line renderer
pub struct StatusLineRenderer;

impl StatusLineRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let (content, style) = Self::get_content_and_style(app);
        let content = fit_to_width(&content, usize::from(area.width));
        frame.render_widget(Paragraph::new(content).style(style), area);
    }

    fn get_content_and_style(app: &AppState) -> (String, Style) {
        match app.mode {
            AppMode::Help => Self::render_help_mode(),
            AppMode::Normal => Self::render_normal_mode(app),
        }
    }

    fn render_normal_mode(app: &AppState) -> (String, Style) {
        if let Some(ref msg) = app.message {
            let style = Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD);
            return (msg.clone(), style);
        }

        let state = if app.is_busy() {
            "analyzing".to_string()
        } else if let Some(result) = &app.last_result {
            format!("{} findings", result.finding_count())
        } else {
            "ready".to_string()
        };
        let content = format!("sentiscope | {} | {}", app.config.endpoint, state);

        (content, Style::default().fg(Color::Gray).bg(Color::Black))
    }

    fn render_help_mode() -> (String, Style) {
        let content = String::from("Press ESC or F1 to close help");
        let style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        (content, style)
    }
}

/// Cuts `text` to `width` terminal columns, ending in an ellipsis when shortened.
fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut fitted = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.push('…');
    fitted
}
