use ratatui::style::{Color, Modifier, Style};

// Constants for rendering
pub const CURSOR_INDICATOR: char = '▌';
pub const INPUT_HEIGHT: u16 = 6;
pub const NOTICE_WIDTH_PERCENT: u16 = 60;
pub const NOTICE_HEIGHT: u16 = 7;
pub const INPUT_PLACEHOLDER: &str = "Type or paste a review, then press Enter";
pub const PANEL_HINT: &str = "Results appear here after an analysis.";
pub const NOTICE_DISMISS_HINT: &str = "Press Enter to dismiss";
pub const CLEAR_LABEL: &str = "Clear";

// Sentiment styles
pub mod sentiment {
    use super::*;

    pub fn badge(positive: bool) -> Style {
        let bg = if positive { Color::Green } else { Color::Red };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn marker(positive: bool) -> Style {
        let fg = if positive { Color::Green } else { Color::Red };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }
}

pub fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}
