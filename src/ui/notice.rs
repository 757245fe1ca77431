use crate::controller::SubmitError;
use crate::ui::constants::{muted, NOTICE_DISMISS_HINT, NOTICE_HEIGHT, NOTICE_WIDTH_PERCENT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

// Modal notice drawn over the rest of the screen
pub struct NoticeRenderer;

impl NoticeRenderer {
    pub fn render(frame: &mut Frame, notice: &SubmitError, area: Rect) {
        let popup = centered_rect(NOTICE_WIDTH_PERCENT, NOTICE_HEIGHT, area);
        let color = match notice {
            SubmitError::EmptyInput => Color::Yellow,
            SubmitError::Application(_) | SubmitError::Transport(_) => Color::Red,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                " Notice ",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        let text = vec![
            Line::from(notice.to_string()),
            Line::from(""),
            Line::from(Span::styled(NOTICE_DISMISS_HINT, muted())),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

/// A rect of `percent_x` width and fixed height centred in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
