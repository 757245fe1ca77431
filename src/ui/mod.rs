use crate::app::{AppMode, AppState};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub mod constants;
pub mod help;
pub mod input;
pub mod notice;
pub mod result_panel;
pub mod status_line;


use constants::INPUT_HEIGHT;
use help::HelpRenderer;
use input::{ButtonRowRenderer, InputRenderer};
use notice::NoticeRenderer;
use result_panel::ResultPanelRenderer;
use status_line::StatusLineRenderer;

// Main render function
pub fn render(frame: &mut Frame, app: &AppState) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    InputRenderer::render(frame, app, chunks[0]);
    ButtonRowRenderer::render(frame, app, chunks[1]);

    match app.mode {
        AppMode::Help => HelpRenderer::render(frame, chunks[3]),
        AppMode::Normal => ResultPanelRenderer::render(frame, app, chunks[3]),
    }

    StatusLineRenderer::render(frame, app, chunks[4]);

    if let Some(notice) = &app.notice {
        NoticeRenderer::render(frame, notice, size);
    }
}
