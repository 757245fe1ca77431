use crate::app::{AppState, Focus};
use crate::model::Sentiment;
use crate::render::{self, AspectEntry, FindingEntry, ResultView};
use crate::ui::constants::{focused_border, muted, sentiment, PANEL_HINT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

// Result panel: sentiment badge followed by the aspect entries
pub struct ResultPanelRenderer;

impl ResultPanelRenderer {
    pub fn render(frame: &mut Frame, app: &AppState, area: Rect) {
        let panel = &app.panel;
        let view = match (&panel.view, panel.visible) {
            (Some(view), true) => view,
            _ => {
                let hint = Paragraph::new(Line::from(Span::styled(PANEL_HINT, muted())))
                    .alignment(Alignment::Center);
                frame.render_widget(hint, area);
                return;
            }
        };

        let elapsed = if app.config.animate {
            panel.since_shown()
        } else {
            None
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(focused_border(app.focus == Focus::Results))
            .title(" Result ");
        let paragraph = Paragraph::new(Self::build_lines(view, elapsed))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((panel.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    pub fn build_lines(view: &ResultView, elapsed: Option<Duration>) -> Vec<Line<'static>> {
        let positive = view.badge.sentiment == Sentiment::Positive;
        let mut badge = vec![
            Span::raw("Overall sentiment: "),
            Span::styled(format!(" {} ", view.badge.label), sentiment::badge(positive)),
        ];
        if let Some(confidence) = &view.badge.confidence {
            badge.push(Span::styled(format!("  {}", confidence), muted()));
        }

        let mut lines = vec![Line::from(badge), Line::from("")];
        for entry in render::revealed(&view.entries, elapsed) {
            match entry {
                AspectEntry::Placeholder(text) => {
                    lines.push(Line::from(Span::styled(*text, muted())).alignment(Alignment::Center));
                }
                AspectEntry::Finding(finding) => {
                    Self::push_finding(&mut lines, finding);
                    lines.push(Line::from(""));
                }
            }
        }
        lines
    }

    fn push_finding(lines: &mut Vec<Line<'static>>, finding: &FindingEntry) {
        let positive = finding.sentiment == Sentiment::Positive;
        lines.push(Line::from(Span::styled(
            finding.aspect.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", finding.quote),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(finding.marker, sentiment::marker(positive)),
        ]));
        if let Some(confidence) = &finding.confidence {
            lines.push(Line::from(Span::styled(format!("  {}", confidence), muted())));
        }
    }
}
