use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// Help section structure
pub struct HelpSection {
    pub title: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

// Help section definitions
pub const SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Review:",
        items: &[
            ("⏎        ", "Analyze the review"),
            ("Alt+⏎    ", "New line"),
            ("Ctrl+L   ", "Clear input and hide results"),
            ("Ctrl+V   ", "Paste from clipboard"),
        ],
    },
    HelpSection {
        title: "Editing:",
        items: &[
            ("←/→      ", "Move cursor"),
            ("Ctrl+←/→ ", "Move by word"),
            ("Home/End ", "Start / end of text"),
            ("Ctrl+W   ", "Delete word"),
            ("Ctrl+U/K ", "Delete to start / end"),
        ],
    },
    HelpSection {
        title: "Results:",
        items: &[
            ("⇥        ", "Switch focus input / results"),
            ("↑/↓ j/k  ", "Scroll"),
            ("PgUp/PgDn", "Scroll a page"),
        ],
    },
    HelpSection {
        title: "General:",
        items: &[("F1       ", "Help"), ("Ctrl+C/Q ", "Quit")],
    },
];

// Help renderer
pub struct HelpRenderer;

impl HelpRenderer {
    pub fn render(frame: &mut Frame, area: Rect) {
        let help_text = Self::build_help_text();
        let block = Block::default().borders(Borders::ALL).title(" Help ");
        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }

    fn build_help_text() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![Span::styled(
                "sentiscope Help",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        for section in SECTIONS {
            lines.push(Line::from(vec![Span::styled(
                section.title,
                Style::default().add_modifier(Modifier::BOLD),
            )]));

            for (key, desc) in section.items {
                lines.push(Line::from(format!("  {}  {}", key, desc)));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from("Press ESC or F1 to close help"));
        lines
    }
}
