use crate::config::AppConfig;
use crate::controller::{BusyControl, SubmitError};
use crate::model::ClassificationResult;
use crate::render::ResultView;
use std::time::{Duration, Instant};

pub const IDLE_LABEL: &str = "⚡ Analyze Now";
pub const BUSY_LABEL: &str = "⏳ Analyzing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
}

/// Which part of the screen receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// The analyze button. Disabled exactly while a request is in flight.
#[derive(Debug, Default)]
pub struct SubmitButton {
    busy: bool,
}

impl SubmitButton {
    pub fn label(&self) -> &'static str {
        if self.busy {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy
    }
}

impl BusyControl for SubmitButton {
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn is_busy(&self) -> bool {
        self.busy
    }
}

#[derive(Debug, Default)]
pub struct ResultPanel {
    pub visible: bool,
    pub view: Option<ResultView>,
    pub scroll: u16,
    shown_at: Option<Instant>,
}

impl ResultPanel {
    /// Replaces whatever was shown, reveals the panel and scrolls it to the top.
    pub fn show(&mut self, view: ResultView) {
        self.view = Some(view);
        self.visible = true;
        self.scroll = 0;
        self.shown_at = Some(Instant::now());
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn since_shown(&self) -> Option<Duration> {
        self.shown_at.map(|at| at.elapsed())
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}

pub struct AppState {
    pub running: bool,
    pub mode: AppMode,
    pub focus: Focus,
    pub config: AppConfig,

    // Review input, cursor counted in characters
    pub input: String,
    pub cursor_pos: usize,

    pub submit_button: SubmitButton,
    pub panel: ResultPanel,
    pub last_result: Option<ClassificationResult>,

    // Modal notice, dismissed by the user
    pub notice: Option<SubmitError>,

    // Message for status line
    pub message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            running: true,
            mode: AppMode::Normal,
            focus: Focus::Input,
            config,
            input: String::new(),
            cursor_pos: 0,
            submit_button: SubmitButton::default(),
            panel: ResultPanel::default(),
            last_result: None,
            notice: None,
            message: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.submit_button.is_busy()
    }

    /// Replaces the review text and moves the cursor to its end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_pos = self.input.chars().count();
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
