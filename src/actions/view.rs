use crate::app::{AppMode, AppState, Focus};

const PAGE_LINES: u16 = 10;

pub fn toggle_focus(app: &mut AppState) {
    app.focus = match app.focus {
        Focus::Input if app.panel.visible => Focus::Results,
        _ => Focus::Input,
    };
}

pub fn scroll_up(app: &mut AppState) {
    app.panel.scroll_up(1);
}

pub fn scroll_down(app: &mut AppState) {
    if app.panel.visible {
        app.panel.scroll_down(1);
    }
}

pub fn page_up(app: &mut AppState) {
    app.panel.scroll_up(PAGE_LINES);
}

pub fn page_down(app: &mut AppState) {
    if app.panel.visible {
        app.panel.scroll_down(PAGE_LINES);
    }
}

/// Opens the key help, unless a notice is waiting to be dismissed.
pub fn show_help(app: &mut AppState) {
    if app.notice.is_some() {
        return;
    }
    app.mode = AppMode::Help;
}

/// Back to the normal view. Focus falls back to the input when there are
/// no results to return to.
pub fn close_help(app: &mut AppState) {
    app.mode = AppMode::Normal;
    if !app.panel.visible {
        app.focus = Focus::Input;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::controller::SubmitError;
    use crate::model::{ClassificationResult, Sentiment};
    use crate::render::render;

    fn app_with_results() -> AppState {
        let mut app = AppState::new(AppConfig::default());
        app.panel.show(render(&ClassificationResult {
            prediction: Sentiment::Positive,
            probability: None,
            aspects: Vec::new(),
            skipped_findings: 0,
        }));
        app
    }

    #[test]
    fn test_focus_needs_visible_panel() {
        let mut app = AppState::new(AppConfig::default());
        toggle_focus(&mut app);
        assert_eq!(app.focus, Focus::Input);

        let mut app = app_with_results();
        toggle_focus(&mut app);
        assert_eq!(app.focus, Focus::Results);
        toggle_focus(&mut app);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_scrolling() {
        let mut app = app_with_results();
        page_down(&mut app);
        scroll_down(&mut app);
        assert_eq!(app.panel.scroll, PAGE_LINES + 1);
        page_up(&mut app);
        page_up(&mut app);
        assert_eq!(app.panel.scroll, 0);

        app.panel.hide();
        scroll_down(&mut app);
        assert_eq!(app.panel.scroll, 0);
    }

    #[test]
    fn test_help_round_trip_keeps_results_focus() {
        let mut app = app_with_results();
        app.focus = Focus::Results;

        show_help(&mut app);
        assert_eq!(app.mode, AppMode::Help);

        close_help(&mut app);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.focus, Focus::Results);
    }

    #[test]
    fn test_close_help_without_results_focuses_input() {
        let mut app = app_with_results();
        app.focus = Focus::Results;
        show_help(&mut app);
        app.panel.hide();

        close_help(&mut app);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_help_refused_while_notice_shown() {
        let mut app = AppState::new(AppConfig::default());
        app.notice = Some(SubmitError::EmptyInput);

        show_help(&mut app);
        assert_eq!(app.mode, AppMode::Normal);

        app.dismiss_notice();
        show_help(&mut app);
        assert_eq!(app.mode, AppMode::Help);
    }
}
