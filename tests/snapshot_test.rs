use insta::assert_snapshot;
use ratatui::{backend::TestBackend, Terminal};
use sentiscope::controller::BusyControl;
use sentiscope::model::{parse_reply, ServiceReply};
use sentiscope::render::render;
use sentiscope::{ui, AppConfig, AppState, ClassificationResult, SubmitError};

mod common;
use common::*;

const CAMERA_BATTERY: &str = r#"{"prediction":1,"aspects":{"camera":[{"sentence":"Great camera","pred":1,"probability":0.91}],"battery":[{"sentence":"bad battery","pred":0,"probability":0.77}]}}"#;

fn classified(body: &str) -> ClassificationResult {
    match parse_reply(body).unwrap() {
        ServiceReply::Classified(result) => result,
        ServiceReply::Rejected { message } => panic!("unexpected rejection: {}", message),
    }
}

fn create_test_app() -> AppState {
    let config = AppConfig {
        animate: false,
        ..AppConfig::default()
    };
    AppState::new(config)
}

fn draw(app: &AppState) -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    terminal
}

#[test]
fn test_result_text_rendering() {
    let view = render(&classified(CAMERA_BATTERY));
    assert_snapshot!(view.to_string().trim_end(), @r#"
    Sentiment: Positive

    Camera
      "Great camera"
      ✓ Positive
      Confidence: 91%

    Battery
      "bad battery"
      ✗ Negative
      Confidence: 77%
    "#);
}

#[test]
fn test_no_aspects_text_rendering() {
    let view = render(&classified(
        r#"{"prediction":0,"probability":0.64,"aspects":{}}"#,
    ));
    assert_snapshot!(view.to_string().trim_end(), @r"
    Sentiment: Negative (Confidence: 64%)

    No specific aspects detected.
    ");
}

#[test]
fn test_idle_screen() {
    let app = create_test_app();
    let screen = screen_text(&draw(&app));

    assert!(screen.contains("Review"));
    assert!(screen.contains("Analyze Now"));
    assert!(screen.contains("Clear"));
    assert!(screen.contains("ready"));
    assert!(screen.contains("Results appear here after an analysis."));
    assert!(!screen.contains(" Result "));
}

#[test]
fn test_busy_screen() {
    let mut app = create_test_app();
    app.set_input("Great camera but bad battery");
    app.submit_button.set_busy(true);
    let screen = screen_text(&draw(&app));

    assert!(screen.contains("Analyzing..."));
    assert!(!screen.contains("Analyze Now"));
    assert!(screen.contains("analyzing"));
}

#[test]
fn test_result_panel_screen() {
    let mut app = create_test_app();
    let result = classified(CAMERA_BATTERY);
    app.panel.show(render(&result));
    app.last_result = Some(result);
    let rows = screen_rows(&draw(&app));
    let screen = rows.join("\n");

    assert!(screen.contains(" Result "));
    assert!(screen.contains("Overall sentiment:"));
    assert!(screen.contains("Confidence: 91%"));
    assert!(screen.contains("Confidence: 77%"));
    assert!(screen.contains("2 findings"));

    let camera = rows.iter().position(|row| row.contains("Camera")).unwrap();
    let battery = rows.iter().position(|row| row.contains("Battery")).unwrap();
    assert!(camera < battery);
}

#[test]
fn test_placeholder_screen() {
    let mut app = create_test_app();
    app.panel
        .show(render(&classified(r#"{"prediction":1,"aspects":{}}"#)));
    let screen = screen_text(&draw(&app));

    assert!(screen.contains("No specific aspects detected."));
}

#[test]
fn test_notice_overlay() {
    let mut app = create_test_app();
    app.notice = Some(SubmitError::Application("model unavailable".to_string()));
    let screen = screen_text(&draw(&app));
    assert!(screen.contains("Notice"));
    assert!(screen.contains("Error: model unavailable"));

    app.notice = Some(SubmitError::EmptyInput);
    let screen = screen_text(&draw(&app));
    assert!(screen.contains("Please enter a review to analyze!"));
}

#[test]
fn test_help_screen() {
    let mut app = create_test_app();
    app.mode = sentiscope::AppMode::Help;
    let screen = screen_text(&draw(&app));

    assert!(screen.contains("Press ESC or F1 to close help"));
}
