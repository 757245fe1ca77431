use sentiscope::{actions, event, logging, ui};

use anyhow::Result;
use clap::Parser;
use sentiscope::app::AppState;
use sentiscope::config::{load_config, AppConfig, CliArgs};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sentiscope::controller::RequestController;
use sentiscope::service::HttpClassifier;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(err) = logging::init(&config.log_filter) {
        eprintln!("Logging disabled: {}", err);
    }

    let service = HttpClassifier::new(config.endpoint.clone(), config.request_timeout());
    tracing::info!(endpoint = service.endpoint(), "using classification service");
    let mut controller = RequestController::new(Arc::new(service));

    if let Some(text) = args.text.as_deref() {
        return Ok(run_once(config, &mut controller, text));
    }

    // Create application state
    let mut app = AppState::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal
    terminal.clear()?;

    // Run the main loop
    let res = run_app(&mut terminal, &mut app, &mut controller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors from the main loop
    if let Err(err) = res {
        tracing::error!(error = %err, "main loop failed");
        eprintln!("Error: {}", err);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    controller: &mut RequestController,
) -> Result<()> {
    while app.running {
        // Draw the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Pick up a finished request
        controller.poll(app);

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            actions::execute_action(action, app, controller)?;
        }
    }

    Ok(())
}

/// Headless mode: analyze one review and print the rendered result.
fn run_once(config: AppConfig, controller: &mut RequestController, text: &str) -> ExitCode {
    let mut app = AppState::new(config);
    app.set_input(text);

    controller.submit(&mut app);
    controller.wait(&mut app);

    if let Some(notice) = &app.notice {
        eprintln!("{}", notice);
        return ExitCode::FAILURE;
    }
    if let Some(message) = &app.message {
        eprintln!("{}", message);
    }
    match &app.panel.view {
        Some(view) => {
            print!("{}", view);
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}
