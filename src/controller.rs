//! Lifecycle of a single analysis request: validation, busy state, the
//! network call and routing of its outcome.

use crate::app::{AppState, Focus};
use crate::model::{AnalysisRequest, ServiceReply};
use crate::render;
use crate::service::{ClassificationService, ServiceError};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

/// Something that can be marked busy, such as the analyze button.
pub trait BusyControl {
    fn set_busy(&mut self, busy: bool);
    fn is_busy(&self) -> bool;
}

/// Releases the busy state when dropped, unwinding included.
struct BusyRelease<'a, B: BusyControl + ?Sized>(&'a mut B);

impl<B: BusyControl + ?Sized> Drop for BusyRelease<'_, B> {
    fn drop(&mut self) {
        self.0.set_busy(false);
    }
}

/// Failures surfaced to the user as a notice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Please enter a review to analyze!")]
    EmptyInput,
    #[error("Error: {0}")]
    Application(String),
    #[error("Error: {0}")]
    Transport(String),
}

impl From<ServiceError> for SubmitError {
    fn from(err: ServiceError) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

type Outcome = Result<ServiceReply, ServiceError>;

pub struct RequestController {
    service: Arc<dyn ClassificationService>,
    in_flight: Option<Receiver<Outcome>>,
}

impl RequestController {
    pub fn new(service: Arc<dyn ClassificationService>) -> Self {
        Self {
            service,
            in_flight: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validates the current input and, if there is something to send,
    /// marks the button busy and starts the request on a worker thread.
    pub fn submit(&mut self, app: &mut AppState) {
        if self.in_flight.is_some() || app.submit_button.is_busy() {
            tracing::debug!("submit ignored while a request is in flight");
            return;
        }

        let Some(request) = AnalysisRequest::from_input(&app.input) else {
            app.notice = Some(SubmitError::EmptyInput);
            return;
        };

        app.submit_button.set_busy(true);
        app.clear_message();
        tracing::info!(chars = request.text.chars().count(), "starting analysis");

        let (tx, rx) = mpsc::channel();
        let service = Arc::clone(&self.service);
        thread::spawn(move || {
            let outcome = service.classify(&request);
            let _ = tx.send(outcome);
        });
        self.in_flight = Some(rx);
    }

    /// Picks up a finished request without blocking. Returns true when an
    /// outcome was handled.
    pub fn poll(&mut self, app: &mut AppState) -> bool {
        let Some(rx) = &self.in_flight else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        self.in_flight = None;
        complete(app, outcome);
        true
    }

    /// Blocks until the in-flight request resolves.
    pub fn wait(&mut self, app: &mut AppState) {
        let Some(rx) = self.in_flight.take() else {
            return;
        };
        let outcome = rx.recv().unwrap_or_else(|_| Err(worker_lost()));
        complete(app, outcome);
    }

    /// Empties the input, hides the result panel and gives focus back to
    /// the input. Leaves any request in flight alone.
    pub fn clear(&self, app: &mut AppState) {
        app.input.clear();
        app.cursor_pos = 0;
        app.panel.hide();
        app.focus = Focus::Input;
    }
}

fn worker_lost() -> ServiceError {
    ServiceError::Transport("request worker stopped before answering".to_string())
}

/// Routes an outcome to the result panel or to a notice. The button is
/// restored on every path.
fn complete(app: &mut AppState, outcome: Outcome) {
    let _release = BusyRelease(&mut app.submit_button);

    match outcome {
        Ok(ServiceReply::Classified(result)) => {
            tracing::info!(
                aspects = result.aspects.len(),
                findings = result.finding_count(),
                "analysis finished"
            );
            if result.skipped_findings > 0 {
                app.message = Some(format!(
                    "{} malformed finding(s) skipped",
                    result.skipped_findings
                ));
            }
            app.panel.show(render::render(&result));
            app.last_result = Some(result);
        }
        Ok(ServiceReply::Rejected { message }) => {
            tracing::warn!(%message, "service rejected the review");
            app.notice = Some(SubmitError::Application(message));
        }
        Err(err) => {
            tracing::warn!(error = %err, "analysis request failed");
            app.notice = Some(err.into());
        }
    }
}
