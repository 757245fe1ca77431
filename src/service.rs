//! HTTP client for the classification service.

use crate::model::{parse_reply, AnalysisRequest, ServiceReply};
use std::time::Duration;
use thiserror::Error;

/// Anything that can classify a review. The UI only talks to this trait so
/// it can run against an in-memory fake.
pub trait ClassificationService: Send + Sync {
    fn classify(&self, request: &AnalysisRequest) -> Result<ServiceReply, ServiceError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(String),
    #[error("Failed to read response body: {0}")]
    Body(String),
    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
}

pub struct HttpClassifier {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpClassifier {
    /// `timeout` of `None` lets a request run for as long as the server
    /// keeps the connection open.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ClassificationService for HttpClassifier {
    fn classify(&self, request: &AnalysisRequest) -> Result<ServiceReply, ServiceError> {
        tracing::debug!(endpoint = %self.endpoint, chars = request.text.chars().count(), "posting review");

        let result = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(request);

        // Error replies arrive with 4xx/5xx codes, but the body still says
        // what went wrong, so it is parsed on both paths.
        let (status, response) = match result {
            Ok(response) => (response.status(), response),
            Err(ureq::Error::Status(code, response)) => (code, response),
            Err(ureq::Error::Transport(err)) => {
                return Err(ServiceError::Transport(err.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|err| ServiceError::Body(err.to_string()))?;

        match parse_reply(&body) {
            Ok(reply) => Ok(reply),
            Err(err) if status >= 400 => Err(ServiceError::Status {
                status,
                detail: err.to_string(),
            }),
            Err(err) => Err(ServiceError::InvalidJson(err.to_string())),
        }
    }
}
