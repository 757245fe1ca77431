pub mod app;
pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod ui;

// Internal modules
pub mod actions;
pub mod event;

// Re-export commonly used types
pub use app::{AppMode, AppState};
pub use config::AppConfig;
pub use controller::{RequestController, SubmitError};
pub use model::{ClassificationResult, ServiceReply};
