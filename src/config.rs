use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// Using constants for default values makes them easy to change.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ANIMATE: bool = true;
pub const DEFAULT_LOG_FILTER: &str = "info";
const ENV_PREFIX: &str = "SENTISCOPE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Values read from the config file and environment.
// Every field is optional so the layers can be merged (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    animate: Option<bool>,
    log_filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// URL the review is POSTed to.
    pub endpoint: String,
    /// Seconds before a request is abandoned; 0 waits forever.
    pub request_timeout_secs: u64,
    /// Stagger the entrance of result entries.
    pub animate: bool,
    /// Default tracing filter, overridden by RUST_LOG.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            animate: DEFAULT_ANIMATE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Review sentiment and aspect analysis in the terminal", long_about = None)]
pub struct CliArgs {
    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Classification endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Animate the entrance of result entries
    #[arg(long)]
    pub animate: Option<bool>,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Analyze this review once, print the result and exit
    #[arg(long, value_name = "REVIEW")]
    pub text: Option<String>,

    /// Print the merged configuration and exit
    #[arg(long)]
    pub debug_config: bool,
}

/// Loads configuration from the config file, the environment and the
/// command line, in increasing priority.
pub fn load_config(args: &CliArgs) -> Result<AppConfig, ConfigError> {
    let file_path = args.config.clone().or_else(default_config_path);
    build_config(args, file_path, Some(env_overrides(None)))
}

/// `SENTISCOPE_<KEY>` variables as config overrides. `vars` replaces the
/// process environment when given.
fn env_overrides(vars: Option<Map<String, String>>) -> Map<String, Value> {
    // Keys are flat, so the prefix is the only separator.
    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
        .source(vars);
    // Missing variables are fine; a failed collect just means no overrides.
    env_source.collect().unwrap_or_else(|_| Map::new())
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sentiscope").map(|dirs| dirs.config_dir().join("config.toml"))
}

// Separate function to allow testing with specific files and override sources
fn build_config(
    args: &CliArgs,
    file_path: Option<PathBuf>,
    override_source: Option<Map<String, Value>>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigCrate::builder();

    if let Some(path) = file_path {
        tracing::debug!(path = %path.display(), "reading config file if present");
        builder = builder.add_source(File::from(path).required(false));
    }

    // Overrides are applied with higher priority than the file source.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            builder = builder.set_override(key, value)?;
        }
    }

    let loaded: FileConfig = builder.build()?.try_deserialize()?;

    let config = AppConfig {
        endpoint: args
            .endpoint
            .clone()
            .or(loaded.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        request_timeout_secs: args
            .request_timeout_secs
            .or(loaded.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        animate: args
            .animate
            .or(loaded.animate)
            .unwrap_or(DEFAULT_ANIMATE),
        log_filter: args
            .log_filter
            .clone()
            .or(loaded.log_filter)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
    };

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let endpoint = config.endpoint.trim();
    let has_host = endpoint
        .strip_prefix("http://")
        .or_else(|| endpoint.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::ValidationError(format!(
            "endpoint must be an http(s) URL, got '{}'",
            config.endpoint
        )));
    }

    if config.log_filter.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "log_filter must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ValueKind;
    use std::fs;
    use tempfile::TempDir;

    fn test_args(extra: &[&str]) -> CliArgs {
        let mut cmd = vec!["test_binary"];
        cmd.extend_from_slice(extra);
        CliArgs::try_parse_from(cmd).expect("Failed to parse test args")
    }

    #[test]
    fn test_default_config() {
        let config = build_config(&test_args(&[]), None, None).expect("default config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = build_config(&test_args(&["--request-timeout-secs", "0"]), None, None)
            .expect("config with zero timeout");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_file_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"http://reviews.local:8080/predict\"\nanimate = false\n",
        )
        .unwrap();

        let config = build_config(&test_args(&[]), Some(path), None).expect("file config");
        assert_eq!(config.endpoint, "http://reviews.local:8080/predict");
        assert!(!config.animate);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let config = build_config(&test_args(&[]), Some(dir.path().join("nope.toml")), None)
            .expect("missing file is optional");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_override_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 5\nlog_filter = \"warn\"\n").unwrap();

        let mut overrides = Map::new();
        overrides.insert(
            "request_timeout_secs".to_string(),
            Value::new(None, ValueKind::U64(12)),
        );

        let config =
            build_config(&test_args(&[]), Some(path), Some(overrides)).expect("env config");
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.log_filter, "warn");
    }

    fn env_vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_prefixed_env_vars_apply() {
        let vars = env_vars(&[
            ("SENTISCOPE_ENDPOINT", "http://single:1/predict"),
            ("SENTISCOPE_REQUEST_TIMEOUT_SECS", "7"),
            ("SENTISCOPE_ANIMATE", "false"),
            ("SENTISCOPE_LOG_FILTER", "sentiscope=trace"),
            ("OTHERAPP_ENDPOINT", "http://ignored:2/predict"),
        ]);

        let overrides = env_overrides(Some(vars));
        let config = build_config(&test_args(&[]), None, Some(overrides)).expect("env config");
        assert_eq!(config.endpoint, "http://single:1/predict");
        assert_eq!(config.request_timeout_secs, 7);
        assert!(!config.animate);
        assert_eq!(config.log_filter, "sentiscope=trace");
    }

    #[test]
    fn test_env_vars_beat_file_but_not_args() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 5\nanimate = true\n").unwrap();

        let vars = env_vars(&[
            ("SENTISCOPE_REQUEST_TIMEOUT_SECS", "9"),
            ("SENTISCOPE_ANIMATE", "false"),
        ]);
        let args = test_args(&["--request-timeout-secs", "3"]);
        let config = build_config(&args, Some(path), Some(env_overrides(Some(vars))))
            .expect("layered config");
        assert_eq!(config.request_timeout_secs, 3);
        assert!(!config.animate);
    }

    #[test]
    fn test_arg_override_beats_env() {
        let mut overrides = Map::new();
        overrides.insert(
            "endpoint".to_string(),
            Value::new(None, ValueKind::String("http://env:1/predict".to_string())),
        );

        let args = test_args(&["--endpoint", "https://cli:2/predict", "--animate", "false"]);
        let config = build_config(&args, None, Some(overrides)).expect("arg config");
        assert_eq!(config.endpoint, "https://cli:2/predict");
        assert!(!config.animate);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        for endpoint in ["ftp://host/predict", "localhost:5000", "http://"] {
            let args = test_args(&["--endpoint", endpoint]);
            let err = build_config(&args, None, None).unwrap_err();
            assert!(
                matches!(err, ConfigError::ValidationError(_)),
                "{} should be rejected",
                endpoint
            );
        }
    }

    #[test]
    fn test_text_and_debug_flags() {
        let args = test_args(&["--text", "Great food", "--debug-config"]);
        assert_eq!(args.text.as_deref(), Some("Great food"));
        assert!(args.debug_config);
    }
}
