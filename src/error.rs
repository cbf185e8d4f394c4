//! Error types for component registration and dispatch

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the template core itself.
///
/// Errors produced by component bodies, filters and renderers are of the
/// caller's own error type and pass through untouched; the core only needs to
/// convert these variants into that type (`E: From<TemplateError>`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Strict-mode dispatch to a name with no registered component
    #[error("component not found: {name}")]
    ComponentNotFound { name: String },

    /// Strict-mode registration that cannot be accepted
    #[error("invalid registration for component '{name}': {reason}")]
    InvalidRegistration { name: String, reason: String },

    /// A body running without a template asked to dispatch by name
    #[error("cannot invoke '{name}': component is running without a template")]
    Detached { name: String },

    /// A body received an argument list it cannot work with
    #[error("invalid arguments for component '{component}': {reason}")]
    InvalidArgument { component: String, reason: String },

    /// Loading a template configuration failed
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl TemplateError {
    /// Create an invalid argument error for a component
    pub fn invalid_argument(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            component: component.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when loading configuration or table data from TOML
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("failed to parse TOML: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl ConfigError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
