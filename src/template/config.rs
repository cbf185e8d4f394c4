//! Configuration for templates

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Name `render()` dispatches to when nothing else is configured
pub const DEFAULT_TOP_LEVEL: &str = "__main__";

/// Configuration options for a [`Template`](crate::Template)
///
/// Loadable from TOML:
///
/// ```toml
/// top_level = "table"
/// strict = true
/// class = "prices"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Component invoked by `render()` without a custom renderer
    pub top_level: String,

    /// Report missing components and invalid registrations as errors
    /// instead of skipping them
    pub strict: bool,

    /// CSS class for rendered HTML tables, when not the default one
    pub class: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            top_level: DEFAULT_TOP_LEVEL.to_string(),
            strict: false,
            class: None,
        }
    }
}

impl TemplateConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-level component name
    pub fn with_top_level(mut self, name: impl Into<String>) -> Self {
        self.top_level = name.into();
        self
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the table CSS class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
