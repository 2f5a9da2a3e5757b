use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Message text with a recipient-name token.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    text: String,
}

impl MessageTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace every occurrence of `placeholder` with `name`. An empty
    /// placeholder leaves the text untouched.
    pub fn render(&self, placeholder: &str, name: &str) -> String {
        if placeholder.is_empty() {
            return self.text.clone();
        }
        self.text.replace(placeholder, name)
    }
}
