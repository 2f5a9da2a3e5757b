use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub number: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `name:number`, got {content:?}")]
    Malformed { line: usize, content: String },
}

/// Parse `name:number` lines. Every line, blank ones included, must contain
/// exactly one colon or the whole list is rejected.
pub fn parse(text: &str) -> Result<Vec<Contact>, LoadError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let mut parts = line.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(number), None) => out.push(Contact {
                name: name.to_string(),
                number: number.to_string(),
            }),
            _ => {
                return Err(LoadError::Malformed {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
    }
    Ok(out)
}

pub fn load(path: &Path) -> Result<Vec<Contact>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}
