// ABOUTME: Compose script name validation.
// ABOUTME: Names identify scripts uniquely within a deployment strategy.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComposeNameError {
    #[error("compose name cannot be empty")]
    Empty,

    #[error("compose name cannot start or end with whitespace")]
    SurroundingWhitespace,

    #[error("invalid control character in compose name: {0:?}")]
    ControlChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ComposeName(String);

impl ComposeName {
    pub fn new(value: &str) -> Result<Self, ComposeNameError> {
        if value.is_empty() {
            return Err(ComposeNameError::Empty);
        }

        if value.trim() != value {
            return Err(ComposeNameError::SurroundingWhitespace);
        }

        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(ComposeNameError::ControlChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComposeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComposeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert_eq!(ComposeName::new("db").unwrap().as_str(), "db");
        assert_eq!(ComposeName::new("web app").unwrap().to_string(), "web app");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ComposeName::new(""), Err(ComposeNameError::Empty));
    }

    #[test]
    fn rejects_padding() {
        assert_eq!(
            ComposeName::new(" db"),
            Err(ComposeNameError::SurroundingWhitespace)
        );
        assert_eq!(
            ComposeName::new("   "),
            Err(ComposeNameError::SurroundingWhitespace)
        );
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            ComposeName::new("d\u{7}b"),
            Err(ComposeNameError::ControlChar('\u{7}'))
        );
    }
}
