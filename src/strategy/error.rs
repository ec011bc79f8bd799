// ABOUTME: Structural validation errors raised while reading a deployment strategy.
// ABOUTME: Every violation aborts the parse; no partial strategy is returned.

use crate::types::ComposeNameError;
use serde_yaml::Value;
use thiserror::Error;

use super::task::TaskDefinitionError;

/// Raised on the first structural violation found in a strategy document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedStrategyError {
    #[error("deployment strategy must be a map but was a {found}")]
    DocumentNotMap { found: &'static str },

    #[error("compose must be a list but was a {found}")]
    ComposeNotList { found: &'static str },

    #[error("compose entry must be a map but was a {found}: {entry}")]
    ComposeEntryNotMap { found: &'static str, entry: String },

    #[error("compose entry missing name: {entry}")]
    MissingName { entry: String },

    #[error("compose entry name must be a string but was a {found}: {entry}")]
    NameNotString { found: &'static str, entry: String },

    #[error("compose entry has invalid name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: ComposeNameError,
    },

    #[error("compose entry with duplicate name {0}")]
    DuplicateName(String),

    #[error("compose {compose} deploy must be a list but was a {found}")]
    DeployNotList { compose: String, found: &'static str },

    #[error("compose {compose} deploy task must be a dict/map but found a {found}: {task}")]
    TaskNotMap {
        compose: String,
        found: &'static str,
        task: String,
    },

    #[error("compose {compose} deploy task {index}: {source}")]
    InvalidTask {
        compose: String,
        index: usize,
        #[source]
        source: TaskDefinitionError,
    },
}

/// Name of the YAML node type, as reported in error messages.
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "map",
        Value::Tagged(_) => "tagged value",
    }
}

/// Compact single-line rendering of a node for error messages.
pub(crate) fn describe(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}
