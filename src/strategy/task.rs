// ABOUTME: Deploy task variants and the factory that builds them from a flat map.
// ABOUTME: Dispatches on the `type` field; variant fields are checked by serde.

use crate::kube::ObjectRef;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use super::error::value_type;

/// Field that selects the task variant.
pub const TYPE_FIELD: &str = "type";

/// The closed set of task variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    Apply,
    Delete,
    Wait,
    Helm,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Apply,
        TaskType::Delete,
        TaskType::Wait,
        TaskType::Helm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Apply => "apply",
            TaskType::Delete => "delete",
            TaskType::Wait => "wait",
            TaskType::Helm => "helm",
        }
    }
}

impl FromStr for TaskType {
    type Err = TaskDefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TaskDefinitionError::UnknownType {
                found: s.to_string(),
            })
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn known_types() -> String {
    TaskType::ALL
        .iter()
        .map(TaskType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a deploy task definition could not be turned into a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskDefinitionError {
    #[error("deploy task missing `type` field, expected one of: {}", known_types())]
    MissingType,

    #[error("deploy task `type` must be a string but was a {found}")]
    TypeNotString { found: &'static str },

    #[error("unknown deploy task type {found:?}, expected one of: {}", known_types())]
    UnknownType { found: String },

    #[error("invalid {task_type} task: {reason}")]
    InvalidFields { task_type: TaskType, reason: String },
}

/// One unit of deployment work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeployTask {
    /// Render a manifest and create or update the objects it describes.
    Apply(ApplyTask),
    /// Remove a single object.
    Delete(DeleteTask),
    /// Block until an object reports a condition.
    Wait(WaitTask),
    /// Install or upgrade a Helm release.
    Helm(HelmTask),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplyTask {
    /// Manifest template; rendered with the element templating syntax.
    pub manifest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DeleteTask {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct WaitTask {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default = "default_condition")]
    pub condition: String,
    #[serde(default = "default_wait_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_condition() -> String {
    "Ready".to_string()
}

fn default_wait_timeout() -> Duration {
    Duration::from_secs(60)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelmTask {
    pub chart: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
}

impl DeployTask {
    /// Build a task from a flat key/value definition.
    ///
    /// The `type` field picks the variant; the remaining fields must match
    /// that variant exactly. Unknown fields are rejected.
    pub fn from_definition(definition: &Mapping) -> Result<Self, TaskDefinitionError> {
        let task_type = match definition.get(TYPE_FIELD) {
            None | Some(Value::Null) => return Err(TaskDefinitionError::MissingType),
            Some(Value::String(s)) => s.parse::<TaskType>()?,
            Some(other) => {
                return Err(TaskDefinitionError::TypeNotString {
                    found: value_type(other),
                });
            }
        };

        let fields: Mapping = definition
            .iter()
            .filter(|(key, _)| key.as_str() != Some(TYPE_FIELD))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        match task_type {
            TaskType::Apply => read_fields(task_type, fields).map(DeployTask::Apply),
            TaskType::Delete => read_fields(task_type, fields).map(DeployTask::Delete),
            TaskType::Wait => read_fields(task_type, fields).map(DeployTask::Wait),
            TaskType::Helm => read_fields(task_type, fields).map(DeployTask::Helm),
        }
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            DeployTask::Apply(_) => TaskType::Apply,
            DeployTask::Delete(_) => TaskType::Delete,
            DeployTask::Wait(_) => TaskType::Wait,
            DeployTask::Helm(_) => TaskType::Helm,
        }
    }

    /// The single cluster object this task addresses, if it addresses one.
    pub fn target(&self) -> Option<ObjectRef> {
        match self {
            DeployTask::Delete(t) => Some(t.target()),
            DeployTask::Wait(t) => Some(t.target()),
            DeployTask::Apply(_) | DeployTask::Helm(_) => None,
        }
    }
}

impl DeleteTask {
    pub fn target(&self) -> ObjectRef {
        ObjectRef::new(&self.api_version, &self.kind, &self.name, self.namespace.as_deref())
    }
}

impl WaitTask {
    pub fn target(&self) -> ObjectRef {
        ObjectRef::new(&self.api_version, &self.kind, &self.name, self.namespace.as_deref())
    }
}

fn read_fields<T: DeserializeOwned>(
    task_type: TaskType,
    fields: Mapping,
) -> Result<T, TaskDefinitionError> {
    serde_yaml::from_value(Value::Mapping(fields)).map_err(|e| {
        TaskDefinitionError::InvalidFields {
            task_type,
            reason: e.to_string(),
        }
    })
}

impl fmt::Display for DeployTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployTask::Apply(t) if t.manifest.contains('\n') => write!(f, "apply inline manifest"),
            DeployTask::Apply(t) => write!(f, "apply {}", t.manifest),
            DeployTask::Delete(t) => write!(f, "delete {}", t.target()),
            DeployTask::Wait(t) => write!(
                f,
                "wait {} for {} (timeout {:?})",
                t.target(),
                t.condition,
                t.timeout
            ),
            DeployTask::Helm(t) => write!(f, "helm {} from {}", t.name, t.chart),
        }
    }
}
