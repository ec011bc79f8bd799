// ABOUTME: Kubernetes object descriptors: references by name and full manifests.
// ABOUTME: Manifests are validated for apiVersion, kind, and metadata.name on construction.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Addresses a single object on the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ObjectRef {
    pub fn new(api_version: &str, kind: &str, name: &str, namespace: Option<&str>) -> Self {
        Self {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)?;
        if let Some(ref namespace) = self.namespace {
            write!(f, " in {namespace}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ObjectConfigError {
    #[error("object must be a map but was {0}")]
    NotAnObject(&'static str),

    #[error("object is missing required field {0}")]
    MissingField(&'static str),

    #[error("object field {0} must be a string")]
    NotAString(&'static str),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A complete object manifest, as sent in create and update requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectConfig {
    target: ObjectRef,
    data: Value,
}

impl ObjectConfig {
    pub fn from_value(data: Value) -> Result<Self, ObjectConfigError> {
        let Value::Object(ref map) = data else {
            return Err(ObjectConfigError::NotAnObject(json_type(&data)));
        };

        let api_version = required_str(map.get("apiVersion"), "apiVersion")?;
        let kind = required_str(map.get("kind"), "kind")?;
        let metadata = map.get("metadata");
        let name = required_str(metadata.and_then(|m| m.get("name")), "metadata.name")?;
        let namespace = match metadata.and_then(|m| m.get("namespace")) {
            None | Some(Value::Null) => None,
            Some(Value::String(ns)) => Some(ns.as_str()),
            Some(_) => return Err(ObjectConfigError::NotAString("metadata.namespace")),
        };

        let target = ObjectRef::new(api_version, kind, name, namespace);
        Ok(Self { target, data })
    }

    /// Parse a single rendered manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self, ObjectConfigError> {
        let data: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(data)
    }

    /// Reference to this object, with the namespace declared in its metadata.
    pub fn target(&self) -> &ObjectRef {
        &self.target
    }

    pub fn api_version(&self) -> &str {
        &self.target.api_version
    }

    pub fn kind(&self) -> &str {
        &self.target.kind
    }

    pub fn name(&self) -> &str {
        &self.target.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.target.namespace.as_deref()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }
}

fn required_str<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a str, ObjectConfigError> {
    match value {
        None | Some(Value::Null) => Err(ObjectConfigError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ObjectConfigError::NotAString(field)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
