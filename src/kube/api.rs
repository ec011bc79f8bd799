// ABOUTME: Low-level resource API trait implemented by a Kubernetes client backend.
// ABOUTME: One call per HTTP verb; objects are exchanged as JSON values.

use async_trait::async_trait;
use serde_json::Value;

use super::object::ObjectRef;

/// Raw CRUD access to cluster resources.
///
/// Implementations resolve `api_version` and `kind` to a resource endpoint
/// and must report a missing object as [`ResourceError::NotFound`].
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Whether objects of this kind live inside a namespace.
    async fn is_namespaced(&self, api_version: &str, kind: &str) -> Result<bool, ResourceError>;

    /// Create the object; the namespace on `target` has already been resolved.
    async fn create(&self, target: &ObjectRef, body: &Value) -> Result<Value, ResourceError>;

    /// Replace an existing object.
    async fn replace(&self, target: &ObjectRef, body: &Value) -> Result<Value, ResourceError>;

    async fn get(&self, target: &ObjectRef) -> Result<Value, ResourceError>;

    /// Delete the object, returning the server's final status.
    async fn delete(&self, target: &ObjectRef) -> Result<Value, ResourceError>;
}

/// Errors reported by a [`ResourceApi`] backend.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("object not found: {0}")]
    NotFound(ObjectRef),

    #[error("object already exists: {0}")]
    AlreadyExists(ObjectRef),

    #[error("no resource {kind} in {api_version}")]
    UnknownResource { api_version: String, kind: String },

    #[error("API error: {0}")]
    Api(String),
}
