// ABOUTME: Object controller error types with SNAFU pattern.
// ABOUTME: Adds the failed operation and object to backend errors.

use snafu::Snafu;

use super::api::ResourceError;
use super::controller::Operation;
use super::object::ObjectRef;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ControllerError {
    #[snafu(display("failed to {operation} {target}: {source}"))]
    Request {
        operation: Operation,
        target: ObjectRef,
        source: ResourceError,
    },

    #[snafu(display("failed to resolve resource {kind} in {api_version}: {source}"))]
    Discovery {
        api_version: String,
        kind: String,
        source: ResourceError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerErrorKind {
    /// The addressed object does not exist.
    NotFound,
    /// The object already exists and cannot be created.
    AlreadyExists,
    /// The API server does not serve this kind.
    UnknownResource,
    /// Any other API failure.
    Api,
}

impl ControllerError {
    pub fn kind(&self) -> ControllerErrorKind {
        let source = match self {
            ControllerError::Request { source, .. } | ControllerError::Discovery { source, .. } => {
                source
            }
        };
        match source {
            ResourceError::NotFound(_) => ControllerErrorKind::NotFound,
            ResourceError::AlreadyExists(_) => ControllerErrorKind::AlreadyExists,
            ResourceError::UnknownResource { .. } => ControllerErrorKind::UnknownResource,
            ResourceError::Api(_) => ControllerErrorKind::Api,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ControllerErrorKind::NotFound
    }
}
