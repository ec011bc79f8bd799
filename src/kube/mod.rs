// ABOUTME: Boundary to the Kubernetes resource API used by the execution engine.
// ABOUTME: Exports object types, the ResourceApi trait, and the ObjectController.

mod api;
mod controller;
mod error;
mod object;

pub use api::{ResourceApi, ResourceError};
pub use controller::{DEFAULT_NAMESPACE, ObjectController, Operation};
pub use error::{ControllerError, ControllerErrorKind};
pub use object::{ObjectConfig, ObjectConfigError, ObjectRef};
