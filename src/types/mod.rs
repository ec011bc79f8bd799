// ABOUTME: Validated domain types shared across the strategy and client layers.
// ABOUTME: Newtypes keep unchecked strings out of the deployment model.

mod compose_name;

pub use compose_name::{ComposeName, ComposeNameError};
