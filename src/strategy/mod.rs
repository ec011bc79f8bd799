// ABOUTME: Deployment strategy model and the parser that validates it.
// ABOUTME: Turns an untyped YAML document into compose scripts of deploy tasks.

mod error;
mod model;
mod parser;
mod task;

pub use error::{MalformedStrategyError, value_type};
pub use model::{ComposeScript, DeploymentStrategy};
pub use parser::{
    COMPOSE_KEY, DEPLOY_KEY, DeploymentStrategyParser, NAME_KEY, REVERSE_KEY, parse,
};
pub use task::{
    ApplyTask, DeleteTask, DeployTask, HelmTask, TYPE_FIELD, TaskDefinitionError, TaskType,
    WaitTask,
};
