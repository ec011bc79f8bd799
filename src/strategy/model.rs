// ABOUTME: The validated deployment model: strategy, compose scripts, and their tasks.
// ABOUTME: Values are immutable once built; only the parser assembles a strategy.

use crate::error::Result;
use crate::types::ComposeName;
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;

use super::parser::DeploymentStrategyParser;
use super::task::DeployTask;

/// An ordered set of uniquely named compose scripts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeploymentStrategy {
    compose: Vec<ComposeScript>,
}

impl DeploymentStrategy {
    /// Callers must guarantee the script names are unique.
    pub(super) fn new(compose: Vec<ComposeScript>) -> Self {
        Self { compose }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)?;
        Ok(DeploymentStrategyParser::new().parse(&document)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Compose scripts in document order.
    pub fn compose(&self) -> &[ComposeScript] {
        &self.compose
    }

    pub fn get(&self, name: &str) -> Option<&ComposeScript> {
        self.compose.iter().find(|c| c.name.as_str() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &ComposeName> {
        self.compose.iter().map(|c| &c.name)
    }

    pub fn len(&self) -> usize {
        self.compose.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compose.is_empty()
    }
}

impl<'a> IntoIterator for &'a DeploymentStrategy {
    type Item = &'a ComposeScript;
    type IntoIter = std::slice::Iter<'a, ComposeScript>;

    fn into_iter(self) -> Self::IntoIter {
        self.compose.iter()
    }
}

/// A named, ordered list of deploy tasks with optional rollback behaviour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeScript {
    name: ComposeName,
    deploy: Vec<DeployTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reverse: Option<Value>,
}

impl ComposeScript {
    pub fn new(name: ComposeName, deploy: Vec<DeployTask>, reverse: Option<Value>) -> Self {
        Self {
            name,
            deploy,
            reverse,
        }
    }

    pub fn name(&self) -> &ComposeName {
        &self.name
    }

    /// Tasks in execution order.
    pub fn deploy(&self) -> &[DeployTask] {
        &self.deploy
    }

    /// Rollback descriptor, carried through unvalidated.
    pub fn reverse(&self) -> Option<&Value> {
        self.reverse.as_ref()
    }

    pub fn is_reversible(&self) -> bool {
        self.reverse.is_some()
    }
}
