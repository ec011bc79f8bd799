// ABOUTME: Reads an untyped strategy document into a validated DeploymentStrategy.
// ABOUTME: Validation is fail-fast: the first violation aborts the whole parse.

use crate::types::ComposeName;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

use super::error::{MalformedStrategyError, describe, value_type};
use super::model::{ComposeScript, DeploymentStrategy};
use super::task::DeployTask;

type Result<T> = std::result::Result<T, MalformedStrategyError>;

pub const COMPOSE_KEY: &str = "compose";
pub const NAME_KEY: &str = "name";
pub const DEPLOY_KEY: &str = "deploy";
pub const REVERSE_KEY: &str = "reverse";

/// Stateless; one parser may be shared across threads and calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentStrategyParser;

impl DeploymentStrategyParser {
    pub fn new() -> Self {
        Self
    }

    /// Validate `document` and build the strategy it describes.
    ///
    /// A null document or a missing/null `compose` key yields an empty
    /// strategy. The document is never modified.
    pub fn parse(&self, document: &Value) -> Result<DeploymentStrategy> {
        let compose = match document {
            Value::Null => Vec::new(),
            Value::Mapping(data) => self.read_compose(data)?,
            other => {
                return Err(MalformedStrategyError::DocumentNotMap {
                    found: value_type(other),
                });
            }
        };
        tracing::debug!(scripts = compose.len(), "read deployment strategy");
        Ok(DeploymentStrategy::new(compose))
    }

    fn read_compose(&self, data: &Mapping) -> Result<Vec<ComposeScript>> {
        let compose_defs = match data.get(COMPOSE_KEY) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Sequence(defs)) => defs,
            Some(other) => {
                return Err(MalformedStrategyError::ComposeNotList {
                    found: value_type(other),
                });
            }
        };

        let mut seen_names = HashSet::with_capacity(compose_defs.len());
        let mut compose = Vec::with_capacity(compose_defs.len());
        for compose_def in compose_defs {
            let Value::Mapping(definition) = compose_def else {
                return Err(MalformedStrategyError::ComposeEntryNotMap {
                    found: value_type(compose_def),
                    entry: describe(compose_def),
                });
            };

            let name = read_name(compose_def, definition)?;
            if !seen_names.insert(name.clone()) {
                return Err(MalformedStrategyError::DuplicateName(name.to_string()));
            }
            compose.push(self.read_compose_entry(name, definition)?);
        }
        Ok(compose)
    }

    fn read_compose_entry(&self, name: ComposeName, definition: &Mapping) -> Result<ComposeScript> {
        let deploy = match definition.get(DEPLOY_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(task_defs)) => task_defs
                .iter()
                .enumerate()
                .map(|(index, task_def)| self.read_deploy_task(&name, index, task_def))
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(MalformedStrategyError::DeployNotList {
                    compose: name.to_string(),
                    found: value_type(other),
                });
            }
        };

        let reverse = match definition.get(REVERSE_KEY) {
            None | Some(Value::Null) => None,
            Some(reverse) => Some(reverse.clone()),
        };

        tracing::debug!(
            compose = %name,
            tasks = deploy.len(),
            reversible = reverse.is_some(),
            "read compose script"
        );
        Ok(ComposeScript::new(name, deploy, reverse))
    }

    fn read_deploy_task(
        &self,
        compose: &ComposeName,
        index: usize,
        task_def: &Value,
    ) -> Result<DeployTask> {
        let Value::Mapping(definition) = task_def else {
            return Err(MalformedStrategyError::TaskNotMap {
                compose: compose.to_string(),
                found: value_type(task_def),
                task: describe(task_def),
            });
        };
        DeployTask::from_definition(definition).map_err(|source| {
            MalformedStrategyError::InvalidTask {
                compose: compose.to_string(),
                index,
                source,
            }
        })
    }
}

fn read_name(compose_def: &Value, definition: &Mapping) -> Result<ComposeName> {
    match definition.get(NAME_KEY) {
        None | Some(Value::Null) => Err(MalformedStrategyError::MissingName {
            entry: describe(compose_def),
        }),
        Some(Value::String(name)) => {
            ComposeName::new(name).map_err(|source| MalformedStrategyError::InvalidName {
                name: name.clone(),
                source,
            })
        }
        Some(other) => Err(MalformedStrategyError::NameNotString {
            found: value_type(other),
            entry: describe(compose_def),
        }),
    }
}

/// Shorthand for [`DeploymentStrategyParser::parse`].
pub fn parse(document: &Value) -> Result<DeploymentStrategy> {
    DeploymentStrategyParser::new().parse(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn empty_document_yields_empty_strategy() {
        assert!(parse(&doc("{}")).unwrap().is_empty());
        assert!(parse(&Value::Null).unwrap().is_empty());
        assert!(parse(&doc("compose: ~")).unwrap().is_empty());
        assert!(parse(&doc("compose: []")).unwrap().is_empty());
    }

    #[test]
    fn non_map_document_is_rejected() {
        let err = parse(&doc("- a\n- b")).unwrap_err();
        assert_eq!(err, MalformedStrategyError::DocumentNotMap { found: "list" });
    }

    #[test]
    fn missing_name_is_checked_before_duplicates() {
        let err = parse(&doc("compose:\n  - name: db\n  - deploy: []")).unwrap_err();
        assert!(matches!(err, MalformedStrategyError::MissingName { .. }));
    }

    #[test]
    fn non_string_name_is_rejected() {
        let err = parse(&doc("compose:\n  - name: 42")).unwrap_err();
        assert!(matches!(
            err,
            MalformedStrategyError::NameNotString { found: "number", .. }
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = parse(&doc("compose:\n  - name: ''")).unwrap_err();
        assert!(matches!(err, MalformedStrategyError::InvalidName { .. }));
    }

    #[test]
    fn null_reverse_means_not_reversible() {
        let strategy = parse(&doc("compose:\n  - name: db\n    reverse: ~")).unwrap();
        assert!(!strategy.compose()[0].is_reversible());
    }

    #[test]
    fn task_errors_carry_script_and_position() {
        let err = parse(&doc(
            "compose:\n  - name: app\n    deploy:\n      - type: apply\n        manifest: a\n      - type: nope",
        ))
        .unwrap_err();
        match err {
            MalformedStrategyError::InvalidTask { compose, index, .. } => {
                assert_eq!(compose, "app");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn document_is_left_untouched() {
        let document = doc("compose:\n  - name: db\n    deploy:\n      - type: apply\n        manifest: x");
        let before = document.clone();
        parse(&document).unwrap();
        assert_eq!(document, before);
    }
}
