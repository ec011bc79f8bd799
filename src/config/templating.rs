// ABOUTME: Templating delimiter syntax for strategy-level and element-level templates.
// ABOUTME: The two profiles differ so one template can embed the other untouched.

use serde::{Deserialize, Serialize};

/// Four delimiters understood by the template renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplatingSyntax {
    pub block_start_string: String,
    pub block_end_string: String,
    pub variable_start_string: String,
    pub variable_end_string: String,
}

impl TemplatingSyntax {
    /// Plain Jinja-style delimiters used inside element manifests.
    pub fn element_default() -> Self {
        Self {
            block_start_string: "{%".to_string(),
            block_end_string: "%}".to_string(),
            variable_start_string: "{{".to_string(),
            variable_end_string: "}}".to_string(),
        }
    }

    /// Bang-wrapped delimiters used for the strategy document itself.
    pub fn strategy_default() -> Self {
        Self {
            block_start_string: "!{%".to_string(),
            block_end_string: "%}!".to_string(),
            variable_start_string: "!{{".to_string(),
            variable_end_string: "}}!".to_string(),
        }
    }

    /// Delimiters paired with their config key, in declaration order.
    pub fn delimiters(&self) -> [(&'static str, &str); 4] {
        [
            ("block_start_string", &self.block_start_string),
            ("block_end_string", &self.block_end_string),
            ("variable_start_string", &self.variable_start_string),
            ("variable_end_string", &self.variable_end_string),
        ]
    }

    pub(super) fn with_overrides(mut self, overrides: SyntaxOverrides) -> Self {
        if let Some(s) = overrides.block_start_string {
            self.block_start_string = s;
        }
        if let Some(s) = overrides.block_end_string {
            self.block_end_string = s;
        }
        if let Some(s) = overrides.variable_start_string {
            self.variable_start_string = s;
        }
        if let Some(s) = overrides.variable_end_string {
            self.variable_end_string = s;
        }
        self
    }

    pub(super) fn validate(&self, profile: &str) -> Result<(), String> {
        for (key, delimiter) in self.delimiters() {
            if delimiter.is_empty() {
                return Err(format!("{profile} templating {key} cannot be empty"));
            }
        }
        if self.block_start_string == self.variable_start_string {
            return Err(format!(
                "{profile} templating block and variable start strings must differ"
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplatingProperties {
    pub syntax: TemplatingSyntax,
}

/// Partially specified syntax, layered over a profile default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct SyntaxOverrides {
    block_start_string: Option<String>,
    block_end_string: Option<String>,
    variable_start_string: Option<String>,
    variable_end_string: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawTemplating {
    #[serde(default)]
    pub(super) syntax: SyntaxOverrides,
}
