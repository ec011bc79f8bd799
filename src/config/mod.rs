// ABOUTME: Configuration properties for kegd, loaded from kegd.yml.
// ABOUTME: Holds the strategy and element templating profiles as explicit values.

mod templating;

pub use templating::{TemplatingProperties, TemplatingSyntax};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use templating::RawTemplating;

pub const CONFIG_FILENAME: &str = "kegd.yml";
pub const CONFIG_FILENAME_ALT: &str = "kegd.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".kegd/config.yml";

/// Settings for one templating stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileProperties {
    pub templating: TemplatingProperties,
}

impl ProfileProperties {
    fn with_syntax(syntax: TemplatingSyntax) -> Self {
        Self {
            templating: TemplatingProperties { syntax },
        }
    }
}

/// Strategy documents are rendered with `strategy` syntax, element
/// manifests with `element` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProperties")]
pub struct KegdProperties {
    pub strategy: ProfileProperties,
    pub element: ProfileProperties,
}

impl Default for KegdProperties {
    fn default() -> Self {
        Self {
            strategy: ProfileProperties::with_syntax(TemplatingSyntax::strategy_default()),
            element: ProfileProperties::with_syntax(TemplatingSyntax::element_default()),
        }
    }
}

impl KegdProperties {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let properties: Self = serde_yaml::from_str(yaml)?;
        properties.validate()?;
        Ok(properties)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading configuration");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like [`discover`](Self::discover), but falls back to the defaults
    /// when no file exists.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let strategy = &self.strategy.templating.syntax;
        let element = &self.element.templating.syntax;

        strategy.validate("strategy").map_err(Error::InvalidConfig)?;
        element.validate("element").map_err(Error::InvalidConfig)?;

        if strategy == element {
            return Err(Error::InvalidConfig(
                "strategy and element templating syntax must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProperties {
    #[serde(default)]
    strategy: RawProfile,
    #[serde(default)]
    element: RawProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    #[serde(default)]
    templating: RawTemplating,
}

impl From<RawProperties> for KegdProperties {
    fn from(raw: RawProperties) -> Self {
        let strategy =
            TemplatingSyntax::strategy_default().with_overrides(raw.strategy.templating.syntax);
        let element =
            TemplatingSyntax::element_default().with_overrides(raw.element.templating.syntax);
        Self {
            strategy: ProfileProperties::with_syntax(strategy),
            element: ProfileProperties::with_syntax(element),
        }
    }
}
