use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Deserialize, PartialEq, Eq, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Id of the host element the application is mounted into.
    pub target: String,
    /// Whether global stylesheets are applied during startup.
    pub styles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: "app".to_string(),
            styles: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid bootstrap config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    /// Parses a TOML config. Unknown keys are logged and ignored.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut unused = BTreeSet::new();
        let config: Self =
            serde_ignored::deserialize(toml::Deserializer::new(contents), |path| {
                unused.insert(path.to_string());
            })?;

        for key in unused {
            tracing::warn!(key = %key, "unused config key");
        }
        Ok(config)
    }
}
