use std::path::Path;

use serde::{Deserialize, Serialize};

use super::question::{InvalidNameError, QuestionName};

/// Configuration for the line format.
///
/// This controls how question names are resolved on import. The essay
/// settings of imported questions are fixed and are not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The name given to a question whose line has nothing before the
    /// first period.
    fallback_name: QuestionName,

    /// The maximum length of a question name, in characters.
    ///
    /// Longer names are shortened at a word boundary and end with `...`.
    name_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_name: default_fallback_name(),
            name_length: default_name_length(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The name used when a line has no name before its first period.
    #[must_use]
    pub const fn fallback_name(&self) -> &QuestionName {
        &self.fallback_name
    }

    /// Sets the fallback question name.
    pub fn set_fallback_name(&mut self, name: QuestionName) {
        self.fallback_name = name;
    }

    /// The maximum length of a question name, in characters.
    #[must_use]
    pub const fn name_length(&self) -> usize {
        self.name_length
    }

    /// Sets the maximum length of a question name.
    pub const fn set_name_length(&mut self, length: usize) {
        self.name_length = length;
    }
}

fn default_fallback_name() -> QuestionName {
    QuestionName::try_from(DEFAULT_FALLBACK_NAME).expect("default name is not blank")
}

const DEFAULT_FALLBACK_NAME: &str = "Question name";

const fn default_name_length() -> usize {
    80
}

fn default_fallback_name_string() -> String {
    DEFAULT_FALLBACK_NAME.to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_fallback_name_string")]
        fallback_name: String,

        #[serde(default = "default_name_length")]
        name_length: usize,
    },
}

impl TryFrom<Versions> for Config {
    type Error = InvalidNameError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                fallback_name,
                name_length,
            } => Ok(Self {
                fallback_name: QuestionName::new(fallback_name)?,
                name_length,
            }),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            fallback_name: config.fallback_name.into(),
            name_length: config.name_length,
        }
    }
}
