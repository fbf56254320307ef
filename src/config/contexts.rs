//! Named connection contexts loaded from a YAML or JSON file.

use super::ClientConfig;
use crate::errors::{LensesError, LensesResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A set of named client configurations and the one currently selected
#[derive(Debug, Clone, Deserialize)]
pub struct Contexts {
    /// Name of the selected context
    #[serde(alias = "CurrentContext", alias = "currentContext")]
    pub current_context: String,
    /// Configurations by name
    #[serde(alias = "Contexts")]
    pub contexts: BTreeMap<String, ClientConfig>,
}

impl Contexts {
    /// Load a contexts file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> LensesResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_yaml_str(&raw)
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(raw: &str) -> LensesResult<Self> {
        from_yaml(raw).map_err(|e| LensesError::Configuration {
            message: format!("invalid contexts file: {}", e),
        })
    }

    /// Parse a JSON document
    pub fn from_json_str(raw: &str) -> LensesResult<Self> {
        serde_json::from_str(raw).map_err(|e| LensesError::Configuration {
            message: format!("invalid contexts file: {}", e),
        })
    }

    /// The selected configuration
    pub fn current(&self) -> LensesResult<&ClientConfig> {
        self.get(&self.current_context)
    }

    /// A configuration by name
    pub fn get(&self, name: &str) -> LensesResult<&ClientConfig> {
        self.contexts
            .get(name)
            .ok_or_else(|| LensesError::Configuration {
                message: format!("context {:?} does not exist", name),
            })
    }

    /// Names of all contexts, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

/// Parse YAML with enums written as single-key maps (`basic: {...}`)
/// rather than YAML tags
pub(crate) fn from_yaml<T: DeserializeOwned>(raw: &str) -> Result<T, serde_yaml::Error> {
    serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(raw))
}
