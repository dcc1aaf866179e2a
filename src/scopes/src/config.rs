//! Transform configuration loading and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::hierarchy::{HierarchyGraph, ScopeDeclaration};

/// Configuration of the nested scopes transform
///
/// ```toml
/// realm = "api"
/// scopes = [
///     { scope = "admin", subscopes = ["app", { scope = "user", subscopes = "group-one" }] },
///     "grandma",
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransformConfig {
    /// Realm the hierarchy is cached under
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Scope hierarchy declaration
    #[serde(default)]
    pub scopes: ScopeDeclaration,
}

fn default_realm() -> String {
    "default".to_string()
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new(ScopeDeclaration::default())
    }
}

impl TransformConfig {
    /// Creates a configuration for the default realm
    pub fn new(scopes: ScopeDeclaration) -> Self {
        Self {
            realm: default_realm(),
            scopes,
        }
    }

    /// Load configuration from a TOML or JSON file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let config = match extension {
            "toml" => Self::from_toml(&contents)?,
            "json" => Self::from_json(&contents)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        debug!(path = %path.display(), realm = %config.realm, "Loaded transform configuration");

        Ok(config)
    }

    /// Parse configuration from TOML
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Parse configuration from JSON
    pub fn from_json(contents: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Validate configuration by building its hierarchy once
    pub fn validate(&self) -> ConfigResult<HierarchyGraph> {
        Ok(HierarchyGraph::build(&self.scopes)?)
    }
}
