//! `orphan.json` loading.

use orphan_checker::{HandleShape, HandleShapeConfig, RolePolicy, RuleId, RuleSet};
use orphan_common::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "orphan.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("handle shape #{index} has an empty name")]
    EmptyShapeName { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSeverities {
    pub dangling_invocation: Severity,
    pub unobserved_result: Severity,
}

impl Default for RuleSeverities {
    fn default() -> Self {
        RuleSeverities {
            dangling_invocation: Severity::Warning,
            unobserved_result: Severity::Warning,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrphanConfig {
    /// `None` selects the built-in handle family.
    pub handle_shapes: Option<Vec<HandleShape>>,
    pub rules: RuleSeverities,
    pub suppress: RolePolicy,
}

impl OrphanConfig {
    pub fn severity(&self, rule: RuleId) -> Severity {
        match rule {
            RuleId::DanglingInvocation => self.rules.dangling_invocation,
            RuleId::UnobservedResult => self.rules.unobserved_result,
        }
    }

    /// Rules whose severity is not `silent`.
    pub fn rule_set(&self) -> RuleSet {
        RuleId::ALL
            .into_iter()
            .filter(|rule| self.severity(*rule).is_enabled())
            .fold(RuleSet::none(), RuleSet::with)
    }

    pub fn shape_config(&self) -> HandleShapeConfig {
        match &self.handle_shapes {
            Some(shapes) => HandleShapeConfig::new(shapes.clone()),
            None => HandleShapeConfig::default(),
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if let Some(shapes) = &self.handle_shapes
            && let Some(index) = shapes.iter().position(|s| s.name.trim().is_empty())
        {
            return Err(ConfigError::EmptyShapeName { index });
        }
        Ok(self)
    }
}

pub fn parse_config(source: &str) -> Result<OrphanConfig, ConfigError> {
    let config: OrphanConfig = serde_json::from_str(source)?;
    config.validate()
}

pub fn load_config(path: &Path) -> Result<OrphanConfig, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading config");
    parse_config(&source)
}

/// The explicit `--config` file, else `orphan.json` in `cwd`, else defaults.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<OrphanConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        return load_config(&candidate);
    }
    Ok(OrphanConfig::default())
}
