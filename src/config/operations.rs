//! Config loading, resolution, and validation.

use super::model::{Config, Inputs, Token};
use super::types::{FileConfig, default_protected_branches, default_stale_days};
use crate::error::{Result, SweepError};
use crate::protection::parse_protected_list;
use std::path::Path;

impl FileConfig {
    /// Load config defaults from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config defaults from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| SweepError::UserError(format!("failed to parse config YAML: {}", e)))
    }
}

impl Inputs {
    fn get(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }
}

impl Config {
    /// Resolve the run configuration.
    ///
    /// Precedence per field: explicit input, then `file`, then the built-in
    /// default. Boolean inputs keep the runner's string conventions:
    /// `dry_run` and `delete_stale` are on only for `"true"`, while
    /// `delete_on_merge` is on unless it is `"false"`.
    pub fn resolve(inputs: &Inputs, file: &FileConfig) -> Result<Self> {
        let token = Inputs::get(&inputs.github_token).ok_or_else(|| {
            SweepError::UserError("Input required and not supplied: github_token".to_string())
        })?;

        let protected_branches = match Inputs::get(&inputs.protected_branches) {
            Some(raw) => parse_protected_list(raw),
            None => file
                .protected_branches
                .clone()
                .unwrap_or_else(default_protected_branches),
        };

        let dry_run = match Inputs::get(&inputs.dry_run) {
            Some(raw) => raw == "true",
            None => file.dry_run.unwrap_or(false),
        };

        let delete_on_merge = match Inputs::get(&inputs.delete_on_merge) {
            Some(raw) => raw != "false",
            None => file.delete_on_merge.unwrap_or(true),
        };

        let delete_stale = match Inputs::get(&inputs.delete_stale) {
            Some(raw) => raw == "true",
            None => file.delete_stale.unwrap_or(false),
        };

        let stale_days = match Inputs::get(&inputs.stale_days) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                SweepError::UserError(format!(
                    "config validation failed: stale_days must be a non-negative integer (got '{}')",
                    raw
                ))
            })?,
            None => file.stale_days.unwrap_or_else(default_stale_days),
        };

        let config = Self {
            token: Token::new(token),
            protected_branches,
            dry_run,
            delete_on_merge,
            delete_stale,
            stale_days,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `stale_days` must be positive
    /// - protected entries must be non-empty after trimming
    pub fn validate(&self) -> Result<()> {
        if self.stale_days == 0 {
            return Err(SweepError::UserError(
                "config validation failed: stale_days must be greater than 0".to_string(),
            ));
        }

        if self.protected_branches.iter().any(|p| p.trim().is_empty()) {
            return Err(SweepError::UserError(
                "config validation failed: protected_branches entries must be non-empty"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
