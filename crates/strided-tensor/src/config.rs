// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Library configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! max_elements = 16777216
//! print_precision = 4
//! print_threshold = 1000
//! ```

use crate::TensorError;
use std::path::Path;

/// Largest precision accepted by [`TensorConfig::validate`].
pub const MAX_PRINT_PRECISION: usize = 16;

/// Knobs for allocation limits and printing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TensorConfig {
    /// Upper bound on elements for [`crate::Tensor::with_config`]. `None` means unbounded.
    #[serde(default)]
    pub max_elements: Option<usize>,
    /// Digits after the decimal point when printing.
    #[serde(default = "default_precision")]
    pub print_precision: usize,
    /// Tensors with more elements than this print as a one-line summary.
    #[serde(default = "default_threshold")]
    pub print_threshold: usize,
}

fn default_precision() -> usize {
    4
}

fn default_threshold() -> usize {
    1000
}

impl TensorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TensorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TensorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TensorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| TensorError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TensorError> {
        toml::to_string_pretty(self)
            .map_err(|e| TensorError::Config(format!("TOML serialise error: {e}")))
    }

    /// Rejects settings no tensor could satisfy.
    pub fn validate(&self) -> Result<(), TensorError> {
        if self.print_precision > MAX_PRINT_PRECISION {
            return Err(TensorError::Config(format!(
                "print_precision {} exceeds maximum of {MAX_PRINT_PRECISION}",
                self.print_precision
            )));
        }
        if self.max_elements == Some(0) {
            return Err(TensorError::Config(
                "max_elements must be positive when set".into(),
            ));
        }
        Ok(())
    }

    /// Checks `numel` against [`TensorConfig::max_elements`].
    pub fn check_elements(&self, numel: usize) -> Result<(), TensorError> {
        match self.max_elements {
            Some(limit) if numel > limit => {
                tracing::warn!("rejecting allocation of {numel} elements (limit {limit})");
                Err(TensorError::ElementLimit {
                    requested: numel,
                    limit,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for TensorConfig {
    fn default() -> Self {
        Self {
            max_elements: None,
            print_precision: default_precision(),
            print_threshold: default_threshold(),
        }
    }
}
