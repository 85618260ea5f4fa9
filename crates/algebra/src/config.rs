//! Algebra configuration.
//!
//! ```toml
//! [solve]
//! resolution = "exact"
//!
//! [matmul]
//! resolution = "nearest"
//! ```
//!
//! Missing sections and keys fall back to defaults; unknown keys are rejected.

use std::str::FromStr;

use serde::Deserialize;

use crate::op::AlgebraOp;
use crate::registry::ResolutionMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlgebraConfig {
	pub solve: OperationConfig,
	pub matmul: OperationConfig,
}

/// Per-operation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperationConfig {
	pub resolution: ResolutionMode,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid algebra config: {0}")]
	Parse(#[from] toml::de::Error),
}

impl AlgebraConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn operation(&self, op: AlgebraOp) -> OperationConfig {
		match op {
			AlgebraOp::Solve => self.solve,
			AlgebraOp::Matmul => self.matmul,
		}
	}
}

impl FromStr for AlgebraConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_toml_str(s)
	}
}
