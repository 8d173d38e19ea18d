//! Scene-wide constants read by every shading evaluation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrandError};
use crate::traits::Validate;

/// Curve (hair) kernel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveKernelData {
    /// Blend between the plain view-facing normal (0) and the full
    /// tangent-corrected normal (1).
    pub normalmix: f32,
}

impl CurveKernelData {
    pub const DEFAULT_NORMALMIX: f32 = 1.0;

    pub fn new(normalmix: f32) -> Self {
        Self { normalmix }
    }
}

impl Default for CurveKernelData {
    fn default() -> Self {
        Self {
            normalmix: Self::DEFAULT_NORMALMIX,
        }
    }
}

impl Validate for CurveKernelData {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.normalmix) {
            return Err(StrandError::Config(format!(
                "normalmix must be in [0, 1], got {}",
                self.normalmix
            )));
        }
        Ok(())
    }
}

/// Immutable kernel configuration, passed by reference into shading calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub curve: CurveKernelData,
}

impl KernelConfig {
    pub fn with_normalmix(normalmix: f32) -> Self {
        Self {
            curve: CurveKernelData::new(normalmix),
        }
    }

    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            log::warn!("rejecting kernel config: {e}");
            return Err(e);
        }
        log::debug!("loaded kernel config: {config:?}");
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Validate for KernelConfig {
    fn validate(&self) -> Result<()> {
        self.curve.validate()
    }
}
