//! Engine configuration with YAML schema and validation.
//!
//! Mistake-proofing in two layers: serde schema checks (unknown fields are
//! rejected) plus runtime semantic validation of the coupling constants.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{OrreryError, OrreryResult};

/// Distance below which the coupling rule fires, in catalog units.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Target eccentricity when the coupling rule is quiescent.
pub const DEFAULT_BASE_ECCENTRICITY: f64 = 0.017;

/// Scale of the proximity distortion added to the baseline eccentricity.
pub const DEFAULT_DISTORTION_SCALE: f64 = 0.2;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// RNG seed for initial-phase drawing. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Proximity-coupling constants.
    #[validate(nested)]
    #[serde(default)]
    pub coupling: CouplingConfig,
}

impl EngineConfig {
    /// Configuration with a fixed seed and default coupling constants.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, YAML parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> OrreryResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OrreryError::config(format!("cannot read config file: {e}")))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> OrreryResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.coupling.validate_semantic()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            coupling: CouplingConfig::default(),
        }
    }
}

/// Constants of the proximity-coupling rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CouplingConfig {
    /// Distance below which the coupling fires, catalog units.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Target eccentricity outside the threshold.
    #[serde(default = "default_base_eccentricity")]
    pub base_eccentricity: f64,

    /// Distortion added per unit of proximity effect.
    #[serde(default = "default_distortion_scale")]
    pub distortion_scale: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_base_eccentricity() -> f64 {
    DEFAULT_BASE_ECCENTRICITY
}

fn default_distortion_scale() -> f64 {
    DEFAULT_DISTORTION_SCALE
}

impl CouplingConfig {
    /// Validate constraints the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns `Config` if any constant is out of range.
    pub fn validate_semantic(&self) -> OrreryResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(OrreryError::config(format!(
                "coupling threshold must be positive, got {}",
                self.threshold
            )));
        }
        if !self.base_eccentricity.is_finite()
            || self.base_eccentricity < 0.0
            || self.base_eccentricity >= 1.0
        {
            return Err(OrreryError::config(format!(
                "base eccentricity must be in [0, 1), got {}",
                self.base_eccentricity
            )));
        }
        if !self.distortion_scale.is_finite() || self.distortion_scale < 0.0 {
            return Err(OrreryError::config(format!(
                "distortion scale must be non-negative, got {}",
                self.distortion_scale
            )));
        }
        Ok(())
    }
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            base_eccentricity: DEFAULT_BASE_ECCENTRICITY,
            distortion_scale: DEFAULT_DISTORTION_SCALE,
        }
    }
}
