// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{PdeError, PdeResult};
use crate::state::SpatialDimensions;
use serde::{Deserialize, Serialize};

/// Top-level discovery run configuration (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub num_spatial_dimensions: usize,
    /// Highest spatial derivative order H entering the library.
    pub highest_order_derivatives: usize,
    /// Maximum number of factors D in a library term.
    pub maximum_term_degree: usize,
    /// Exponent of the sparsity quasinorm (default: 0.1)
    #[serde(default = "default_p")]
    pub p: f64,
    /// Weight of the sparsity term (default: 1e-4)
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    pub num_epochs: usize,
    pub num_train_coll_points: usize,
    pub num_test_coll_points: usize,
    /// How collocation points are drawn each epoch (default: uniform)
    #[serde(default)]
    pub sampler: CollocationSampler,
    /// Epochs between loss reports (default: 10)
    #[serde(default = "default_report_interval")]
    pub report_interval: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Adam,
    GradientDescent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollocationSampler {
    #[default]
    Uniform,
    LatinHypercube,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_optimizer_kind")]
    pub kind: OptimizerKind,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckpointConfig {
    #[serde(default)]
    pub load_xi: bool,
    #[serde(default)]
    pub load_optimizer: bool,
    #[serde(default)]
    pub save_state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_file: Option<String>,
}

fn default_p() -> f64 {
    0.1
}
fn default_lambda() -> f64 {
    1e-4
}
fn default_report_interval() -> usize {
    10
}
fn default_optimizer_kind() -> OptimizerKind {
    OptimizerKind::Adam
}
fn default_learning_rate() -> f64 {
    1e-3
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            kind: default_optimizer_kind(),
            learning_rate: default_learning_rate(),
        }
    }
}

impl DiscoveryConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> PdeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> PdeResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn spatial_dimensions(&self) -> PdeResult<SpatialDimensions> {
        SpatialDimensions::try_from(self.num_spatial_dimensions)
    }

    /// Reject settings no run could use.
    pub fn validate(&self) -> PdeResult<()> {
        self.spatial_dimensions()?;
        if !(self.p.is_finite() && self.p > 0.0) {
            return Err(PdeError::ConfigError(format!(
                "p must be positive and finite, got {}",
                self.p
            )));
        }
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return Err(PdeError::ConfigError(format!(
                "lambda must be non-negative and finite, got {}",
                self.lambda
            )));
        }
        let lr = self.optimizer.learning_rate;
        if !(lr.is_finite() && lr > 0.0) {
            return Err(PdeError::ConfigError(format!(
                "learning_rate must be positive and finite, got {lr}"
            )));
        }
        if self.num_train_coll_points == 0 || self.num_test_coll_points == 0 {
            return Err(PdeError::ConfigError(
                "collocation point counts must be >= 1".to_string(),
            ));
        }
        if self.report_interval == 0 {
            return Err(PdeError::ConfigError(
                "report_interval must be >= 1".to_string(),
            ));
        }
        let ckpt = &self.checkpoint;
        if (ckpt.load_xi || ckpt.load_optimizer) && ckpt.load_file.is_none() {
            return Err(PdeError::ConfigError(
                "checkpoint loading requested without load_file".to_string(),
            ));
        }
        if ckpt.save_state && ckpt.save_file.is_none() {
            return Err(PdeError::ConfigError(
                "save_state requested without save_file".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/pde-types/, the fixtures live two levels up.
    fn config_path(relative: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("configs")
            .join(relative)
            .to_string_lossy()
            .to_string()
    }

    fn minimal_json() -> String {
        r#"{
            "num_spatial_dimensions": 1,
            "highest_order_derivatives": 3,
            "maximum_term_degree": 2,
            "num_epochs": 5,
            "num_train_coll_points": 100,
            "num_test_coll_points": 50
        }"#
        .to_string()
    }

    #[test]
    fn test_load_burgers_config() {
        let cfg = DiscoveryConfig::from_file(&config_path("burgers_1d.json")).unwrap();
        assert_eq!(cfg.spatial_dimensions().unwrap(), SpatialDimensions::One);
        assert_eq!(cfg.highest_order_derivatives, 3);
        assert_eq!(cfg.maximum_term_degree, 2);
        assert_eq!(cfg.optimizer.kind, OptimizerKind::Adam);
        assert!(!cfg.checkpoint.load_xi);
    }

    #[test]
    fn test_load_heat_2d_config() {
        let cfg = DiscoveryConfig::from_file(&config_path("heat_2d.json")).unwrap();
        assert_eq!(cfg.spatial_dimensions().unwrap(), SpatialDimensions::Two);
        assert_eq!(cfg.optimizer.kind, OptimizerKind::GradientDescent);
        assert_eq!(cfg.sampler, CollocationSampler::LatinHypercube);
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = DiscoveryConfig::from_json_str(&minimal_json()).unwrap();
        assert!((cfg.p - 0.1).abs() < 1e-15);
        assert!((cfg.lambda - 1e-4).abs() < 1e-18);
        assert_eq!(cfg.report_interval, 10);
        assert_eq!(cfg.optimizer.kind, OptimizerKind::Adam);
        assert!((cfg.optimizer.learning_rate - 1e-3).abs() < 1e-15);
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.sampler, CollocationSampler::Uniform);
    }

    #[test]
    fn test_latin_hypercube_sampler_parsed() {
        let json = minimal_json().replace(
            "\"num_epochs\": 5,",
            "\"num_epochs\": 5, \"sampler\": \"latin_hypercube\",",
        );
        let cfg = DiscoveryConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.sampler, CollocationSampler::LatinHypercube);
    }

    #[test]
    fn test_rejects_three_dimensions() {
        let json = minimal_json().replace(
            "\"num_spatial_dimensions\": 1",
            "\"num_spatial_dimensions\": 3",
        );
        let err = DiscoveryConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, PdeError::UnsupportedDimension(3)));
    }

    #[test]
    fn test_rejects_non_positive_p() {
        let mut cfg = DiscoveryConfig::from_json_str(&minimal_json()).unwrap();
        cfg.p = 0.0;
        match cfg.validate().unwrap_err() {
            PdeError::ConfigError(msg) => assert!(msg.contains("p must be positive")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_load_without_file() {
        let mut cfg = DiscoveryConfig::from_json_str(&minimal_json()).unwrap();
        cfg.checkpoint.load_xi = true;
        assert!(matches!(cfg.validate(), Err(PdeError::ConfigError(_))));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = DiscoveryConfig::from_file(&config_path("burgers_1d.json")).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2 = DiscoveryConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.num_epochs, cfg2.num_epochs);
        assert_eq!(cfg.maximum_term_degree, cfg2.maximum_term_degree);
        assert_eq!(cfg.optimizer.kind, cfg2.optimizer.kind);
    }
}
