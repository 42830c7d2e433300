//! Configuration types for the routing engine

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{RoutingError, RoutingResult};

/// Point values used by the on-device and cloud scorers
///
/// Defaults are the canonical values required for behavioral parity with the
/// platform SDK implementations; changing them changes which requests route
/// where, so they are grouped here rather than scattered through the scoring
/// logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// On-device bonus multiplier applied to the privacy score
    pub privacy_weight_on_device: f64,
    /// Cloud penalty multiplier applied to the privacy score
    pub privacy_penalty_cloud: f64,
    /// On-device bonus for a real-time latency requirement
    pub latency_real_time: f64,
    /// On-device bonus for a low latency requirement
    pub latency_low: f64,
    /// On-device bonus for a medium latency requirement
    pub latency_medium: f64,
    /// On-device bonus for a flexible latency requirement
    pub latency_flexible: f64,
    /// On-device bonus for high cost sensitivity
    pub cost_high: f64,
    /// On-device bonus for medium cost sensitivity
    pub cost_medium: f64,
    /// On-device bonus for low cost sensitivity
    pub cost_low: f64,
    /// Cloud bonus for a high quality requirement
    pub quality_high: f64,
    /// Cloud bonus for a medium quality requirement
    pub quality_medium: f64,
    /// Cloud bonus for a standard quality requirement
    pub quality_standard: f64,
    /// Cloud bonus when the latency requirement is flexible
    pub flexibility_bonus: f64,
    /// Bonus for the side matching the `prefer_on_device` flag
    pub preference_bonus: f64,
    /// On-device penalty for requests above the large-request threshold
    pub large_request_penalty: f64,
    /// Cloud bonus for requests above the large-request threshold
    pub large_request_bonus: f64,
    /// Cloud penalty when cost sensitivity is high
    pub cloud_cost_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            privacy_weight_on_device: 30.0,
            privacy_penalty_cloud: 25.0,
            latency_real_time: 40.0,
            latency_low: 30.0,
            latency_medium: 20.0,
            latency_flexible: 10.0,
            cost_high: 30.0,
            cost_medium: 20.0,
            cost_low: 10.0,
            quality_high: 40.0,
            quality_medium: 25.0,
            quality_standard: 15.0,
            flexibility_bonus: 15.0,
            preference_bonus: 20.0,
            large_request_penalty: 10.0,
            large_request_bonus: 20.0,
            cloud_cost_penalty: 20.0,
        }
    }
}

/// Complete routing engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Privacy score at or above which requests always route on-device
    pub privacy_threshold: f64,
    /// Flat cloud rate in USD per 1 000 tokens, used for the per-request
    /// cost estimate (not a billing calculation)
    pub cloud_rate_usd_per_1k_tokens: f64,
    /// Token count above which the large-request terms apply
    pub large_request_tokens: u64,
    /// Scorer point values
    pub weights: ScoringWeights,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            privacy_threshold: 0.8,
            cloud_rate_usd_per_1k_tokens: 0.002,
            large_request_tokens: 1000,
            weights: ScoringWeights::default(),
        }
    }
}

impl RoutingConfig {
    /// Validate that all values are within their allowed ranges
    pub fn validate(&self) -> RoutingResult<()> {
        if !(0.0..=1.0).contains(&self.privacy_threshold) {
            return Err(RoutingError::ConfigurationError {
                key: "privacy_threshold".to_string(),
                reason: format!(
                    "must be between 0.0 and 1.0, got {}",
                    self.privacy_threshold
                ),
            });
        }

        if self.cloud_rate_usd_per_1k_tokens < 0.0 || !self.cloud_rate_usd_per_1k_tokens.is_finite()
        {
            return Err(RoutingError::ConfigurationError {
                key: "cloud_rate_usd_per_1k_tokens".to_string(),
                reason: format!(
                    "must be >= 0.0, got {}",
                    self.cloud_rate_usd_per_1k_tokens
                ),
            });
        }

        if self.large_request_tokens == 0 {
            return Err(RoutingError::ConfigurationError {
                key: "large_request_tokens".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let w = &self.weights;
        let weight_fields = [
            ("weights.privacy_weight_on_device", w.privacy_weight_on_device),
            ("weights.privacy_penalty_cloud", w.privacy_penalty_cloud),
            ("weights.latency_real_time", w.latency_real_time),
            ("weights.latency_low", w.latency_low),
            ("weights.latency_medium", w.latency_medium),
            ("weights.latency_flexible", w.latency_flexible),
            ("weights.cost_high", w.cost_high),
            ("weights.cost_medium", w.cost_medium),
            ("weights.cost_low", w.cost_low),
            ("weights.quality_high", w.quality_high),
            ("weights.quality_medium", w.quality_medium),
            ("weights.quality_standard", w.quality_standard),
            ("weights.flexibility_bonus", w.flexibility_bonus),
            ("weights.preference_bonus", w.preference_bonus),
            ("weights.large_request_penalty", w.large_request_penalty),
            ("weights.large_request_bonus", w.large_request_bonus),
            ("weights.cloud_cost_penalty", w.cloud_cost_penalty),
        ];
        for (key, value) in weight_fields {
            if value < 0.0 || !value.is_finite() {
                return Err(RoutingError::ConfigurationError {
                    key: key.to_string(),
                    reason: format!("must be a non-negative finite number, got {value}"),
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> RoutingResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|source| RoutingError::ConfigParse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> RoutingResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RoutingError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
