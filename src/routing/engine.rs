//! Core routing engine implementation

use tracing::{debug, warn};

use super::config::RoutingConfig;
use super::cost::estimate_cloud_cost_usd;
use super::decision::{
    DecisionReason, ExecutionTarget, LatencyRequirement, RoutingDecision, RoutingRequest,
    RoutingStatistics,
};
use super::error::{RoutingError, RoutingResult};
use super::scoring::{clamp_privacy_score, score_cloud, score_on_device};

/// Deterministic on-device/cloud routing engine
///
/// Holds a validated configuration and lock-free statistics counters; the
/// decision itself is a pure function of the request and configuration, so
/// the engine is safe to share across threads without synchronization and
/// identical requests always produce identical decisions.
///
/// Hard override rules are evaluated in a fixed order before score
/// comparison; the first matching rule wins:
///
/// 1. Forced routing (`force_on_device` / `force_cloud`)
/// 2. PII detected
/// 3. Privacy score at or above the configured threshold
/// 4. Real-time latency requirement
/// 5. Score comparison, ties favor on-device
#[derive(Debug)]
pub struct RoutingEngine {
    config: RoutingConfig,
    statistics: RoutingStatistics,
}

impl RoutingEngine {
    /// Create an engine with the given configuration
    ///
    /// Fails with [`RoutingError::ConfigurationError`] if the configuration
    /// is out of range.
    pub fn new(config: RoutingConfig) -> RoutingResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            statistics: RoutingStatistics::default(),
        })
    }

    /// Create an engine with the canonical default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: RoutingConfig::default(),
            statistics: RoutingStatistics::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Counters accumulated over the engine's lifetime
    pub fn statistics(&self) -> &RoutingStatistics {
        &self.statistics
    }

    /// Decide where a request should execute
    ///
    /// Both raw scores and the cloud cost estimate are computed up front
    /// regardless of which rule fires, so every decision carries full audit
    /// data. Returns [`RoutingError::InvalidRequest`] if both forced
    /// overrides are set; all other inputs are total.
    pub fn decide(&self, request: &RoutingRequest) -> RoutingResult<RoutingDecision> {
        if request.force_on_device && request.force_cloud {
            return Err(RoutingError::InvalidRequest {
                reason: "force_on_device and force_cloud are mutually exclusive".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&request.privacy_score) {
            warn!(
                privacy_score = request.privacy_score,
                "privacy score out of range, clamping to [0.0, 1.0]"
            );
        }

        let on_device_score = score_on_device(request, &self.config);
        let cloud_score = score_cloud(request, &self.config);
        let estimated_cost_usd = estimate_cloud_cost_usd(
            request.estimated_tokens,
            self.config.cloud_rate_usd_per_1k_tokens,
        );

        let (target, reason) = if request.force_on_device {
            (ExecutionTarget::OnDevice, DecisionReason::ForcedOnDevice)
        } else if request.force_cloud {
            (ExecutionTarget::Cloud, DecisionReason::ForcedCloud)
        } else if request.has_pii {
            (ExecutionTarget::OnDevice, DecisionReason::PiiDetected)
        } else if clamp_privacy_score(request.privacy_score) >= self.config.privacy_threshold {
            (ExecutionTarget::OnDevice, DecisionReason::PrivacyThreshold)
        } else if request.latency_requirement == LatencyRequirement::RealTime {
            (ExecutionTarget::OnDevice, DecisionReason::RealtimeLatency)
        } else if on_device_score >= cloud_score {
            // Ties favor on-device: local execution has no data-exposure risk.
            (ExecutionTarget::OnDevice, DecisionReason::ScoreOnDevice)
        } else {
            (ExecutionTarget::Cloud, DecisionReason::ScoreCloud)
        };

        let decision = RoutingDecision {
            target,
            on_device_score,
            cloud_score,
            estimated_cost_usd,
            reason,
        };

        self.statistics.record(&decision);
        debug!(
            route = decision.target.as_str(),
            reason = decision.reason.as_str(),
            on_device_score,
            cloud_score,
            estimated_cost_usd,
            "routing decision"
        );

        Ok(decision)
    }
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
