//! Scoring primitives and the on-device/cloud scorers
//!
//! Each side gets an unbounded additive score; scores are only compared
//! against each other, never shown to users as a percentage. The two sides
//! are independent heuristics, not symmetric complements: the on-device
//! privacy bonus (30 per privacy point) deliberately outweighs the cloud
//! privacy penalty (25 per point).

use serde::{Deserialize, Serialize};

use super::config::{RoutingConfig, ScoringWeights};
use super::decision::{
    CostSensitivity, LatencyRequirement, QualityRequirement, RoutingRequest,
};

/// Clamp a privacy score to `[0.0, 1.0]`
///
/// Upstream privacy scanners are heuristic and can drift slightly out of
/// range; routing clamps instead of rejecting. NaN maps to 0.0.
pub(crate) fn clamp_privacy_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// On-device latency bonus for a latency requirement
pub fn latency_bonus_on_device(requirement: LatencyRequirement, weights: &ScoringWeights) -> f64 {
    match requirement {
        LatencyRequirement::RealTime => weights.latency_real_time,
        LatencyRequirement::Low => weights.latency_low,
        LatencyRequirement::Medium => weights.latency_medium,
        LatencyRequirement::Flexible => weights.latency_flexible,
    }
}

/// On-device cost bonus for a cost sensitivity level
pub fn cost_bonus_on_device(sensitivity: CostSensitivity, weights: &ScoringWeights) -> f64 {
    match sensitivity {
        CostSensitivity::High => weights.cost_high,
        CostSensitivity::Medium => weights.cost_medium,
        CostSensitivity::Low => weights.cost_low,
    }
}

/// Cloud quality bonus for a quality requirement
pub fn quality_bonus_cloud(requirement: QualityRequirement, weights: &ScoringWeights) -> f64 {
    match requirement {
        QualityRequirement::High => weights.quality_high,
        QualityRequirement::Medium => weights.quality_medium,
        QualityRequirement::Standard => weights.quality_standard,
    }
}

/// Cloud flexibility bonus: only flexible-latency requests benefit
pub fn flexibility_bonus_cloud(requirement: LatencyRequirement, weights: &ScoringWeights) -> f64 {
    match requirement {
        LatencyRequirement::Flexible => weights.flexibility_bonus,
        _ => 0.0,
    }
}

/// Per-term contributions to one side's score
///
/// Terms that do not apply to a side (quality on-device, for example) stay
/// at 0.0. Penalties appear as negative contributions so the fields sum to
/// `total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub privacy: f64,
    pub latency: f64,
    pub cost: f64,
    pub quality: f64,
    pub flexibility: f64,
    pub preference: f64,
    pub large_request: f64,
    pub total: f64,
}

/// Break down the on-device score for a request
pub fn on_device_breakdown(request: &RoutingRequest, config: &RoutingConfig) -> ScoreBreakdown {
    let weights = &config.weights;
    let privacy = weights.privacy_weight_on_device * clamp_privacy_score(request.privacy_score);
    let latency = latency_bonus_on_device(request.latency_requirement, weights);
    let cost = cost_bonus_on_device(request.cost_sensitivity, weights);
    let preference = if request.prefer_on_device {
        weights.preference_bonus
    } else {
        0.0
    };
    let large_request = if request.estimated_tokens > config.large_request_tokens {
        -weights.large_request_penalty
    } else {
        0.0
    };

    ScoreBreakdown {
        privacy,
        latency,
        cost,
        quality: 0.0,
        flexibility: 0.0,
        preference,
        large_request,
        total: privacy + latency + cost + preference + large_request,
    }
}

/// Break down the cloud score for a request
pub fn cloud_breakdown(request: &RoutingRequest, config: &RoutingConfig) -> ScoreBreakdown {
    let weights = &config.weights;
    let quality = quality_bonus_cloud(request.quality_requirement, weights);
    let large_request = if request.estimated_tokens > config.large_request_tokens {
        weights.large_request_bonus
    } else {
        0.0
    };
    let flexibility = flexibility_bonus_cloud(request.latency_requirement, weights);
    // The preference bonus is a true either/or with the on-device side.
    let preference = if request.prefer_on_device {
        0.0
    } else {
        weights.preference_bonus
    };
    let privacy = -weights.privacy_penalty_cloud * clamp_privacy_score(request.privacy_score);
    let cost = if request.cost_sensitivity == CostSensitivity::High {
        -weights.cloud_cost_penalty
    } else {
        0.0
    };

    ScoreBreakdown {
        privacy,
        latency: 0.0,
        cost,
        quality,
        flexibility,
        preference,
        large_request,
        total: quality + large_request + flexibility + preference + privacy + cost,
    }
}

/// Score a request for on-device execution
pub fn score_on_device(request: &RoutingRequest, config: &RoutingConfig) -> f64 {
    on_device_breakdown(request, config).total
}

/// Score a request for cloud execution
pub fn score_cloud(request: &RoutingRequest, config: &RoutingConfig) -> f64 {
    cloud_breakdown(request, config).total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn latency_bonus_table() {
        let w = ScoringWeights::default();
        assert_eq!(latency_bonus_on_device(LatencyRequirement::RealTime, &w), 40.0);
        assert_eq!(latency_bonus_on_device(LatencyRequirement::Low, &w), 30.0);
        assert_eq!(latency_bonus_on_device(LatencyRequirement::Medium, &w), 20.0);
        assert_eq!(latency_bonus_on_device(LatencyRequirement::Flexible, &w), 10.0);
    }

    #[test]
    fn cost_bonus_table() {
        let w = ScoringWeights::default();
        assert_eq!(cost_bonus_on_device(CostSensitivity::High, &w), 30.0);
        assert_eq!(cost_bonus_on_device(CostSensitivity::Medium, &w), 20.0);
        assert_eq!(cost_bonus_on_device(CostSensitivity::Low, &w), 10.0);
    }

    #[test]
    fn quality_bonus_table() {
        let w = ScoringWeights::default();
        assert_eq!(quality_bonus_cloud(QualityRequirement::High, &w), 40.0);
        assert_eq!(quality_bonus_cloud(QualityRequirement::Medium, &w), 25.0);
        assert_eq!(quality_bonus_cloud(QualityRequirement::Standard, &w), 15.0);
    }

    #[test]
    fn flexibility_bonus_only_for_flexible_latency() {
        let w = ScoringWeights::default();
        assert_eq!(flexibility_bonus_cloud(LatencyRequirement::Flexible, &w), 15.0);
        assert_eq!(flexibility_bonus_cloud(LatencyRequirement::RealTime, &w), 0.0);
        assert_eq!(flexibility_bonus_cloud(LatencyRequirement::Low, &w), 0.0);
        assert_eq!(flexibility_bonus_cloud(LatencyRequirement::Medium, &w), 0.0);
    }

    #[test]
    fn privacy_score_is_clamped() {
        assert_eq!(clamp_privacy_score(-0.5), 0.0);
        assert_eq!(clamp_privacy_score(1.0001), 1.0);
        assert_eq!(clamp_privacy_score(0.4), 0.4);
        assert_eq!(clamp_privacy_score(f64::NAN), 0.0);
    }

    #[test]
    fn on_device_breakdown_sums_its_terms() {
        let config = RoutingConfig::default();
        let req = RoutingRequest::new(500)
            .with_privacy_score(0.1)
            .with_latency(LatencyRequirement::Flexible)
            .with_cost_sensitivity(CostSensitivity::Low)
            .with_quality(QualityRequirement::High);

        let breakdown = on_device_breakdown(&req, &config);
        assert!(approx(breakdown.privacy, 3.0));
        assert_eq!(breakdown.latency, 10.0);
        assert_eq!(breakdown.cost, 10.0);
        assert_eq!(breakdown.preference, 0.0);
        assert_eq!(breakdown.large_request, 0.0);
        assert!(approx(breakdown.total, 23.0));
        assert_eq!(breakdown.quality, 0.0);
        assert_eq!(breakdown.flexibility, 0.0);
    }

    #[test]
    fn cloud_breakdown_sums_its_terms() {
        let config = RoutingConfig::default();
        let req = RoutingRequest::new(500)
            .with_privacy_score(0.1)
            .with_latency(LatencyRequirement::Flexible)
            .with_cost_sensitivity(CostSensitivity::Low)
            .with_quality(QualityRequirement::High);

        let breakdown = cloud_breakdown(&req, &config);
        assert_eq!(breakdown.quality, 40.0);
        assert_eq!(breakdown.large_request, 0.0);
        assert_eq!(breakdown.flexibility, 15.0);
        assert_eq!(breakdown.preference, 20.0);
        assert!(approx(breakdown.privacy, -2.5));
        assert_eq!(breakdown.cost, 0.0);
        assert!(approx(breakdown.total, 72.5));
    }

    #[test]
    fn large_request_penalizes_on_device_and_favors_cloud() {
        let config = RoutingConfig::default();
        let small = RoutingRequest::new(1000); // at threshold, not above
        let large = RoutingRequest::new(1001);

        let on_device_delta = score_on_device(&small, &config) - score_on_device(&large, &config);
        assert!(approx(on_device_delta, 10.0));

        let cloud_delta = score_cloud(&large, &config) - score_cloud(&small, &config);
        assert!(approx(cloud_delta, 20.0));
    }

    #[test]
    fn preference_bonus_is_either_or() {
        let config = RoutingConfig::default();
        let prefer_local = RoutingRequest::new(100).with_device_preference(true);
        let prefer_cloud = RoutingRequest::new(100).with_device_preference(false);

        assert_eq!(on_device_breakdown(&prefer_local, &config).preference, 20.0);
        assert_eq!(cloud_breakdown(&prefer_local, &config).preference, 0.0);

        assert_eq!(on_device_breakdown(&prefer_cloud, &config).preference, 0.0);
        assert_eq!(cloud_breakdown(&prefer_cloud, &config).preference, 20.0);
    }

    #[test]
    fn cloud_cost_penalty_applies_only_at_high_sensitivity() {
        let config = RoutingConfig::default();
        let high = RoutingRequest::new(100).with_cost_sensitivity(CostSensitivity::High);
        let medium = RoutingRequest::new(100).with_cost_sensitivity(CostSensitivity::Medium);

        assert_eq!(cloud_breakdown(&high, &config).cost, -20.0);
        assert_eq!(cloud_breakdown(&medium, &config).cost, 0.0);
    }

    #[test]
    fn out_of_range_privacy_scores_are_clamped_in_both_scorers() {
        let config = RoutingConfig::default();
        let drifted = RoutingRequest::new(100).with_privacy_score(1.0001);
        let exact = RoutingRequest::new(100).with_privacy_score(1.0);

        assert_eq!(
            score_on_device(&drifted, &config),
            score_on_device(&exact, &config)
        );
        assert_eq!(score_cloud(&drifted, &config), score_cloud(&exact, &config));
    }

    #[test]
    fn scorers_are_pure() {
        let config = RoutingConfig::default();
        let req = RoutingRequest::new(5000)
            .with_privacy_score(0.3)
            .with_cost_sensitivity(CostSensitivity::High)
            .with_device_preference(true);

        let first = (score_on_device(&req, &config), score_cloud(&req, &config));
        let second = (score_on_device(&req, &config), score_cloud(&req, &config));
        assert_eq!(first, second);
    }
}
