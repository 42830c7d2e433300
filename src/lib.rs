//! RunAnywhere routing decision engine
//!
//! Decides whether a generation request should execute on-device or in the
//! cloud, based on the request's privacy, latency, cost, and quality
//! attributes. The engine is a synchronous, side-effect-free policy function:
//! it performs no I/O and dispatches nothing itself. Callers construct a
//! [`RoutingRequest`], call [`RoutingEngine::decide`], and act on the
//! returned [`RoutingDecision`] (which carries both raw scores, the cloud
//! cost estimate, and a stable reason token for telemetry).

pub mod routing;

pub use routing::{
    cloud_breakdown, estimate_cloud_cost_usd, on_device_breakdown, score_cloud, score_on_device,
    CostSensitivity, DecisionReason, ExecutionTarget, LatencyRequirement, QualityRequirement,
    RoutingConfig, RoutingDecision, RoutingEngine, RoutingError, RoutingRequest, RoutingResult,
    RoutingStatistics, ScoreBreakdown, ScoringWeights, StatisticsSnapshot,
};
