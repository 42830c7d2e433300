//! Routing request and decision types

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::cost::usd_to_micro;

/// Where an inference request should execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionTarget {
    /// Run inference locally on the user's device
    OnDevice,
    /// Run inference via a remote cloud API
    Cloud,
    /// Reserved for fallback-style policies; no current decision path
    /// produces this value
    Hybrid,
}

impl ExecutionTarget {
    /// Stable token for logs and telemetry
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionTarget::OnDevice => "on_device",
            ExecutionTarget::Cloud => "cloud",
            ExecutionTarget::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-declared tolerance for response delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyRequirement {
    /// Strictest: network round-trips are assumed incompatible
    RealTime,
    Low,
    Medium,
    /// Most tolerant of delay
    Flexible,
}

/// How strongly the caller wants to minimize monetary cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSensitivity {
    /// Highly cost-sensitive: prefers cheaper, i.e. on-device
    High,
    Medium,
    Low,
}

/// How strongly the caller wants the highest-fidelity response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRequirement {
    Standard,
    Medium,
    High,
}

/// Which rule or score path produced a routing decision
///
/// The serialized form of each variant is the stable reason token forwarded
/// verbatim to telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    ForcedOnDevice,
    ForcedCloud,
    PiiDetected,
    PrivacyThreshold,
    RealtimeLatency,
    ScoreOnDevice,
    ScoreCloud,
}

impl DecisionReason {
    /// Stable token for logs and telemetry
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::ForcedOnDevice => "forced_on_device",
            DecisionReason::ForcedCloud => "forced_cloud",
            DecisionReason::PiiDetected => "pii_detected",
            DecisionReason::PrivacyThreshold => "privacy_threshold",
            DecisionReason::RealtimeLatency => "realtime_latency",
            DecisionReason::ScoreOnDevice => "score_on_device",
            DecisionReason::ScoreCloud => "score_cloud",
        }
    }

    /// Whether this reason comes from a hard override rule rather than
    /// score comparison
    pub fn is_override(&self) -> bool {
        !matches!(
            self,
            DecisionReason::ScoreOnDevice | DecisionReason::ScoreCloud
        )
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request routing input
///
/// Constructed by caller-side logic for each generation call: the privacy
/// score comes from an upstream PII/privacy scanner, the token estimate from
/// a tokenizer, and `prefer_on_device` from static configuration. The engine
/// treats the request as a plain value; it manages no request identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingRequest {
    /// Manual override: always route on-device
    pub force_on_device: bool,
    /// Manual override: always route to cloud. Mutually exclusive with
    /// `force_on_device`; setting both is an [`super::RoutingError::InvalidRequest`].
    pub force_cloud: bool,
    /// Request content was detected to contain PII
    pub has_pii: bool,
    /// Privacy sensitivity in `[0.0, 1.0]`, 1.0 = maximally sensitive.
    /// Out-of-range values are clamped before use.
    pub privacy_score: f64,
    pub latency_requirement: LatencyRequirement,
    pub cost_sensitivity: CostSensitivity,
    pub quality_requirement: QualityRequirement,
    /// Estimated total tokens (prompt + completion)
    pub estimated_tokens: u64,
    /// Static configuration-level routing preference
    pub prefer_on_device: bool,
}

impl RoutingRequest {
    /// Create a request with neutral defaults for the given token estimate
    pub fn new(estimated_tokens: u64) -> Self {
        Self {
            force_on_device: false,
            force_cloud: false,
            has_pii: false,
            privacy_score: 0.0,
            latency_requirement: LatencyRequirement::Medium,
            cost_sensitivity: CostSensitivity::Medium,
            quality_requirement: QualityRequirement::Standard,
            estimated_tokens,
            prefer_on_device: false,
        }
    }

    pub fn with_privacy_score(mut self, privacy_score: f64) -> Self {
        self.privacy_score = privacy_score;
        self
    }

    pub fn with_pii(mut self, has_pii: bool) -> Self {
        self.has_pii = has_pii;
        self
    }

    pub fn with_latency(mut self, latency_requirement: LatencyRequirement) -> Self {
        self.latency_requirement = latency_requirement;
        self
    }

    pub fn with_cost_sensitivity(mut self, cost_sensitivity: CostSensitivity) -> Self {
        self.cost_sensitivity = cost_sensitivity;
        self
    }

    pub fn with_quality(mut self, quality_requirement: QualityRequirement) -> Self {
        self.quality_requirement = quality_requirement;
        self
    }

    pub fn with_device_preference(mut self, prefer_on_device: bool) -> Self {
        self.prefer_on_device = prefer_on_device;
        self
    }

    pub fn force_on_device(mut self) -> Self {
        self.force_on_device = true;
        self
    }

    pub fn force_cloud(mut self) -> Self {
        self.force_cloud = true;
        self
    }
}

/// Routing decision outcome
///
/// Immutable value produced once per [`super::RoutingEngine::decide`] call.
/// Both raw scores and the cloud cost estimate are populated even when an
/// override rule fired, so every decision carries full audit data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub target: ExecutionTarget,
    pub on_device_score: f64,
    pub cloud_score: f64,
    /// Cloud cost estimate for this request, computed unconditionally
    pub estimated_cost_usd: f64,
    pub reason: DecisionReason,
}

impl RoutingDecision {
    pub fn is_on_device(&self) -> bool {
        self.target == ExecutionTarget::OnDevice
    }

    pub fn is_cloud(&self) -> bool {
        self.target == ExecutionTarget::Cloud
    }

    /// Whether a hard override rule short-circuited score comparison
    pub fn was_overridden(&self) -> bool {
        self.reason.is_override()
    }
}

/// Routing statistics with lock-free atomic counters
///
/// All counters use `AtomicU64` with `Relaxed` ordering; updates never
/// block. Cumulative estimated cloud spend is stored as micro-dollars
/// (1 USD = 1 000 000 micro-dollars) to avoid floating-point drift in
/// long-running aggregations.
#[derive(Default)]
pub struct RoutingStatistics {
    total_decisions: AtomicU64,
    on_device_routes: AtomicU64,
    cloud_routes: AtomicU64,
    forced_on_device_routes: AtomicU64,
    forced_cloud_routes: AtomicU64,
    pii_routes: AtomicU64,
    privacy_threshold_routes: AtomicU64,
    realtime_latency_routes: AtomicU64,
    estimated_cloud_spend_micro_usd: AtomicU64,
}

impl RoutingStatistics {
    /// Total number of decisions recorded
    pub fn total_decisions(&self) -> u64 {
        self.total_decisions.load(Ordering::Relaxed)
    }

    /// Decisions that targeted on-device execution
    pub fn on_device_routes(&self) -> u64 {
        self.on_device_routes.load(Ordering::Relaxed)
    }

    /// Decisions that targeted cloud execution
    pub fn cloud_routes(&self) -> u64 {
        self.cloud_routes.load(Ordering::Relaxed)
    }

    /// Decisions forced on-device by manual override
    pub fn forced_on_device_routes(&self) -> u64 {
        self.forced_on_device_routes.load(Ordering::Relaxed)
    }

    /// Decisions forced to cloud by manual override
    pub fn forced_cloud_routes(&self) -> u64 {
        self.forced_cloud_routes.load(Ordering::Relaxed)
    }

    /// Decisions routed on-device because PII was detected
    pub fn pii_routes(&self) -> u64 {
        self.pii_routes.load(Ordering::Relaxed)
    }

    /// Decisions routed on-device by the privacy score threshold
    pub fn privacy_threshold_routes(&self) -> u64 {
        self.privacy_threshold_routes.load(Ordering::Relaxed)
    }

    /// Decisions routed on-device by the real-time latency rule
    pub fn realtime_latency_routes(&self) -> u64 {
        self.realtime_latency_routes.load(Ordering::Relaxed)
    }

    /// Decisions produced by any hard override rule
    pub fn override_routes(&self) -> u64 {
        self.forced_on_device_routes()
            + self.forced_cloud_routes()
            + self.pii_routes()
            + self.privacy_threshold_routes()
            + self.realtime_latency_routes()
    }

    /// Cumulative estimated cost of cloud-routed requests, in USD
    pub fn estimated_cloud_spend_usd(&self) -> f64 {
        self.estimated_cloud_spend_micro_usd.load(Ordering::Relaxed) as f64 / 1_000_000.0
    }

    /// Record a completed decision, updating all relevant counters
    pub fn record(&self, decision: &RoutingDecision) {
        self.total_decisions.fetch_add(1, Ordering::Relaxed);

        match decision.target {
            ExecutionTarget::OnDevice => {
                self.on_device_routes.fetch_add(1, Ordering::Relaxed);
            }
            ExecutionTarget::Cloud => {
                self.cloud_routes.fetch_add(1, Ordering::Relaxed);
                self.estimated_cloud_spend_micro_usd
                    .fetch_add(usd_to_micro(decision.estimated_cost_usd), Ordering::Relaxed);
            }
            ExecutionTarget::Hybrid => {}
        }

        match decision.reason {
            DecisionReason::ForcedOnDevice => {
                self.forced_on_device_routes.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::ForcedCloud => {
                self.forced_cloud_routes.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::PiiDetected => {
                self.pii_routes.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::PrivacyThreshold => {
                self.privacy_threshold_routes.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::RealtimeLatency => {
                self.realtime_latency_routes.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::ScoreOnDevice | DecisionReason::ScoreCloud => {}
        }
    }

    /// Take a point-in-time snapshot suitable for serialization
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_decisions: self.total_decisions(),
            on_device_routes: self.on_device_routes(),
            cloud_routes: self.cloud_routes(),
            forced_on_device_routes: self.forced_on_device_routes(),
            forced_cloud_routes: self.forced_cloud_routes(),
            pii_routes: self.pii_routes(),
            privacy_threshold_routes: self.privacy_threshold_routes(),
            realtime_latency_routes: self.realtime_latency_routes(),
            override_routes: self.override_routes(),
            estimated_cloud_spend_usd: self.estimated_cloud_spend_usd(),
        }
    }
}

impl std::fmt::Debug for RoutingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingStatistics")
            .field("total_decisions", &self.total_decisions())
            .field("on_device_routes", &self.on_device_routes())
            .field("cloud_routes", &self.cloud_routes())
            .field("forced_on_device_routes", &self.forced_on_device_routes())
            .field("forced_cloud_routes", &self.forced_cloud_routes())
            .field("pii_routes", &self.pii_routes())
            .field("privacy_threshold_routes", &self.privacy_threshold_routes())
            .field("realtime_latency_routes", &self.realtime_latency_routes())
            .field(
                "estimated_cloud_spend_usd",
                &self.estimated_cloud_spend_usd(),
            )
            .finish()
    }
}

/// Point-in-time view of [`RoutingStatistics`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_decisions: u64,
    pub on_device_routes: u64,
    pub cloud_routes: u64,
    pub forced_on_device_routes: u64,
    pub forced_cloud_routes: u64,
    pub pii_routes: u64,
    pub privacy_threshold_routes: u64,
    pub realtime_latency_routes: u64,
    /// Sum of the per-rule override counts
    pub override_routes: u64,
    pub estimated_cloud_spend_usd: f64,
}
