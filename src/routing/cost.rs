//! Cloud cost estimation
//!
//! A single flat per-1K-token rate, used only to inform routing decisions
//! and audit data. It has no knowledge of which provider or model serves the
//! request and is not a billing calculation.

/// Estimate the monetary cost of serving a request in the cloud
///
/// Linear in `estimated_tokens`; a token count of 0 yields 0.0.
pub fn estimate_cloud_cost_usd(estimated_tokens: u64, rate_usd_per_1k_tokens: f64) -> f64 {
    (estimated_tokens as f64 / 1000.0) * rate_usd_per_1k_tokens
}

/// Convert a USD amount to micro-dollars for drift-free accumulation
pub(crate) fn usd_to_micro(usd: f64) -> u64 {
    (usd.max(0.0) * 1_000_000.0).round() as u64
}
