//! Policy routing between on-device and cloud inference
//!
//! This module provides the routing decision engine: scorers that weigh a
//! request's privacy, latency, cost, and quality attributes against each
//! execution target, hard override rules (forced routing, PII, strict
//! privacy, real-time latency), and a flat-rate cloud cost estimate. Every
//! decision carries both raw scores and a stable reason token so routing
//! behavior is auditable in aggregate.

pub mod config;
pub mod cost;
pub mod decision;
pub mod engine;
pub mod error;
pub mod scoring;

pub use config::*;
pub use cost::*;
pub use decision::*;
pub use engine::*;
pub use error::*;
pub use scoring::*;
