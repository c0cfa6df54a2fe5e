//! Synthetic fleet and rack rollups for dashboard views (PRD-09).
//!
//! Aggregated figures the dashboard renders alongside per-server samples.
//! Like [`crate::metrics`], everything here is simulated; the RNG is passed
//! in so tests can seed it.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::alert::{classify, health_score, AlertCondition};
use crate::metrics::{round2, sample, MetricsSample, ServerBaseline};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Share of simulated alerts reported as critical.
const CRITICAL_ALERT_RATIO: f64 = 0.15;

/// Share of simulated alerts reported as warnings.
const WARNING_ALERT_RATIO: f64 = 0.35;

/// Per-server power band (W) used for the rack power figure.
const RACK_POWER_PER_SERVER_MIN: u32 = 150;
const RACK_POWER_PER_SERVER_MAX: u32 = 300;

// ---------------------------------------------------------------------------
// Fleet overview
// ---------------------------------------------------------------------------

/// Server counts by status, supplied by the caller from inventory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleetCounts {
    pub total_servers: u32,
    pub active_servers: u32,
    pub offline_servers: u32,
    pub maintenance_servers: u32,
    pub error_servers: u32,
}

/// Datacenter-wide dashboard headline figures.
#[derive(Debug, Clone, Serialize)]
pub struct DatacenterOverview {
    pub total_servers: u32,
    pub active_servers: u32,
    pub offline_servers: u32,
    pub maintenance_servers: u32,
    pub error_servers: u32,
    /// Watts.
    pub total_power_consumption: u32,
    /// Degrees Celsius.
    pub average_temperature: f64,
    pub total_alerts: u32,
    pub critical_alerts: u32,
    pub warning_alerts: u32,
    pub rack_utilization: f64,
}

/// Simulate the datacenter-wide headline figures around real fleet counts.
pub fn datacenter_overview<R: Rng + ?Sized>(fleet: FleetCounts, rng: &mut R) -> DatacenterOverview {
    let total_alerts = rng.random_range(5..=50u32);
    let critical_alerts = (f64::from(total_alerts) * CRITICAL_ALERT_RATIO).floor() as u32;
    let warning_alerts = (f64::from(total_alerts) * WARNING_ALERT_RATIO).floor() as u32;

    DatacenterOverview {
        total_servers: fleet.total_servers,
        active_servers: fleet.active_servers,
        offline_servers: fleet.offline_servers,
        maintenance_servers: fleet.maintenance_servers,
        error_servers: fleet.error_servers,
        total_power_consumption: rng.random_range(15_000..=45_000),
        average_temperature: round2(rng.random_range(20.0..=26.0)),
        total_alerts,
        critical_alerts,
        warning_alerts,
        rack_utilization: round2(rng.random_range(60.0..=85.0)),
    }
}

// ---------------------------------------------------------------------------
// Rack metrics
// ---------------------------------------------------------------------------

/// Simulated environment figures for a single rack.
#[derive(Debug, Clone, Serialize)]
pub struct RackMetrics {
    pub rack_id: String,
    pub server_count: u32,
    /// Degrees Celsius.
    pub average_temperature: f64,
    /// Watts, scaled by the rack's server count.
    pub power_consumption: u32,
    pub utilization_percentage: f64,
    pub timestamp: Timestamp,
}

/// Simulate rack-level environment figures.
pub fn rack_metrics<R: Rng + ?Sized>(
    rack_id: &str,
    server_count: u32,
    rng: &mut R,
) -> RackMetrics {
    let power_min = server_count * RACK_POWER_PER_SERVER_MIN;
    let power_max = server_count * RACK_POWER_PER_SERVER_MAX;

    RackMetrics {
        rack_id: rack_id.to_string(),
        server_count,
        average_temperature: round2(rng.random_range(20.0..=28.0)),
        power_consumption: rng.random_range(power_min..=power_max),
        utilization_percentage: round2(rng.random_range(40.0..=90.0)),
        timestamp: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Server health
// ---------------------------------------------------------------------------

/// One sample, its derived conditions, and the resulting health score.
#[derive(Debug, Clone, Serialize)]
pub struct ServerHealth {
    pub metrics: MetricsSample,
    pub alerts: Vec<AlertCondition>,
    pub health_score: u8,
}

/// Draw a sample for `baseline`, classify it, and score the result.
pub fn server_health<R: Rng + ?Sized>(baseline: &ServerBaseline, rng: &mut R) -> ServerHealth {
    let metrics = sample(baseline, rng);
    let alerts = classify(&metrics);
    let score = health_score(&alerts);
    ServerHealth {
        metrics,
        alerts,
        health_score: score,
    }
}

// ---------------------------------------------------------------------------
// Rack rollup
// ---------------------------------------------------------------------------

/// Aggregation of per-server samples within one rack.
#[derive(Debug, Clone, Serialize)]
pub struct RackRollup {
    pub total_servers: u32,
    pub average_cpu: f64,
    pub average_temperature: f64,
    /// Watts, summed over all samples.
    pub total_power: f64,
}

/// Aggregate already-drawn samples for a rack's servers.
///
/// Averages divide by `max(1, n)` so an empty rack reports zeros instead of
/// NaN.
pub fn rack_rollup(samples: &[MetricsSample]) -> RackRollup {
    let divisor = samples.len().max(1) as f64;
    RackRollup {
        total_servers: samples.len() as u32,
        average_cpu: samples.iter().map(|s| s.cpu_usage).sum::<f64>() / divisor,
        average_temperature: samples.iter().map(|s| s.temperature).sum::<f64>() / divisor,
        total_power: samples.iter().map(|s| s.power_consumption).sum(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
