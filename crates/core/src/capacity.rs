//! Rack capacity accounting and slot-allocation arithmetic (PRD-03).
//!
//! Pure logic — no database access. The caller materialises the rack's
//! servers and passes them in; every report is computed fresh per call and
//! nothing is cached between invocations.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::position::{parse_range, units_occupied};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rack power budget in watts when the rack record carries none.
pub const DEFAULT_POWER_CAPACITY_WATTS: i64 = 12_000;

/// Idle power draw in watts assumed for servers without a profile.
pub const DEFAULT_IDLE_POWER_WATTS: i32 = 180;

/// Smallest placement request a caller may make.
pub const MIN_REQUIRED_UNITS: i64 = 1;

/// Largest placement request a caller may make (one full standard rack).
pub const MAX_REQUIRED_UNITS: i64 = 42;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// A server as seen by the allocator: where it sits and what it draws at idle.
#[derive(Debug, Clone, Default)]
pub struct ServerSlot {
    /// Position token (`"U12"` or `"U12-U14"`); `None` still occupies one unit.
    pub position: Option<String>,
    /// Idle power draw in watts; `None` falls back to [`DEFAULT_IDLE_POWER_WATTS`].
    pub power_idle: Option<i32>,
}

/// Unit and power utilization of a single rack.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityReport {
    pub total_units: u32,
    pub used_units: u32,
    /// Never negative, even when inventory overcommits the rack.
    pub free_units: u32,
    pub utilization_percentage: f64,
    pub power_used: i64,
    pub power_available: i64,
    pub power_utilization_percentage: f64,
}

// ---------------------------------------------------------------------------
// Capacity report
// ---------------------------------------------------------------------------

/// Compute unit and power utilization for a rack.
///
/// `power_capacity` is the rack's budget in watts;
/// [`DEFAULT_POWER_CAPACITY_WATTS`] applies when absent.
pub fn compute_capacity(
    total_units: u32,
    servers: &[ServerSlot],
    power_capacity: Option<i64>,
) -> CapacityReport {
    let used_units: u32 = servers
        .iter()
        .map(|s| units_occupied(s.position.as_deref().unwrap_or("")))
        .sum();

    let free_units = total_units.saturating_sub(used_units);
    let utilization_percentage = if total_units > 0 {
        round2(f64::from(used_units) / f64::from(total_units) * 100.0)
    } else {
        0.0
    };

    let power_used: i64 = servers
        .iter()
        .map(|s| i64::from(s.power_idle.unwrap_or(DEFAULT_IDLE_POWER_WATTS)))
        .sum();

    let power_available = power_capacity.unwrap_or(DEFAULT_POWER_CAPACITY_WATTS);
    let power_utilization_percentage = if power_available > 0 {
        round2(power_used as f64 / power_available as f64 * 100.0)
    } else {
        0.0
    };

    CapacityReport {
        total_units,
        used_units,
        free_units,
        utilization_percentage,
        power_used,
        power_available,
        power_utilization_percentage,
    }
}

// ---------------------------------------------------------------------------
// Free-slot search
// ---------------------------------------------------------------------------

/// Find every start position where `required_units` consecutive free units fit.
///
/// Returns one token per valid start, scanned bottom-up from unit 1
/// (`"U3"` for a single unit, `"U3-U4"` for a span). Overlapping windows
/// are emitted individually rather than merged into maximal spans, so the
/// caller can pick any exact start.
///
/// A `required_units` of 0 or greater than `total_units` yields an empty
/// list; bounds checking of user input is the caller's concern (see
/// [`validate_required_units`]).
pub fn find_available_positions(
    total_units: u32,
    servers: &[ServerSlot],
    required_units: u32,
) -> Vec<String> {
    if required_units == 0 || required_units > total_units {
        return Vec::new();
    }

    let mut occupied: HashSet<u32> = HashSet::new();
    for server in servers {
        let (start, end) = parse_range(server.position.as_deref().unwrap_or(""));
        for unit in start..=end {
            occupied.insert(unit);
        }
    }

    let mut available = Vec::new();
    for start in 1..=(total_units - required_units + 1) {
        let fits = (start..start + required_units).all(|unit| !occupied.contains(&unit));
        if fits {
            let end = start + required_units - 1;
            if required_units == 1 {
                available.push(format!("U{start}"));
            } else {
                available.push(format!("U{start}-U{end}"));
            }
        }
    }

    available
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a placement request's unit count before calling the allocator.
///
/// Returns a `CoreError::Validation` if outside
/// `[MIN_REQUIRED_UNITS, MAX_REQUIRED_UNITS]`.
pub fn validate_required_units(units: i64) -> Result<(), CoreError> {
    if !(MIN_REQUIRED_UNITS..=MAX_REQUIRED_UNITS).contains(&units) {
        return Err(CoreError::Validation(format!(
            "Required units must be between {MIN_REQUIRED_UNITS} and {MAX_REQUIRED_UNITS}, got {units}"
        )));
    }
    Ok(())
}

/// Round to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
