//! Threshold-based alert derivation for metric samples (PRD-08).
//!
//! Pure logic — the caller decides whether to materialise a returned
//! condition as a stored alert record. Thresholds are fixed platform-wide;
//! per-rack overrides are a persistence concern and live outside this crate.

use serde::Serialize;

use crate::metrics::MetricsSample;

// ---------------------------------------------------------------------------
// Threshold constants (warning / critical pairs, strict `>` comparisons)
// ---------------------------------------------------------------------------

pub const CPU_WARNING_THRESHOLD: f64 = 85.0;
pub const CPU_CRITICAL_THRESHOLD: f64 = 95.0;

pub const MEMORY_WARNING_THRESHOLD: f64 = 90.0;
pub const MEMORY_CRITICAL_THRESHOLD: f64 = 95.0;

pub const TEMPERATURE_WARNING_THRESHOLD: f64 = 65.0;
pub const TEMPERATURE_CRITICAL_THRESHOLD: f64 = 75.0;

pub const DISK_WARNING_THRESHOLD: f64 = 85.0;
pub const DISK_CRITICAL_THRESHOLD: f64 = 95.0;

// ---------------------------------------------------------------------------
// Health score weights
// ---------------------------------------------------------------------------

/// Points deducted from a server's health score per condition severity.
const CRITICAL_PENALTY: i32 = 30;
const WARNING_PENALTY: i32 = 15;
const INFO_PENALTY: i32 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Severity of an alert condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertType {
    Critical,
    Warning,
    Info,
}

/// Subsystem an alert condition concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertCategory {
    Hardware,
    Network,
    Security,
    Environment,
}

/// A single metric threshold breach derived from one sample.
///
/// Ephemeral — the service layer may persist it as an alert entity with
/// status, timestamps, and server/rack linkage.
#[derive(Debug, Clone, Serialize)]
pub struct AlertCondition {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub category: AlertCategory,
    pub title: String,
    pub description: String,
    /// Always the warning cutoff for the breached metric, regardless of
    /// which severity fired.
    pub threshold_value: f64,
    pub current_value: f64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Evaluate a sample against the fixed thresholds.
///
/// Rules run in a fixed order (cpu, memory, temperature, disk) and are
/// independent; one sample can breach several at once.
pub fn classify(sample: &MetricsSample) -> Vec<AlertCondition> {
    let mut conditions = Vec::new();

    push_breach(
        &mut conditions,
        sample.cpu_usage,
        CPU_WARNING_THRESHOLD,
        CPU_CRITICAL_THRESHOLD,
        AlertCategory::Hardware,
        "High CPU Usage Detected",
        format!(
            "CPU usage is at {:.1}%, exceeding safe operating levels",
            sample.cpu_usage
        ),
    );

    push_breach(
        &mut conditions,
        sample.memory_usage,
        MEMORY_WARNING_THRESHOLD,
        MEMORY_CRITICAL_THRESHOLD,
        AlertCategory::Hardware,
        "High Memory Usage",
        format!(
            "Memory usage is at {:.1}%, system may become unstable",
            sample.memory_usage
        ),
    );

    push_breach(
        &mut conditions,
        sample.temperature,
        TEMPERATURE_WARNING_THRESHOLD,
        TEMPERATURE_CRITICAL_THRESHOLD,
        AlertCategory::Environment,
        "High Temperature Warning",
        format!(
            "Server temperature is {:.1}°C, cooling may be required",
            sample.temperature
        ),
    );

    push_breach(
        &mut conditions,
        sample.disk_usage,
        DISK_WARNING_THRESHOLD,
        DISK_CRITICAL_THRESHOLD,
        AlertCategory::Hardware,
        "Low Disk Space",
        format!(
            "Disk usage is at {:.1}%, consider cleanup or expansion",
            sample.disk_usage
        ),
    );

    conditions
}

/// Compare one metric against its threshold pair and record a breach.
fn push_breach(
    conditions: &mut Vec<AlertCondition>,
    value: f64,
    warning: f64,
    critical: f64,
    category: AlertCategory,
    title: &str,
    description: String,
) {
    if value <= warning {
        return;
    }
    let alert_type = if value > critical {
        AlertType::Critical
    } else {
        AlertType::Warning
    };
    conditions.push(AlertCondition {
        alert_type,
        category,
        title: title.to_string(),
        description,
        threshold_value: warning,
        current_value: value,
    });
}

// ---------------------------------------------------------------------------
// Health score
// ---------------------------------------------------------------------------

/// Composite health score in `0..=100` for a set of conditions.
///
/// Starts at 100 and deducts per condition severity; an empty set scores a
/// perfect 100 and the floor is 0.
pub fn health_score(conditions: &[AlertCondition]) -> u8 {
    let score = conditions.iter().fold(100i32, |score, condition| {
        score
            - match condition.alert_type {
                AlertType::Critical => CRITICAL_PENALTY,
                AlertType::Warning => WARNING_PENALTY,
                AlertType::Info => INFO_PENALTY,
            }
    });
    score.max(0) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
