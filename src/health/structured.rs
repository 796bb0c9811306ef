use crate::types::{Severity, StructuredHealth};

const WARNING_STATES: &[&str] = &["degraded", "minor-failure"];

// Both spellings of critical failure show up upstream.
const ERROR_STATES: &[&str] = &[
    "major-failure",
    "critical_failure",
    "critical-failure",
    "nonrecoverable-error",
    "isolated",
];

pub fn classify_health_state(state: &str) -> Severity {
    if WARNING_STATES.contains(&state) {
        Severity::Warning
    } else if ERROR_STATES.contains(&state) {
        Severity::Error
    } else {
        Severity::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredVerdict {
    pub severity: Severity,
    pub lines: Vec<String>,
}

impl StructuredVerdict {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

/// Every field is printed regardless of the verdict.
pub fn evaluate_structured(health: &StructuredHealth, timestamp: &str) -> StructuredVerdict {
    let mut lines = Vec::with_capacity(2 + health.health_indications.len());
    lines.push(format!("{} - Health state: {}", timestamp, health.health_state));
    lines.push(format!("Operational status: {}", health.operational_status));
    lines.extend(health.health_indications.iter().cloned());

    StructuredVerdict {
        severity: classify_health_state(&health.health_state),
        lines,
    }
}
