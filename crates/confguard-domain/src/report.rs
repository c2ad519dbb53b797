use crate::matrix::CheckInstance;
use confguard_types::{AuditData, Finding, Severity, Verdict};

/// Outcome of one check instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// The check did not apply to this instance (e.g. a non-uplink interface).
    Skip,
}

/// One (device[, interface], check) result, in matrix order.
#[derive(Clone, Debug)]
pub struct CheckOutcome {
    pub instance: CheckInstance,
    pub status: CheckStatus,
}

#[derive(Clone, Debug, Default)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    /// Per-instance pass/fail/skip, kept in matrix order.
    pub outcomes: Vec<CheckOutcome>,
    pub data: AuditData,
    pub counts: SeverityCounts,
}
