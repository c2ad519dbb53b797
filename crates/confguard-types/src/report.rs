use crate::DevicePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for confguard reports.
pub const SCHEMA_REPORT_V1: &str = "confguard.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Where a finding points: a device config file and, when known, a 1-based line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub device: DevicePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Interface header text for interface-scoped findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending. Typically a hash of:
    /// `check_id + code + device + (interface?) + salient fields`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run summary counters emitted alongside the findings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditData {
    pub profile: String,
    pub devices_scanned: u32,
    pub interfaces_scanned: u32,
    pub checks_run: u32,
    pub checks_passed: u32,
    pub checks_failed: u32,
    pub checks_skipped: u32,
    pub findings_total: u32,
    pub findings_emitted: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: AuditData,
}

/// Alias kept for call sites that read better with the tool name spelled out.
pub type ConfguardReport = ReportEnvelope;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn report_round_trips_through_json() {
        let report = ReportEnvelope {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "confguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2020-01-01 00:00:00 UTC),
            finished_at: datetime!(2020-01-01 00:00:01 UTC),
            verdict: Verdict::Fail,
            findings: vec![Finding {
                severity: Severity::Error,
                check_id: "services.rejected".to_string(),
                code: "rejected_line_present".to_string(),
                message: "rejected directive present: enable password hunter2".to_string(),
                location: Some(Location {
                    device: DevicePath::new("core-sw1.conf"),
                    line: Some(12),
                }),
                interface: None,
                help: None,
                fingerprint: None,
                data: serde_json::Value::Null,
            }],
            data: AuditData {
                profile: "strict".to_string(),
                devices_scanned: 1,
                checks_run: 1,
                checks_failed: 1,
                findings_total: 1,
                findings_emitted: 1,
                ..AuditData::default()
            },
        };

        let json = serde_json::to_string(&report).expect("serialize");
        let back: ReportEnvelope = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, report);
        assert_eq!(back.findings[0].location.as_ref().and_then(|l| l.line), Some(12));
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let finding = Finding {
            severity: Severity::Info,
            check_id: "baseline.required_exact".to_string(),
            code: "missing_required_line".to_string(),
            message: "m".to_string(),
            location: None,
            interface: None,
            help: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        };
        let json = serde_json::to_string(&finding).expect("serialize");
        assert!(!json.contains("location"));
        assert!(!json.contains("fingerprint"));
        assert!(!json.contains("interface"));
    }
}
