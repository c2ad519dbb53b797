use anyhow::Context;
use confguard_types::{
    ids, AuditData, Finding, ReportEnvelope, Severity, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<ReportEnvelope> {
    let report: ReportEnvelope = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!(
            "unknown report schema: {} (expected {})",
            report.schema,
            SCHEMA_REPORT_V1
        );
    }
    Ok(report)
}

/// Report emitted when the audit itself could not run. The failure is carried
/// as a tool-level finding so downstream consumers see it in-band.
pub fn runtime_error_report(message: &str) -> ReportEnvelope {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "confguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            interface: None,
            help: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: AuditData {
            profile: String::new(),
            findings_total: 1,
            findings_emitted: 1,
            ..AuditData::default()
        },
    }
}
