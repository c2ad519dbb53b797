use confguard_types::{ReportEnvelope, Severity, Verdict};

pub fn render_markdown(report: &ReportEnvelope) -> String {
    let mut out = String::new();

    out.push_str("# Confguard report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Devices: {} / interfaces: {}\n- Checks: {} run, {} failed, {} skipped\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.devices_scanned,
        report.data.interfaces_scanned,
        report.data.checks_run,
        report.data.checks_failed,
        report.data.checks_skipped,
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };

        if let Some(loc) = &f.location {
            out.push_str(&format!(
                "- [{}] `{}` / `{}` — {} (`{}`:{} )\n",
                sev,
                f.check_id,
                f.code,
                f.message,
                loc.device.as_str(),
                loc.line.unwrap_or(0)
            ));
        } else {
            out.push_str(&format!(
                "- [{}] `{}` / `{}` — {}\n",
                sev, f.check_id, f.code, f.message
            ));
        }

        if let Some(interface) = &f.interface {
            out.push_str(&format!("  - interface: `{}`\n", interface));
        }
        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
