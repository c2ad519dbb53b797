use crate::checks::{self, CheckKind};
use crate::eval::{self, EvalContext};
use crate::matrix;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{CheckOutcome, CheckStatus, DomainReport, SeverityCounts};
use crate::source::TreeSource;
use anyhow::Context;
use confguard_types::{AuditData, Finding, Severity, Verdict};
use std::collections::BTreeSet;

/// Run the full audit: generate the check matrix for `devices`, evaluate
/// every instance, and summarize.
///
/// A failing check aborts only its own instance. Errors are reserved for
/// loading failures (missing device file, malformed indentation) and
/// invalid catalog patterns.
pub fn evaluate<S: TreeSource>(
    source: &mut S,
    devices: &[String],
    cfg: &EffectiveConfig,
) -> anyhow::Result<DomainReport> {
    let catalog = checks::catalog().context("build check catalog")?;
    let instances = matrix::generate(source, devices, &catalog, cfg)?;

    let mut findings: Vec<Finding> = Vec::new();
    let mut outcomes: Vec<CheckOutcome> = Vec::with_capacity(instances.len());

    for instance in instances {
        let Some(def) = catalog.iter().find(|d| d.id == instance.check_id) else {
            continue;
        };
        let Some(policy) = cfg.check_policy(def.id) else {
            continue;
        };
        let tree = source.tree(&instance.device)?;

        let ctx = EvalContext {
            device: &instance.device,
            interface: instance.interface.as_deref(),
            check_id: def.id,
            severity: policy.severity,
        };

        let status = match &def.kind {
            CheckKind::Lines(rules) => eval::run_lines(&tree, rules, &ctx, &mut findings),
            CheckKind::Block(block) => eval::run_block(&tree, block, &ctx, &mut findings),
            CheckKind::Uplink(uplink) => {
                let interface = instance
                    .interface
                    .as_deref()
                    .context("interface-scoped instance without an interface")?;
                eval::run_uplink(&tree, uplink, interface, &ctx, &mut findings)?
            }
        };

        outcomes.push(CheckOutcome { instance, status });
    }

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let interfaces: BTreeSet<(&str, &str)> = outcomes
        .iter()
        .filter_map(|o| {
            o.instance
                .interface
                .as_deref()
                .map(|i| (o.instance.device.as_str(), i))
        })
        .collect();

    let status_count =
        |s: CheckStatus| outcomes.iter().filter(|o| o.status == s).count() as u32;

    let data = AuditData {
        profile: cfg.profile.clone(),
        devices_scanned: devices.len() as u32,
        interfaces_scanned: interfaces.len() as u32,
        checks_run: outcomes.len() as u32,
        checks_passed: status_count(CheckStatus::Pass),
        checks_failed: status_count(CheckStatus::Fail),
        checks_skipped: status_count(CheckStatus::Skip),
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
    };

    Ok(DomainReport {
        verdict,
        findings: emitted,
        outcomes,
        data,
        counts,
    })
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.device (missing last)
    // 3) location.line (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let (ad, al) = match &a.location {
        Some(l) => (l.device.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };
    let (bd, bl) = match &b.location {
        Some(l) => (l.device.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ad.cmp(bd))
        .then(al.cmp(&bl))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
