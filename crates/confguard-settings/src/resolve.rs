use crate::{model::ConfguardConfigV1, presets};
use anyhow::Context;
use confguard_domain::checks;
use confguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use confguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub config_dir: Option<String>,
    pub max_findings: Option<u32>,
}

/// Discovery and parsing knobs consumed by the repo layer.
#[derive(Clone, Debug)]
pub struct AuditOptions {
    pub config_dir: String,
    pub device_glob: String,
    pub keep_blank_lines: bool,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub audit: AuditOptions,
}

pub fn resolve_config(
    cfg: ConfguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    // Surface invalid catalog patterns as a configuration error up front,
    // not as a failure mid-audit.
    checks::catalog().context("build check catalog")?;

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let audit = AuditOptions {
        config_dir: overrides
            .config_dir
            .or(cfg.audit.config_dir)
            .unwrap_or_else(|| "configs".to_string()),
        device_glob: cfg
            .audit
            .device_glob
            .unwrap_or_else(|| "*.conf".to_string()),
        keep_blank_lines: cfg.audit.keep_blank_lines.unwrap_or(true),
    };

    Ok(ResolvedConfig { effective, audit })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
