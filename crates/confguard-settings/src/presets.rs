use confguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use confguard_types::Severity;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into the repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    use confguard_types::ids::*;
    let mut m = BTreeMap::new();

    for id in [
        CHECK_BASELINE_REQUIRED_EXACT,
        CHECK_BASELINE_REQUIRED_PARTIAL,
        CHECK_SNMP_COMMUNITIES,
        CHECK_SNMP_ACL_REQUIRED,
        CHECK_LOGGING_TARGETS,
        CHECK_SERVICES_HARDENING,
        CHECK_SERVICES_REJECTED,
        CHECK_VTY_LINE_SETTINGS,
        CHECK_IGP_OSPF,
        CHECK_INTERFACE_UPLINK,
    ] {
        m.insert(id.to_string(), CheckPolicy::enabled(default_severity));
    }

    m
}
