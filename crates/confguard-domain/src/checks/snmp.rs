//! SNMP community checks.

use super::{rules, CheckDef, CheckKind};
use crate::policy::{MatchMode, Polarity, RuleScope};
use confguard_types::ids;

/// The approved communities, bound to the management ACL.
const REQUIRED_COMMUNITIES: &[&str] = &[
    r"snmp-server community g1v3mE\$t@t\$ [rR][oO] 99",
    r"snmp-server community SoMeThaNGwIErd [rR][wW] 99",
];

/// Community definitions that stop at the RO/RW keyword carry no ACL.
const NO_ACL: &[&str] = &[
    r"snmp-server\scommunity\s\S+\s+[rR][wW]$",
    r"snmp-server\scommunity\s\S+\s+[rR][oO]$",
];

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    Ok(vec![
        CheckDef {
            id: ids::CHECK_SNMP_COMMUNITIES,
            scope: RuleScope::Device,
            kind: CheckKind::Lines(rules(
                REQUIRED_COMMUNITIES,
                MatchMode::Exact,
                Polarity::Required,
            )?),
        },
        CheckDef {
            id: ids::CHECK_SNMP_ACL_REQUIRED,
            scope: RuleScope::Device,
            kind: CheckKind::Lines(rules(NO_ACL, MatchMode::Exact, Polarity::Rejected)?),
        },
    ])
}
