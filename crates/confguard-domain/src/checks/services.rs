//! Service hardening: required no-forms and forbidden services.

use super::{rules, CheckDef, CheckKind};
use crate::policy::{MatchMode, Polarity, RuleScope};
use confguard_types::ids;

const DISABLED: &[&str] = &[
    r"no service pad",
    r"no ip domain-lookup",
    r"ip ospf name-lookup",
    r"no ip source-route",
    r"no ip gratuitous-arps", // WARNING: HA clustering may require Grat ARP
];

const REJECTED: &[&str] = &[
    r"service internal",
    r"enable password", // plaintext enable credential
    r"ip http server",
    r"ip http secure-server",
    r"ntp master",
];

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    Ok(vec![
        CheckDef {
            id: ids::CHECK_SERVICES_HARDENING,
            scope: RuleScope::Device,
            kind: CheckKind::Lines(rules(DISABLED, MatchMode::Exact, Polarity::Required)?),
        },
        CheckDef {
            id: ids::CHECK_SERVICES_REJECTED,
            scope: RuleScope::Device,
            kind: CheckKind::Lines(rules(REJECTED, MatchMode::Exact, Polarity::Rejected)?),
        },
    ])
}
