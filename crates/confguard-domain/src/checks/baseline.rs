//! Required global baseline directives.

use super::{rules, CheckDef, CheckKind};
use crate::policy::{MatchMode, Polarity, RuleScope};
use confguard_types::ids;

const REQUIRED_EXACT: &[&str] = &[
    r"service timestamps debug datetime msec localtime show-timezone",
    r"service timestamps log datetime msec localtime show-timezone",
    r"clock timezone MST -7",
    r"service tcp-keepalives-in",
    r"service tcp-keepalives-out",
    r"ip tcp selective-ack",
    r"ip tcp timestamp",
    r"ip tcp synwait-time 10",
    r"ip tcp path-mtu-discovery",
    r"memory reserve critical 4096",
];

const REQUIRED_PARTIAL: &[&str] = &[
    r"clock summer-time MDT recurring",
    r"enable secret",
    r"hostname",
];

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    Ok(vec![
        CheckDef {
            id: ids::CHECK_BASELINE_REQUIRED_EXACT,
            scope: RuleScope::Device,
            kind: CheckKind::Lines(rules(
                REQUIRED_EXACT,
                MatchMode::Exact,
                Polarity::Required,
            )?),
        },
        CheckDef {
            id: ids::CHECK_BASELINE_REQUIRED_PARTIAL,
            scope: RuleScope::Device,
            kind: CheckKind::Lines(rules(
                REQUIRED_PARTIAL,
                MatchMode::Partial,
                Polarity::Required,
            )?),
        },
    ])
}
