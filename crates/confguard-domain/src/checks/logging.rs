//! Central logging targets.

use super::{rules, CheckDef, CheckKind};
use crate::policy::{MatchMode, Polarity, RuleScope};
use confguard_types::ids;

const REQUIRED: &[&str] = &[
    r"logging 172\.16\.15\.2",
    r"logging buffered 65535 debugging",
];

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    Ok(vec![CheckDef {
        id: ids::CHECK_LOGGING_TARGETS,
        scope: RuleScope::Device,
        kind: CheckKind::Lines(rules(REQUIRED, MatchMode::Exact, Polarity::Required)?),
    }])
}
