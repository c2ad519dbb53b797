//! VTY line block settings.

use super::{rules, BlockCheck, BlockCount, CheckDef, CheckKind};
use crate::policy::{MatchMode, Polarity, RuleScope};
use confguard_types::ids;

const BLOCK: &str = r"^line\svty\s\d";

const REQUIRED: &[&str] = &[
    r"logging synchronous",
    r"exec-timeout 5 0",
    r"transport preferred none",
];

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    Ok(vec![CheckDef {
        id: ids::CHECK_VTY_LINE_SETTINGS,
        scope: RuleScope::Device,
        kind: CheckKind::Block(BlockCheck::new(
            BLOCK,
            BlockCount::AtLeastOne,
            rules(REQUIRED, MatchMode::Partial, Polarity::Required)?,
        )?),
    }])
}
