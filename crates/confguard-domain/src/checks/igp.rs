//! Interior routing protocol (OSPF) block settings.

use super::{rules, BlockCheck, BlockCount, CheckDef, CheckKind};
use crate::policy::{MatchMode, Polarity, RuleScope};
use confguard_types::ids;

const BLOCK: &str = r"^router\sospf";

const REQUIRED: &[&str] = &[r"maximum-paths 8", r"redistribute static"];

/// Leaks lab and transfer networks into the IGP.
const REJECTED: &[&str] = &[r"redistribute connected"];

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    let mut settings = rules(REQUIRED, MatchMode::Partial, Polarity::Required)?;
    settings.extend(rules(REJECTED, MatchMode::Partial, Polarity::Rejected)?);

    Ok(vec![CheckDef {
        id: ids::CHECK_IGP_OSPF,
        scope: RuleScope::Device,
        kind: CheckKind::Block(BlockCheck::new(BLOCK, BlockCount::ExactlyOne, settings)?),
    }])
}
