//! The declarative check catalog.
//!
//! Each module contributes one or more [`CheckDef`]s: an id (stable constant
//! in `confguard_types::ids`), an explicit scope, and the rule data the
//! evaluator consumes. Patterns compile when the catalog is built, so a bad
//! pattern is a configuration error, never a query error.

use crate::policy::{MatchMode, Polarity, Rule, RuleScope};
use anyhow::Context;
use regex::Regex;

mod baseline;
mod igp;
mod logging;
mod services;
mod snmp;
mod uplink;
mod vty;

/// How many blocks a structural check expects before sub-rules run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockCount {
    ExactlyOne,
    AtLeastOne,
}

/// A block-scoped check: locate blocks, assert their count, then evaluate
/// each setting rule against every block's subtree.
#[derive(Clone, Debug)]
pub struct BlockCheck {
    pub block: Regex,
    pub block_source: String,
    pub expect: BlockCount,
    pub settings: Vec<Rule>,
}

impl BlockCheck {
    fn new(block: &str, expect: BlockCount, settings: Vec<Rule>) -> anyhow::Result<Self> {
        let compiled =
            Regex::new(block).with_context(|| format!("invalid block pattern: {block}"))?;
        Ok(Self {
            block: compiled,
            block_source: block.to_string(),
            expect,
            settings,
        })
    }
}

/// The uplink sanity composite; see `checks::uplink`.
#[derive(Clone, Debug)]
pub struct UplinkCheck {
    /// Direct-child description carrying the uplink tag.
    pub description_tag: Regex,
    /// Interface text indicating a link-aggregation logical interface.
    pub lag_hint: Regex,
    /// Captures the aggregation number from a port-channel header.
    pub lag_number: Regex,
    /// Physical member interface headers.
    pub member_header: Regex,
    pub ipv6_enable: Regex,
    pub ipv6_address: Regex,
}

/// What the evaluator runs for one check id.
#[derive(Clone, Debug)]
pub enum CheckKind {
    /// Device-wide line rules (`find_lines` semantics).
    Lines(Vec<Rule>),
    /// Structural block + subtree settings.
    Block(BlockCheck),
    /// The two-step uplink resolution.
    Uplink(UplinkCheck),
}

#[derive(Clone, Debug)]
pub struct CheckDef {
    pub id: &'static str,
    pub scope: RuleScope,
    pub kind: CheckKind,
}

/// Build the full catalog in its canonical order.
///
/// The order is load-bearing: the test matrix and the report follow it.
pub fn catalog() -> anyhow::Result<Vec<CheckDef>> {
    let mut defs = Vec::new();
    defs.extend(baseline::defs()?);
    defs.extend(snmp::defs()?);
    defs.extend(logging::defs()?);
    defs.extend(services::defs()?);
    defs.extend(vty::defs()?);
    defs.extend(igp::defs()?);
    defs.extend(uplink::defs()?);
    Ok(defs)
}

fn rules(patterns: &[&str], mode: MatchMode, polarity: Polarity) -> anyhow::Result<Vec<Rule>> {
    patterns
        .iter()
        .map(|p| Rule::new(p, mode, polarity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use confguard_types::ids;

    #[test]
    fn catalog_builds_and_orders_device_checks_before_interface_checks() {
        let defs = catalog().expect("catalog");
        assert!(!defs.is_empty());

        let check_ids: Vec<&str> = defs.iter().map(|d| d.id).collect();
        assert_eq!(check_ids.first(), Some(&ids::CHECK_BASELINE_REQUIRED_EXACT));
        assert_eq!(check_ids.last(), Some(&ids::CHECK_INTERFACE_UPLINK));

        // No duplicate ids.
        let mut sorted = check_ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), check_ids.len());
    }

    #[test]
    fn only_the_uplink_check_is_interface_scoped() {
        for def in catalog().expect("catalog") {
            let expected = if def.id == ids::CHECK_INTERFACE_UPLINK {
                RuleScope::Interface
            } else {
                RuleScope::Device
            };
            assert_eq!(def.scope, expected, "scope of {}", def.id);
        }
    }
}
