//! Uplink interface sanity.
//!
//! An uplink is any interface whose description child carries the UPLINK tag.
//! A port-channel uplink is logical: the address assertions run against the
//! physical Ethernet member configured with the same channel-group number,
//! resolved as an explicit step in the evaluator.

use super::{CheckDef, CheckKind, UplinkCheck};
use crate::policy::RuleScope;
use anyhow::Context;
use confguard_types::ids;
use regex::Regex;

const DESCRIPTION_TAG: &str = r"^description\s.*?UPLINK";
const LAG_HINT: &str = r"[Pp]ort-channel";
const LAG_NUMBER: &str = r"[Pp]ort-channel\s*(\d+)";
const MEMBER_HEADER: &str = r"^interface \S+[Ee]thernet";
const IPV6_ENABLE: &str = r"ipv6 enable";
const IPV6_ADDRESS: &str = r"ipv6 address ([0-9a-f:]+:[12]/64)";

fn compile(pattern: &str) -> anyhow::Result<Regex> {
    Regex::new(pattern).with_context(|| format!("invalid uplink pattern: {pattern}"))
}

pub(super) fn defs() -> anyhow::Result<Vec<CheckDef>> {
    Ok(vec![CheckDef {
        id: ids::CHECK_INTERFACE_UPLINK,
        scope: RuleScope::Interface,
        kind: CheckKind::Uplink(UplinkCheck {
            description_tag: compile(DESCRIPTION_TAG)?,
            lag_hint: compile(LAG_HINT)?,
            lag_number: compile(LAG_NUMBER)?,
            member_header: compile(MEMBER_HEADER)?,
            ipv6_enable: compile(IPV6_ENABLE)?,
            ipv6_address: compile(IPV6_ADDRESS)?,
        }),
    }])
}
