//! The rule evaluator: applies one check's rules to one resolved scope.
//!
//! Line rules run against the whole tree. Block rules assert the block count
//! first (a miscount is its own finding code, distinct from an ordinary rule
//! mismatch) and only then evaluate settings against each block's subtree.
//! The uplink composite resolves a logical port-channel to its physical
//! member as an explicit step before the final assertions.

use crate::checks::{BlockCheck, BlockCount, UplinkCheck};
use crate::fingerprint::fingerprint_for_finding;
use crate::policy::{MatchMode, Polarity, Rule};
use crate::query::line_matches;
use crate::report::CheckStatus;
use crate::tree::{ConfigTree, Node};
use anyhow::Context;
use confguard_types::{ids, DevicePath, Finding, Location, Severity};
use regex::Regex;
use serde_json::json;

pub(crate) struct EvalContext<'a> {
    pub device: &'a str,
    pub interface: Option<&'a str>,
    pub check_id: &'a str,
    pub severity: Severity,
}

impl EvalContext<'_> {
    fn finding(
        &self,
        code: &str,
        message: String,
        line: Option<usize>,
        help: Option<&str>,
        salient: &str,
        data: serde_json::Value,
    ) -> Finding {
        Finding {
            severity: self.severity,
            check_id: self.check_id.to_string(),
            code: code.to_string(),
            message,
            location: Some(Location {
                device: DevicePath::new(self.device),
                line: line.map(|l| l as u32),
            }),
            interface: self.interface.map(str::to_string),
            help: help.map(str::to_string),
            fingerprint: Some(fingerprint_for_finding(
                self.check_id,
                code,
                self.device,
                self.interface,
                salient,
            )),
            data,
        }
    }
}

fn mode_str(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::Exact => "exact",
        MatchMode::Partial => "partial",
    }
}

/// Evaluate device-wide line rules.
///
/// `required`: pass iff the pattern matches some line (anchored for exact
/// mode). `rejected`: pass iff the lookup is empty; a failure identifies the
/// offending line and its number.
pub(crate) fn run_lines(
    tree: &ConfigTree,
    rules: &[Rule],
    ctx: &EvalContext<'_>,
    out: &mut Vec<Finding>,
) -> CheckStatus {
    let before = out.len();

    for rule in rules {
        let exact = rule.mode() == MatchMode::Exact;
        match rule.polarity() {
            Polarity::Required => {
                if tree.find_lines(rule.pattern(), exact).is_empty() {
                    out.push(ctx.finding(
                        ids::CODE_MISSING_REQUIRED_LINE,
                        format!("required directive not found: {}", rule.source()),
                        None,
                        Some("Apply the missing directive from the baseline template."),
                        rule.source(),
                        json!({ "pattern": rule.source(), "mode": mode_str(rule.mode()) }),
                    ));
                }
            }
            Polarity::Rejected => {
                let offending = tree
                    .iter()
                    .find(|n| line_matches(n.text(), rule.pattern(), exact));
                if let Some(node) = offending {
                    out.push(ctx.finding(
                        ids::CODE_REJECTED_LINE_PRESENT,
                        format!("rejected directive present: {}", node.text()),
                        Some(node.line_number()),
                        Some("Remove the offending line."),
                        node.text(),
                        json!({ "pattern": rule.source(), "line_text": node.text() }),
                    ));
                }
            }
        }
    }

    if out.len() > before {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    }
}

/// Evaluate a block check: count assertion, then per-block subtree settings.
pub(crate) fn run_block(
    tree: &ConfigTree,
    check: &BlockCheck,
    ctx: &EvalContext<'_>,
    out: &mut Vec<Finding>,
) -> CheckStatus {
    let blocks = tree.find_objects(&check.block);

    let miscount = match check.expect {
        BlockCount::ExactlyOne => blocks.len() != 1,
        BlockCount::AtLeastOne => blocks.is_empty(),
    };
    if miscount {
        let expected = match check.expect {
            BlockCount::ExactlyOne => "exactly one",
            BlockCount::AtLeastOne => "at least one",
        };
        out.push(ctx.finding(
            ids::CODE_BLOCK_COUNT_MISMATCH,
            format!(
                "expected {expected} block matching '{}', found {}",
                check.block_source,
                blocks.len()
            ),
            None,
            None,
            &format!("{}|{}", check.block_source, blocks.len()),
            json!({ "block": check.block_source, "found": blocks.len() }),
        ));
        return CheckStatus::Fail;
    }

    let before = out.len();
    for block in &blocks {
        for rule in &check.settings {
            match rule.polarity() {
                Polarity::Required => {
                    // Typed subtree extraction; `None` is the not-found outcome.
                    let found: Option<String> = block.value_in_subtree(rule.pattern(), 0);
                    if found.is_none() {
                        out.push(ctx.finding(
                            ids::CODE_MISSING_BLOCK_SETTING,
                            format!(
                                "'{}' not configured under '{}'",
                                rule.source(),
                                block.text()
                            ),
                            Some(block.line_number()),
                            None,
                            &format!("{}|{}", block.text(), rule.source()),
                            json!({ "block": block.text(), "setting": rule.source() }),
                        ));
                    }
                }
                Polarity::Rejected => {
                    if let Some(node) = block.find_in_subtree(rule.pattern()) {
                        out.push(ctx.finding(
                            ids::CODE_REJECTED_BLOCK_SETTING,
                            format!("'{}' configured under '{}'", node.text(), block.text()),
                            Some(node.line_number()),
                            None,
                            &format!("{}|{}", block.text(), node.text()),
                            json!({ "block": block.text(), "line_text": node.text() }),
                        ));
                    }
                }
            }
        }
    }

    if out.len() > before {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    }
}

/// Resolve a link-aggregation logical uplink to its physical member: the
/// Ethernet interface configured with the same channel-group number.
fn resolve_lag_member<'t>(
    tree: &'t ConfigTree,
    check: &UplinkCheck,
    lag_text: &str,
) -> anyhow::Result<Option<Node<'t>>> {
    let Some(number) = check
        .lag_number
        .captures(lag_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
    else {
        return Ok(None);
    };
    let member_child = Regex::new(&format!(r"^channel-group\s+{number}(\s|$)"))
        .context("compile channel-group pattern")?;
    Ok(tree
        .find_objects_with_child(&check.member_header, &member_child)
        .into_iter()
        .next())
}

/// Evaluate the uplink composite for one (device, interface) instance.
///
/// Skips interfaces that carry no uplink tag in their description.
pub(crate) fn run_uplink(
    tree: &ConfigTree,
    check: &UplinkCheck,
    interface: &str,
    ctx: &EvalContext<'_>,
    out: &mut Vec<Finding>,
) -> anyhow::Result<CheckStatus> {
    let header = Regex::new(&format!("^{}$", regex::escape(interface)))
        .with_context(|| format!("compile interface header pattern for {interface}"))?;

    let uplinks = tree.find_objects_with_child(&header, &check.description_tag);
    if uplinks.is_empty() {
        return Ok(CheckStatus::Skip);
    }
    if uplinks.len() > 1 {
        out.push(ctx.finding(
            ids::CODE_UPLINK_AMBIGUOUS,
            format!("more than one uplink matches '{interface}' ({})", uplinks.len()),
            None,
            None,
            interface,
            json!({ "interface": interface, "found": uplinks.len() }),
        ));
        return Ok(CheckStatus::Fail);
    }

    let mut uplink = uplinks[0];

    // A port-channel is logical; the address lives on the physical member.
    if uplink.matches(&check.lag_hint) {
        match resolve_lag_member(tree, check, uplink.text())? {
            Some(member) => uplink = member,
            None => {
                out.push(ctx.finding(
                    ids::CODE_UPLINK_MEMBER_UNRESOLVED,
                    format!("no physical member interface found for '{}'", uplink.text()),
                    Some(uplink.line_number()),
                    Some("Configure channel-group on the physical member interface."),
                    uplink.text(),
                    json!({ "interface": uplink.text() }),
                ));
                return Ok(CheckStatus::Fail);
            }
        }
    }

    let before = out.len();
    if !uplink.has_matching_child(&check.ipv6_enable) {
        out.push(ctx.finding(
            ids::CODE_UPLINK_MISSING_IPV6,
            format!("uplink '{}' missing 'ipv6 enable'", uplink.text()),
            Some(uplink.line_number()),
            Some("Enable IPv6 on the physical uplink interface."),
            &format!("{}|enable", uplink.text()),
            json!({ "interface": uplink.text(), "missing": "ipv6 enable" }),
        ));
    }
    if !uplink.has_matching_child(&check.ipv6_address) {
        out.push(ctx.finding(
            ids::CODE_UPLINK_MISSING_IPV6,
            format!("uplink '{}' missing ipv6 address", uplink.text()),
            Some(uplink.line_number()),
            Some("Assign the uplink ipv6 address on the physical uplink interface."),
            &format!("{}|address", uplink.text()),
            json!({ "interface": uplink.text(), "missing": "ipv6 address" }),
        ));
    }

    Ok(if out.len() > before {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{self, CheckKind};
    use crate::tree::ParseOptions;
    use confguard_types::ids as check_ids;

    fn parse(text: &str) -> ConfigTree {
        ConfigTree::parse(text, &ParseOptions::default()).expect("parse")
    }

    fn ctx(check_id: &'static str) -> EvalContext<'static> {
        EvalContext {
            device: "sw1.conf",
            interface: None,
            check_id,
            severity: Severity::Error,
        }
    }

    fn catalog_kind(id: &str) -> CheckKind {
        checks::catalog()
            .expect("catalog")
            .into_iter()
            .find(|d| d.id == id)
            .map(|d| d.kind)
            .expect("check present")
    }

    #[test]
    fn required_line_missing_produces_finding() {
        let tree = parse("hostname sw1\n");
        let rules = vec![Rule::required("service tcp-keepalives-in", MatchMode::Exact).expect("rule")];
        let mut out = Vec::new();
        let status = run_lines(&tree, &rules, &ctx("t.check"), &mut out);
        assert_eq!(status, CheckStatus::Fail);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, check_ids::CODE_MISSING_REQUIRED_LINE);
        assert!(out[0].message.contains("service tcp-keepalives-in"));
    }

    #[test]
    fn rejected_line_present_identifies_the_offending_line() {
        let tree = parse("hostname sw1\nenable password hunter2\n");
        let rules = vec![Rule::rejected("enable password", MatchMode::Exact).expect("rule")];
        let mut out = Vec::new();
        let status = run_lines(&tree, &rules, &ctx("t.check"), &mut out);
        assert_eq!(status, CheckStatus::Fail);
        assert_eq!(out[0].code, check_ids::CODE_REJECTED_LINE_PRESENT);
        assert!(out[0].message.contains("enable password hunter2"));
        assert_eq!(out[0].location.as_ref().and_then(|l| l.line), Some(2));
    }

    #[test]
    fn rejected_rule_passes_when_absent() {
        let tree = parse("hostname sw1\nenable secret 5 abc\n");
        let rules = vec![Rule::rejected("enable password", MatchMode::Exact).expect("rule")];
        let mut out = Vec::new();
        assert_eq!(run_lines(&tree, &rules, &ctx("t.check"), &mut out), CheckStatus::Pass);
        assert!(out.is_empty());
    }

    #[test]
    fn block_count_mismatch_names_observed_count() {
        let CheckKind::Block(check) = catalog_kind(check_ids::CHECK_IGP_OSPF) else {
            panic!("igp check is block-kind");
        };
        let tree = parse("router ospf 1\nrouter ospf 2\n");
        let mut out = Vec::new();
        let status = run_block(&tree, &check, &ctx(check_ids::CHECK_IGP_OSPF), &mut out);
        assert_eq!(status, CheckStatus::Fail);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, check_ids::CODE_BLOCK_COUNT_MISMATCH);
        assert!(out[0].message.contains("found 2"));
    }

    #[test]
    fn igp_block_missing_settings_fail_and_rejected_setting_is_flagged() {
        let CheckKind::Block(check) = catalog_kind(check_ids::CHECK_IGP_OSPF) else {
            panic!("igp check is block-kind");
        };
        let tree = parse("router ospf 1\n redistribute static\n redistribute connected\n");
        let mut out = Vec::new();
        let status = run_block(&tree, &check, &ctx(check_ids::CHECK_IGP_OSPF), &mut out);
        assert_eq!(status, CheckStatus::Fail);

        let codes: Vec<&str> = out.iter().map(|f| f.code.as_str()).collect();
        // maximum-paths 8 missing, redistribute connected present.
        assert_eq!(
            codes,
            vec![
                check_ids::CODE_MISSING_BLOCK_SETTING,
                check_ids::CODE_REJECTED_BLOCK_SETTING
            ]
        );
        assert!(out[0].message.contains("maximum-paths 8"));
        assert!(out[1].message.contains("redistribute connected"));
    }

    #[test]
    fn compliant_igp_block_passes() {
        let CheckKind::Block(check) = catalog_kind(check_ids::CHECK_IGP_OSPF) else {
            panic!("igp check is block-kind");
        };
        let tree = parse("router ospf 1\n maximum-paths 8\n redistribute static\n");
        let mut out = Vec::new();
        assert_eq!(
            run_block(&tree, &check, &ctx(check_ids::CHECK_IGP_OSPF), &mut out),
            CheckStatus::Pass
        );
        assert!(out.is_empty());
    }

    fn uplink_check() -> UplinkCheck {
        match catalog_kind(check_ids::CHECK_INTERFACE_UPLINK) {
            CheckKind::Uplink(u) => u,
            _ => panic!("uplink check is uplink-kind"),
        }
    }

    #[test]
    fn non_uplink_interface_is_skipped() {
        let tree = parse("interface GigabitEthernet0/2\n shutdown\n");
        let mut out = Vec::new();
        let status = run_uplink(
            &tree,
            &uplink_check(),
            "interface GigabitEthernet0/2",
            &ctx(check_ids::CHECK_INTERFACE_UPLINK),
            &mut out,
        )
        .expect("run");
        assert_eq!(status, CheckStatus::Skip);
        assert!(out.is_empty());
    }

    #[test]
    fn physical_uplink_with_ipv6_passes() {
        let tree = parse(
            "interface GigabitEthernet0/1\n description to-UPLINK-sw2\n ipv6 enable\n ipv6 address 2001:db8:0:1::1/64\n",
        );
        let mut out = Vec::new();
        let status = run_uplink(
            &tree,
            &uplink_check(),
            "interface GigabitEthernet0/1",
            &ctx(check_ids::CHECK_INTERFACE_UPLINK),
            &mut out,
        )
        .expect("run");
        assert_eq!(status, CheckStatus::Pass, "findings: {out:?}");
    }

    #[test]
    fn physical_uplink_without_ipv6_fails_with_both_gaps() {
        let tree = parse("interface GigabitEthernet0/1\n description to-UPLINK-sw2\n");
        let mut out = Vec::new();
        let status = run_uplink(
            &tree,
            &uplink_check(),
            "interface GigabitEthernet0/1",
            &ctx(check_ids::CHECK_INTERFACE_UPLINK),
            &mut out,
        )
        .expect("run");
        assert_eq!(status, CheckStatus::Fail);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|f| f.code == check_ids::CODE_UPLINK_MISSING_IPV6));
    }

    #[test]
    fn lag_uplink_resolves_to_physical_member_before_final_check() {
        let tree = parse(
            "interface Port-channel2\n description core UPLINK\ninterface GigabitEthernet1/1\n channel-group 2 mode active\n ipv6 enable\n ipv6 address 2001:db8:0:1::2/64\n",
        );
        let mut out = Vec::new();
        let status = run_uplink(
            &tree,
            &uplink_check(),
            "interface Port-channel2",
            &ctx(check_ids::CHECK_INTERFACE_UPLINK),
            &mut out,
        )
        .expect("run");
        assert_eq!(status, CheckStatus::Pass, "findings: {out:?}");
    }

    #[test]
    fn lag_uplink_without_member_is_an_explicit_failure() {
        let tree = parse("interface Port-channel2\n description core UPLINK\n");
        let mut out = Vec::new();
        let status = run_uplink(
            &tree,
            &uplink_check(),
            "interface Port-channel2",
            &ctx(check_ids::CHECK_INTERFACE_UPLINK),
            &mut out,
        )
        .expect("run");
        assert_eq!(status, CheckStatus::Fail);
        assert_eq!(out[0].code, check_ids::CODE_UPLINK_MEMBER_UNRESOLVED);
    }

    #[test]
    fn lag_member_missing_address_is_reported_against_the_member() {
        let tree = parse(
            "interface Port-channel2\n description core UPLINK\ninterface GigabitEthernet1/1\n channel-group 2 mode active\n ipv6 enable\n",
        );
        let mut out = Vec::new();
        let status = run_uplink(
            &tree,
            &uplink_check(),
            "interface Port-channel2",
            &ctx(check_ids::CHECK_INTERFACE_UPLINK),
            &mut out,
        )
        .expect("run");
        assert_eq!(status, CheckStatus::Fail);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("GigabitEthernet1/1"));
        assert!(out[0].message.contains("ipv6 address"));
    }
}
