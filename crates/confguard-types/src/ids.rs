//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks: device scope
pub const CHECK_BASELINE_REQUIRED_EXACT: &str = "baseline.required_exact";
pub const CHECK_BASELINE_REQUIRED_PARTIAL: &str = "baseline.required_partial";
pub const CHECK_SNMP_COMMUNITIES: &str = "snmp.communities";
pub const CHECK_SNMP_ACL_REQUIRED: &str = "snmp.acl_required";
pub const CHECK_LOGGING_TARGETS: &str = "logging.targets";
pub const CHECK_SERVICES_HARDENING: &str = "services.hardening";
pub const CHECK_SERVICES_REJECTED: &str = "services.rejected";
pub const CHECK_VTY_LINE_SETTINGS: &str = "vty.line_settings";
pub const CHECK_IGP_OSPF: &str = "igp.ospf";

// Checks: interface scope
pub const CHECK_INTERFACE_UPLINK: &str = "interface.uplink";

// Codes: line rules
pub const CODE_MISSING_REQUIRED_LINE: &str = "missing_required_line";
pub const CODE_REJECTED_LINE_PRESENT: &str = "rejected_line_present";

// Codes: block rules
pub const CODE_BLOCK_COUNT_MISMATCH: &str = "block_count_mismatch";
pub const CODE_MISSING_BLOCK_SETTING: &str = "missing_block_setting";
pub const CODE_REJECTED_BLOCK_SETTING: &str = "rejected_block_setting";

// Codes: interface.uplink
pub const CODE_UPLINK_AMBIGUOUS: &str = "uplink_ambiguous";
pub const CODE_UPLINK_MEMBER_UNRESOLVED: &str = "uplink_member_unresolved";
pub const CODE_UPLINK_MISSING_IPV6: &str = "uplink_missing_ipv6";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
