//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that would trigger a finding.
    pub before: &'static str,
    /// Configuration that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    // Try check_id first, then code
    match identifier {
        // Check IDs
        ids::CHECK_BASELINE_REQUIRED_EXACT | ids::CHECK_BASELINE_REQUIRED_PARTIAL => {
            Some(explain_baseline())
        }
        ids::CHECK_SNMP_COMMUNITIES => Some(explain_snmp_communities()),
        ids::CHECK_SNMP_ACL_REQUIRED => Some(explain_snmp_acl_required()),
        ids::CHECK_LOGGING_TARGETS => Some(explain_logging_targets()),
        ids::CHECK_SERVICES_HARDENING => Some(explain_services_hardening()),
        ids::CHECK_SERVICES_REJECTED => Some(explain_services_rejected()),
        ids::CHECK_VTY_LINE_SETTINGS => Some(explain_vty_line_settings()),
        ids::CHECK_IGP_OSPF => Some(explain_igp_ospf()),
        ids::CHECK_INTERFACE_UPLINK => Some(explain_interface_uplink()),

        // Codes
        ids::CODE_MISSING_REQUIRED_LINE => Some(explain_missing_required_line()),
        ids::CODE_REJECTED_LINE_PRESENT => Some(explain_rejected_line_present()),
        ids::CODE_BLOCK_COUNT_MISMATCH => Some(explain_block_count_mismatch()),
        ids::CODE_UPLINK_MISSING_IPV6 => Some(explain_uplink_missing_ipv6()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_BASELINE_REQUIRED_EXACT,
        ids::CHECK_BASELINE_REQUIRED_PARTIAL,
        ids::CHECK_SNMP_COMMUNITIES,
        ids::CHECK_SNMP_ACL_REQUIRED,
        ids::CHECK_LOGGING_TARGETS,
        ids::CHECK_SERVICES_HARDENING,
        ids::CHECK_SERVICES_REJECTED,
        ids::CHECK_VTY_LINE_SETTINGS,
        ids::CHECK_IGP_OSPF,
        ids::CHECK_INTERFACE_UPLINK,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_REQUIRED_LINE,
        ids::CODE_REJECTED_LINE_PRESENT,
        ids::CODE_BLOCK_COUNT_MISMATCH,
        ids::CODE_MISSING_BLOCK_SETTING,
        ids::CODE_REJECTED_BLOCK_SETTING,
        ids::CODE_UPLINK_AMBIGUOUS,
        ids::CODE_UPLINK_MEMBER_UNRESOLVED,
        ids::CODE_UPLINK_MISSING_IPV6,
    ]
}

// --- Check-level explanations ---

fn explain_baseline() -> Explanation {
    Explanation {
        title: "Baseline Global Configuration",
        description: "\
Verifies that every audited device carries the required global directives:
timestamping, timezone, TCP keepalives and tuning, and a reserved memory
floor. Missing baseline lines are the most common drift after a device swap
or an IOS upgrade.",
        remediation: "Apply the missing global directives from the site baseline template.",
        examples: ExamplePair {
            before: "hostname core-sw1",
            after: "hostname core-sw1\nservice tcp-keepalives-in\nservice tcp-keepalives-out",
        },
    }
}

fn explain_snmp_communities() -> Explanation {
    Explanation {
        title: "Approved SNMP Communities",
        description: "\
Requires the approved read-only and read-write SNMP communities, each bound
to the management ACL. Devices answering on ad-hoc community strings are
invisible to the pollers and writable by anyone who guesses the string.",
        remediation: "Configure the approved communities with the management ACL applied.",
        examples: ExamplePair {
            before: "snmp-server community public RO",
            after: "snmp-server community g1v3mE$t@t$ RO 99",
        },
    }
}

fn explain_snmp_acl_required() -> Explanation {
    Explanation {
        title: "SNMP Communities Require an ACL",
        description: "\
Rejects any SNMP community definition that ends at the RO/RW keyword with no
access-list number, which leaves the agent reachable from any source address.",
        remediation: "Append the management access-list to every snmp-server community line.",
        examples: ExamplePair {
            before: "snmp-server community g1v3mE$t@t$ RO",
            after: "snmp-server community g1v3mE$t@t$ RO 99",
        },
    }
}

fn explain_logging_targets() -> Explanation {
    Explanation {
        title: "Central Logging Targets",
        description: "\
Requires the central syslog collector and a local debugging buffer so that
transient events survive a session disconnect.",
        remediation: "Point logging at the collector and size the local buffer.",
        examples: ExamplePair {
            before: "no logging on",
            after: "logging 172.16.15.2\nlogging buffered 65535 debugging",
        },
    }
}

fn explain_services_hardening() -> Explanation {
    Explanation {
        title: "Service Hardening Directives",
        description: "\
Requires the explicit no-forms that disable legacy services: PAD, domain
lookup, source routing, and gratuitous ARPs (note: HA clustering may require
gratuitous ARP), plus OSPF name lookups for readable neighbor output.",
        remediation: "Add the missing no-form directives to the global configuration.",
        examples: ExamplePair {
            before: "ip source-route",
            after: "no ip source-route\nno service pad",
        },
    }
}

fn explain_services_rejected() -> Explanation {
    Explanation {
        title: "Forbidden Services",
        description: "\
Rejects directives that must never appear on an audited device: the plaintext
enable password, the HTTP(S) management server, `service internal`, and
`ntp master`.",
        remediation: "Remove the flagged directive; use `enable secret` for the enable credential.",
        examples: ExamplePair {
            before: "enable password hunter2\nip http server",
            after: "enable secret 5 $1$mERr$hx5rVt7rPNoS4wqbXKX7m0",
        },
    }
}

fn explain_vty_line_settings() -> Explanation {
    Explanation {
        title: "VTY Line Settings",
        description: "\
Requires at least one vty line block, and inside every block: synchronous
logging, a five-minute exec timeout, and `transport preferred none` so a
mistyped word is not resolved as a telnet target.",
        remediation: "Apply the vty template to every `line vty` block.",
        examples: ExamplePair {
            before: "line vty 0 4\n login",
            after: "line vty 0 4\n exec-timeout 5 0\n logging synchronous\n transport preferred none",
        },
    }
}

fn explain_igp_ospf() -> Explanation {
    Explanation {
        title: "IGP (OSPF) Settings",
        description: "\
Requires exactly one `router ospf` block per device. Inside it, static routes
must be redistributed and eight equal-cost paths allowed; redistributing
connected routes is rejected because it leaks lab and transfer networks.",
        remediation: "Keep a single OSPF process configured per the routing standard.",
        examples: ExamplePair {
            before: "router ospf 1\n redistribute connected",
            after: "router ospf 1\n maximum-paths 8\n redistribute static",
        },
    }
}

fn explain_interface_uplink() -> Explanation {
    Explanation {
        title: "Uplink Interface Sanity",
        description: "\
For every interface whose description carries the UPLINK tag, verifies IPv6
is enabled with an address. Port-channel uplinks are resolved to their
physical Ethernet member first, since the address lives on the member.",
        remediation: "Enable IPv6 and assign the uplink address on the (physical) uplink interface.",
        examples: ExamplePair {
            before: "interface GigabitEthernet0/1\n description to-UPLINK-sw2",
            after: "interface GigabitEthernet0/1\n description to-UPLINK-sw2\n ipv6 enable\n ipv6 address 2001:db8::1/64",
        },
    }
}

// --- Code-level explanations ---

fn explain_missing_required_line() -> Explanation {
    Explanation {
        title: "Missing Required Line",
        description: "A directive the active profile requires was not found on the device.",
        remediation: "Add the directive named in the finding message.",
        examples: ExamplePair {
            before: "! directive absent",
            after: "service tcp-keepalives-in",
        },
    }
}

fn explain_rejected_line_present() -> Explanation {
    Explanation {
        title: "Rejected Line Present",
        description: "A directive the active profile forbids is configured on the device.",
        remediation: "Remove the offending line identified in the finding.",
        examples: ExamplePair {
            before: "ip http server",
            after: "! directive removed",
        },
    }
}

fn explain_block_count_mismatch() -> Explanation {
    Explanation {
        title: "Block Count Mismatch",
        description: "\
A block that must exist exactly once (or at least once) was found a different
number of times; the finding names the observed count. This is distinct from
an ordinary rule mismatch: sub-rules are not evaluated against an ambiguous
or absent block.",
        remediation: "Reconcile the device so the expected block appears exactly once.",
        examples: ExamplePair {
            before: "router ospf 1\nrouter ospf 2",
            after: "router ospf 1",
        },
    }
}

fn explain_uplink_missing_ipv6() -> Explanation {
    Explanation {
        title: "Uplink Missing IPv6",
        description: "An uplink-tagged interface lacks `ipv6 enable` or an ipv6 address.",
        remediation: "Configure IPv6 on the physical uplink interface.",
        examples: ExamplePair {
            before: "interface GigabitEthernet0/1\n description to-UPLINK-sw2",
            after: "interface GigabitEthernet0/1\n description to-UPLINK-sw2\n ipv6 enable\n ipv6 address 2001:db8::1/64",
        },
    }
}
