//! Declarative rule model and resolved audit policy.

use anyhow::Context;
use confguard_types::Severity;
use regex::Regex;
use std::collections::BTreeMap;

/// Whether a pattern must match from the start of the line or anywhere in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Partial,
}

/// Whether a pattern's presence or absence constitutes compliance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Required,
    Rejected,
}

/// What a check expands over: one instance per device, or one per
/// (device, interface) pair. Always an explicit field, never inferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleScope {
    Device,
    Interface,
}

/// One declarative line rule, with its pattern compiled up front.
#[derive(Clone, Debug)]
pub struct Rule {
    pattern: Regex,
    source: String,
    mode: MatchMode,
    polarity: Polarity,
}

impl Rule {
    pub fn new(pattern: &str, mode: MatchMode, polarity: Polarity) -> anyhow::Result<Self> {
        let compiled =
            Regex::new(pattern).with_context(|| format!("invalid rule pattern: {pattern}"))?;
        Ok(Self {
            pattern: compiled,
            source: pattern.to_string(),
            mode,
            polarity,
        })
    }

    pub fn required(pattern: &str, mode: MatchMode) -> anyhow::Result<Self> {
        Self::new(pattern, mode, Polarity::Required)
    }

    pub fn rejected(pattern: &str, mode: MatchMode) -> anyhow::Result<Self> {
        Self::new(pattern, mode, Polarity::Rejected)
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The pattern as written in the catalog, for messages and payloads.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

/// Per-check policy resolved from profile presets and overrides.
#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// The resolved policy the engine runs with.
#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
