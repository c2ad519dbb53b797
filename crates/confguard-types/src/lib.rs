//! Stable DTOs and IDs used across the confguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted audit report
//! - stable string IDs and codes
//! - canonical device path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod report;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use path::DevicePath;
pub use report::{
    AuditData, ConfguardReport, Finding, Location, ReportEnvelope, Severity, ToolMeta, Verdict,
    SCHEMA_REPORT_V1,
};
