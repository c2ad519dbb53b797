//! Serialization and file-writing helpers shared by the CLI.

use anyhow::Context;
use camino::Utf8Path;
use confguard_types::ReportEnvelope;

pub fn serialize_report(report: &ReportEnvelope) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(report).context("serialize report")?;
    out.push('\n');
    Ok(out)
}

pub fn write_report(path: &Utf8Path, report: &ReportEnvelope) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_text(path, &data)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write {}", path))?;
    Ok(())
}
