//! The `check` use case: audit a device selection and produce a report.

use anyhow::Context;
use camino::Utf8PathBuf;
use confguard_domain::ParseOptions;
use confguard_repo::DeviceCache;
use confguard_settings::{Overrides, ResolvedConfig};
use confguard_types::{ReportEnvelope, ToolMeta, Verdict, SCHEMA_REPORT_V1};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Explicit device selection, in order. Empty means: discover all files
    /// in the configured directory matching the device glob.
    pub devices: Vec<String>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ReportEnvelope,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, select devices, evaluate, report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        confguard_settings::ConfguardConfigV1::default()
    } else {
        confguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = confguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let config_dir = Utf8PathBuf::from(resolved.audit.config_dir.clone());

    let devices = if input.devices.is_empty() {
        confguard_repo::discover_devices(&config_dir, &resolved.audit.device_glob)
            .context("discover devices")?
    } else {
        input.devices.clone()
    };

    let mut cache = DeviceCache::new(
        config_dir,
        ParseOptions {
            keep_blank_lines: resolved.audit.keep_blank_lines,
        },
    );

    let domain_report = confguard_domain::evaluate(&mut cache, &devices, &resolved.effective)?;

    let finished_at = OffsetDateTime::now_utc();

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "confguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: domain_report.verdict,
        findings: domain_report.findings,
        data: domain_report.data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    const MINIMAL_DEVICE: &str = "hostname sw1\n";

    fn utf8_root(tmp: &tempfile::TempDir) -> camino::Utf8PathBuf {
        camino::Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    #[test]
    fn empty_config_uses_defaults_and_discovery() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("configs/sw1.conf"), MINIMAL_DEVICE);

        let input = CheckInput {
            config_text: "",
            overrides: Overrides {
                config_dir: Some(root.join("configs").to_string()),
                ..Overrides::default()
            },
            devices: Vec::new(),
        };

        let output = run_check(input).expect("run_check");
        assert_eq!(output.resolved_config.effective.profile, "strict");
        assert_eq!(output.report.data.devices_scanned, 1);
        // A bare hostname fails the strict baseline.
        assert_eq!(output.report.verdict, Verdict::Fail);
        assert_eq!(output.report.schema, SCHEMA_REPORT_V1);
    }

    #[test]
    fn explicit_selection_beats_discovery_and_preserves_order() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("configs/a.conf"), MINIMAL_DEVICE);
        write_file(&root.join("configs/b.conf"), MINIMAL_DEVICE);

        let input = CheckInput {
            config_text: "",
            overrides: Overrides {
                config_dir: Some(root.join("configs").to_string()),
                ..Overrides::default()
            },
            devices: vec!["b.conf".to_string()],
        };

        let output = run_check(input).expect("run_check");
        assert_eq!(output.report.data.devices_scanned, 1);
        let device = output.report.findings[0]
            .location
            .as_ref()
            .map(|l| l.device.as_str().to_string())
            .expect("location");
        assert_eq!(device, "b.conf");
    }

    #[test]
    fn missing_device_file_is_a_hard_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = utf8_root(&tmp);
        std::fs::create_dir_all(root.join("configs").as_std_path()).expect("mkdir");

        let input = CheckInput {
            config_text: "",
            overrides: Overrides {
                config_dir: Some(root.join("configs").to_string()),
                ..Overrides::default()
            },
            devices: vec!["ghost.conf".to_string()],
        };

        let err = run_check(input).unwrap_err();
        assert!(format!("{err:#}").contains("ghost.conf"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Warn), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }
}
