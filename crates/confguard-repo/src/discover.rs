use anyhow::Context;
use camino::Utf8Path;
use globset::Glob;
use walkdir::WalkDir;

/// Discover device configuration files in `config_dir`.
///
/// Behavior:
/// - Only the directory itself is scanned, not subdirectories.
/// - `pattern` is a file-name glob (the suffix convention, e.g. `*.conf`).
/// - Names are returned sorted, so an unchanged directory always yields the
///   same device order.
pub fn discover_devices(config_dir: &Utf8Path, pattern: &str) -> anyhow::Result<Vec<String>> {
    if !config_dir.is_dir() {
        anyhow::bail!("config directory does not exist: {config_dir}");
    }

    let matcher = Glob::new(pattern)
        .with_context(|| format!("compile device glob: {pattern}"))?
        .compile_matcher();

    let mut out: Vec<String> = WalkDir::new(config_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| matcher.is_match(name))
        .collect();

    // Stable order.
    out.sort();
    Ok(out)
}
