use anyhow::Context;
use camino::Utf8Path;
use confguard_domain::{ConfigTree, ParseOptions};

/// Read and parse one device configuration file.
///
/// A missing file fails fast with a diagnostic naming the unresolved path;
/// it is never treated as an empty configuration.
pub fn load_device(path: &Utf8Path, options: &ParseOptions) -> anyhow::Result<ConfigTree> {
    if !path.is_file() {
        anyhow::bail!("{path} is not a valid device configuration");
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let tree = ConfigTree::parse(&text, options).with_context(|| format!("parse {path}"))?;
    Ok(tree)
}
