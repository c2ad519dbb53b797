//! The seam between the pure engine and whatever owns the config files.

use crate::tree::{ConfigTree, ParseOptions};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Where the engine obtains parsed device trees.
///
/// Implementations memoize: repeated lookups for the same device within one
/// run return structurally identical trees. Lookup of an unknown device fails
/// fast with a diagnostic naming what could not be resolved.
pub trait TreeSource {
    fn tree(&mut self, device: &str) -> anyhow::Result<Arc<ConfigTree>>;
}

/// In-memory source over raw config texts. Serves tests and embedders that
/// already hold the text; the filesystem-backed cache lives in the repo crate.
#[derive(Debug, Default)]
pub struct StaticSource {
    options: ParseOptions,
    texts: BTreeMap<String, String>,
    parsed: BTreeMap<String, Arc<ConfigTree>>,
}

impl StaticSource {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            texts: BTreeMap::new(),
            parsed: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, device: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(device.into(), text.into());
    }
}

impl TreeSource for StaticSource {
    fn tree(&mut self, device: &str) -> anyhow::Result<Arc<ConfigTree>> {
        if let Some(tree) = self.parsed.get(device) {
            return Ok(Arc::clone(tree));
        }
        let text = self
            .texts
            .get(device)
            .ok_or_else(|| anyhow::anyhow!("{device} is not a known device configuration"))?;
        let tree = Arc::new(
            ConfigTree::parse(text, &self.options)
                .map_err(|e| anyhow::anyhow!("parse {device}: {e}"))?,
        );
        self.parsed.insert(device.to_string(), Arc::clone(&tree));
        Ok(tree)
    }
}
